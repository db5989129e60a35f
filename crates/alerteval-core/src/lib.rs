//! Evaluation pipeline for LLM-generated commodity price alerts.
//!
//! The pipeline runs two phases over a golden scenario dataset: an
//! analyzer phase that asks a model to propose price alerts from
//! position/price data, and a judge phase that scores each response
//! against ground truth. Rows that already carry results are passed
//! through untouched, so interrupted runs can be resumed from their
//! last saved output.

pub mod analyzer;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod judge;
pub mod model;
pub mod prompts;
pub mod providers;
pub mod report;
