pub mod runner;

pub use runner::{Pipeline, RunOptions};
