//! Golden dataset CSV I/O.
//!
//! The wire format is a fixed 12-column table, string-typed throughout.
//! Optional columns use the empty string for "absent"; enum columns are
//! validated on read and written back lower-case.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::errors::EvalError;
use crate::model::{EvalRow, EvalType, Outcome};

/// One CSV record, exactly as it appears on the wire. Field order here
/// defines the column order of written files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Scenario ID")]
    scenario_id: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "User Name")]
    user_name: String,
    #[serde(rename = "Positions JSON")]
    positions_json: String,
    #[serde(rename = "Prices JSON")]
    prices_json: String,
    #[serde(rename = "Eval Type")]
    eval_type: String,
    #[serde(rename = "Ground Truth")]
    ground_truth: String,
    #[serde(rename = "Model Response")]
    model_response: String,
    #[serde(rename = "Model Critique")]
    model_critique: String,
    #[serde(rename = "Model Outcome")]
    model_outcome: String,
    #[serde(rename = "Human Critique")]
    human_critique: String,
    #[serde(rename = "Human Outcome")]
    human_outcome: String,
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn parse_outcome(s: &str) -> Result<Option<Outcome>, EvalError> {
    if s.is_empty() {
        Ok(None)
    } else {
        Outcome::parse(s).map(Some)
    }
}

fn from_record(raw: CsvRow) -> Result<EvalRow, EvalError> {
    Ok(EvalRow {
        scenario_id: raw.scenario_id,
        description: raw.description,
        user_name: raw.user_name,
        positions_json: raw.positions_json,
        prices_json: raw.prices_json,
        eval_type: EvalType::parse(&raw.eval_type)?,
        ground_truth: raw.ground_truth,
        model_response: non_empty(raw.model_response),
        model_critique: non_empty(raw.model_critique),
        model_outcome: parse_outcome(&raw.model_outcome)?,
        human_critique: non_empty(raw.human_critique),
        human_outcome: parse_outcome(&raw.human_outcome)?,
    })
}

fn to_record(row: &EvalRow) -> CsvRow {
    CsvRow {
        scenario_id: row.scenario_id.clone(),
        description: row.description.clone(),
        user_name: row.user_name.clone(),
        positions_json: row.positions_json.clone(),
        prices_json: row.prices_json.clone(),
        eval_type: row.eval_type.to_string(),
        ground_truth: row.ground_truth.clone(),
        model_response: row.model_response.clone().unwrap_or_default(),
        model_critique: row.model_critique.clone().unwrap_or_default(),
        model_outcome: row.model_outcome.map(|o| o.to_string()).unwrap_or_default(),
        human_critique: row.human_critique.clone().unwrap_or_default(),
        human_outcome: row.human_outcome.map(|o| o.to_string()).unwrap_or_default(),
    }
}

/// Load all rows from a golden dataset CSV. Enum columns with invalid
/// values abort the load.
pub fn load_rows(path: &Path) -> anyhow::Result<Vec<EvalRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let raw: CsvRow = record.context("malformed dataset row")?;
        rows.push(from_record(raw)?);
    }
    tracing::debug!(count = rows.len(), path = %path.display(), "loaded dataset");
    Ok(rows)
}

/// Write rows back out with the same header and column order. Parent
/// directories are created as needed; nothing is written for an empty
/// row set.
pub fn save_rows(rows: &[EvalRow], path: &Path) -> anyhow::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(to_record(row))?;
    }
    writer.flush()?;
    Ok(())
}
