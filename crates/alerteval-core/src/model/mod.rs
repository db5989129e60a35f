//! Value types shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::EvalError;

/// Binary pass/fail verdict attached by the judge or a human reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    /// Case-insensitive parse; anything outside `pass`/`fail` is rejected.
    pub fn parse(value: &str) -> Result<Self, EvalError> {
        match value.to_ascii_lowercase().as_str() {
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            _ => Err(EvalError::EnumParse {
                field: "outcome",
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// How a scenario's ground truth is interpreted by the judge: exact
/// expected alerts (`strict`) or pipe-delimited rules (`criteria`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalType {
    Strict,
    Criteria,
}

impl EvalType {
    pub fn parse(value: &str) -> Result<Self, EvalError> {
        match value.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "criteria" => Ok(Self::Criteria),
            _ => Err(EvalError::EnumParse {
                field: "eval type",
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Criteria => "criteria",
        }
    }
}

impl fmt::Display for EvalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger direction for a suggested alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Above,
    Below,
}

/// A single alert proposed by the analyzer. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSuggestion {
    pub commodity_code: String,
    pub condition: AlertCondition,
    pub threshold_price: f64,
    pub notes: String,
}

/// Output of one analyzer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub reasoning: String,
    pub suggestions: Vec<AlertSuggestion>,
}

/// Output of one judge invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentResult {
    pub critique: String,
    pub outcome: Outcome,
}

/// One row of the golden dataset: the unit of work and persistence.
///
/// Rows are value objects; the enrichment helpers return a new row
/// rather than mutating in place, so phases never share state.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalRow {
    pub scenario_id: String,
    pub description: String,
    pub user_name: String,
    pub positions_json: String,
    pub prices_json: String,
    pub eval_type: EvalType,
    pub ground_truth: String,
    pub model_response: Option<String>,
    pub model_critique: Option<String>,
    pub model_outcome: Option<Outcome>,
    pub human_critique: Option<String>,
    pub human_outcome: Option<Outcome>,
}

impl EvalRow {
    /// True once the analyzer phase has produced a response.
    pub fn is_analyzed(&self) -> bool {
        self.model_response.is_some()
    }

    /// True once the judge phase has produced a verdict.
    pub fn is_judged(&self) -> bool {
        self.model_outcome.is_some()
    }

    /// New row with the serialized analyzer output attached.
    pub fn with_response(&self, response: String) -> Self {
        let mut row = self.clone();
        row.model_response = Some(response);
        row
    }

    /// New row with the judge's critique and outcome attached.
    /// The two fields are always set together.
    pub fn with_judgment(&self, judgment: &JudgmentResult) -> Self {
        let mut row = self.clone();
        row.model_critique = Some(judgment.critique.clone());
        row.model_outcome = Some(judgment.outcome);
        row
    }
}
