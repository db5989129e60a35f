//! Best-effort extraction of a judgment from free judge text.
//!
//! The judge is asked for a JSON object but is not schema-constrained,
//! so a reply can be prose, fenced, truncated, or missing keys. The
//! structured path takes the widest `{...}` span and requires string
//! `critique` and `outcome` keys; anything that goes wrong falls back
//! to keyword classification. The fallback is fail-closed: text that
//! mentions "fail", or mentions neither verdict, classifies as FAIL.

use crate::model::{JudgmentResult, Outcome};

pub(crate) fn parse_judgment(text: &str) -> JudgmentResult {
    match extract_structured(text) {
        Ok(judgment) => judgment,
        Err(reason) => {
            let lower = text.to_lowercase();
            let outcome = if lower.contains("pass") && !lower.contains("fail") {
                Outcome::Pass
            } else {
                Outcome::Fail
            };
            JudgmentResult {
                critique: format!("[Parse error: {reason}] {text}"),
                outcome,
            }
        }
    }
}

fn extract_structured(text: &str) -> Result<JudgmentResult, String> {
    let start = text.find('{');
    let end = text.rfind('}');
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => return Err("no JSON found in judge response".to_string()),
    };

    let value: serde_json::Value =
        serde_json::from_str(&text[start..=end]).map_err(|e| e.to_string())?;
    let critique = value
        .get("critique")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "missing 'critique' key".to_string())?;
    let outcome_raw = value
        .get("outcome")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "missing 'outcome' key".to_string())?;
    let outcome = Outcome::parse(outcome_raw).map_err(|e| e.to_string())?;

    Ok(JudgmentResult {
        critique: critique.to_string(),
        outcome,
    })
}
