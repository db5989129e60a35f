//! Aggregate pass/fail summary printed at the end of a run.

use std::fmt::Write as _;

use crate::model::{EvalRow, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedScenario {
    pub scenario_id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub judged: usize,
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<FailedScenario>,
}

impl RunSummary {
    pub fn from_rows(rows: &[EvalRow]) -> Self {
        let total = rows.len();
        let judged = rows.iter().filter(|r| r.is_judged()).count();
        let passed = rows
            .iter()
            .filter(|r| r.model_outcome == Some(Outcome::Pass))
            .count();
        let failures: Vec<FailedScenario> = rows
            .iter()
            .filter(|r| r.model_outcome == Some(Outcome::Fail))
            .map(|r| FailedScenario {
                scenario_id: r.scenario_id.clone(),
                description: r.description.clone(),
            })
            .collect();
        Self {
            total,
            judged,
            passed,
            failed: failures.len(),
            failures,
        }
    }

    /// Judged-pass over judged-total, as a percentage. Undefined when
    /// nothing was judged.
    pub fn pass_rate(&self) -> Option<f64> {
        if self.judged == 0 {
            None
        } else {
            Some(self.passed as f64 / self.judged as f64 * 100.0)
        }
    }

    pub fn render(&self) -> String {
        let sep = "=".repeat(60);
        let mut out = String::new();
        let _ = writeln!(out, "\n{sep}");
        let _ = writeln!(out, "SUMMARY");
        let _ = writeln!(out, "{sep}");
        let _ = writeln!(out, "Total scenarios:  {}", self.total);
        let _ = writeln!(out, "Judged:           {}", self.judged);
        let _ = writeln!(out, "Passed:           {}", self.passed);
        let _ = writeln!(out, "Failed:           {}", self.failed);
        if let Some(rate) = self.pass_rate() {
            let _ = writeln!(out, "Pass rate:        {rate:.1}%");
        }
        if !self.failures.is_empty() {
            let _ = writeln!(out, "\nFailed scenarios:");
            for f in &self.failures {
                let _ = writeln!(out, "  {}: {}", f.scenario_id, f.description);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvalType, JudgmentResult};

    fn row(id: &str, outcome: Option<Outcome>) -> EvalRow {
        let base = EvalRow {
            scenario_id: id.to_string(),
            description: format!("scenario {id}"),
            user_name: "u".into(),
            positions_json: "[]".into(),
            prices_json: "[]".into(),
            eval_type: EvalType::Strict,
            ground_truth: String::new(),
            model_response: Some("{}".into()),
            model_critique: None,
            model_outcome: None,
            human_critique: None,
            human_outcome: None,
        };
        match outcome {
            Some(o) => base.with_judgment(&JudgmentResult {
                critique: "c".into(),
                outcome: o,
            }),
            None => base,
        }
    }

    #[test]
    fn pass_rate_seven_of_ten_renders_one_decimal() {
        let mut rows = Vec::new();
        for i in 0..7 {
            rows.push(row(&format!("P{i}"), Some(Outcome::Pass)));
        }
        for i in 0..3 {
            rows.push(row(&format!("F{i}"), Some(Outcome::Fail)));
        }
        let summary = RunSummary::from_rows(&rows);
        assert_eq!(summary.judged, 10);
        assert_eq!(summary.passed, 7);
        assert_eq!(summary.failed, 3);
        assert!(summary.render().contains("Pass rate:        70.0%"));
    }

    #[test]
    fn pass_rate_undefined_when_nothing_judged() {
        let rows = vec![row("A", None), row("B", None)];
        let summary = RunSummary::from_rows(&rows);
        assert_eq!(summary.pass_rate(), None);
        assert!(!summary.render().contains("Pass rate"));
    }

    #[test]
    fn failed_scenarios_are_listed_with_descriptions() {
        let rows = vec![row("S1", Some(Outcome::Pass)), row("S2", Some(Outcome::Fail))];
        let summary = RunSummary::from_rows(&rows);
        assert_eq!(summary.failures.len(), 1);
        let rendered = summary.render();
        assert!(rendered.contains("Failed scenarios:"));
        assert!(rendered.contains("  S2: scenario S2"));
        assert!(!rendered.contains("  S1:"));
    }
}
