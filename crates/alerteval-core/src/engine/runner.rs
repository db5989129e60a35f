//! Drives the two evaluation phases over the row set.
//!
//! Rows are processed strictly sequentially in input order; each phase
//! is a full pass before the next begins. Per-row skip checks make
//! re-runs idempotent: a row that already carries a phase's result is
//! passed through without a provider call, so a partially completed
//! output file can be fed back in to resume.

use anyhow::Context;
use serde_json::Value;
use tracing::info;

use crate::analyzer::Analyzer;
use crate::judge::Judge;
use crate::model::EvalRow;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub analyzer_prompt: String,
    pub judge_prompt: String,
    pub skip_analysis: bool,
    pub skip_judge: bool,
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            analyzer_prompt: "v1".to_string(),
            judge_prompt: "v1".to_string(),
            skip_analysis: false,
            skip_judge: false,
            verbose: false,
        }
    }
}

pub struct Pipeline {
    pub analyzer: Analyzer,
    pub judge: Judge,
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

impl Pipeline {
    pub fn new(analyzer: Analyzer, judge: Judge) -> Self {
        Self { analyzer, judge }
    }

    /// Runs the enabled phases in order and returns the enriched rows.
    /// Any row-level failure aborts the whole run; nothing is persisted
    /// here, the caller saves the returned rows.
    pub async fn run(&self, mut rows: Vec<EvalRow>, opts: &RunOptions) -> anyhow::Result<Vec<EvalRow>> {
        if !opts.skip_analysis {
            if opts.verbose {
                banner("PHASE 1: Running analyzer");
            }
            rows = self
                .run_analysis(rows, &opts.analyzer_prompt, opts.verbose)
                .await?;
            if opts.verbose {
                println!();
            }
        }
        if !opts.skip_judge {
            if opts.verbose {
                banner("PHASE 2: Running judge");
            }
            rows = self
                .run_judge(rows, &opts.judge_prompt, opts.verbose)
                .await?;
            if opts.verbose {
                println!();
            }
        }
        Ok(rows)
    }

    /// Phase 1: populate `model_response` for every row that lacks one.
    /// Rows that already carry a response pass through unchanged.
    pub async fn run_analysis(
        &self,
        rows: Vec<EvalRow>,
        prompt_version: &str,
        verbose: bool,
    ) -> anyhow::Result<Vec<EvalRow>> {
        let total = rows.len();
        info!(total, prompt_version, "running analyzer phase");

        let mut out = Vec::with_capacity(total);
        for (i, row) in rows.into_iter().enumerate() {
            if verbose {
                println!(
                    "[{}/{}] Analyzing: {}...",
                    i + 1,
                    total,
                    truncate(&row.description, 60)
                );
            }

            if row.is_analyzed() {
                if verbose {
                    println!("  (skipping - already has response)");
                }
                out.push(row);
                continue;
            }

            let positions: Vec<Value> = serde_json::from_str(&row.positions_json)
                .with_context(|| format!("invalid positions JSON in {}", row.scenario_id))?;
            let prices: Vec<Value> = serde_json::from_str(&row.prices_json)
                .with_context(|| format!("invalid prices JSON in {}", row.scenario_id))?;

            let result = self
                .analyzer
                .analyze(&positions, &prices, prompt_version)
                .await
                .with_context(|| format!("analysis failed for {}", row.scenario_id))?;

            if verbose {
                println!("  -> {} suggestions generated", result.suggestions.len());
            }

            out.push(row.with_response(serde_json::to_string(&result)?));
        }
        Ok(out)
    }

    /// Phase 2: populate `model_critique` and `model_outcome`. Rows
    /// without a response cannot be judged; rows already judged pass
    /// through unchanged.
    pub async fn run_judge(
        &self,
        rows: Vec<EvalRow>,
        prompt_version: &str,
        verbose: bool,
    ) -> anyhow::Result<Vec<EvalRow>> {
        let total = rows.len();
        info!(total, prompt_version, "running judge phase");

        let mut out = Vec::with_capacity(total);
        for (i, row) in rows.into_iter().enumerate() {
            if verbose {
                println!(
                    "[{}/{}] Judging: {}...",
                    i + 1,
                    total,
                    truncate(&row.description, 60)
                );
            }

            let response = match &row.model_response {
                Some(response) => response.clone(),
                None => {
                    if verbose {
                        println!("  (skipping - no model response)");
                    }
                    out.push(row);
                    continue;
                }
            };

            if row.is_judged() {
                if verbose {
                    println!("  (skipping - already judged)");
                }
                out.push(row);
                continue;
            }

            let judgment = self
                .judge
                .judge(
                    &row.description,
                    row.eval_type.as_str(),
                    &row.ground_truth,
                    &response,
                    prompt_version,
                )
                .await
                .with_context(|| format!("judging failed for {}", row.scenario_id))?;

            if verbose {
                println!("  -> {}", judgment.outcome);
            }

            out.push(row.with_judgment(&judgment));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_is_char_boundary_safe() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("príčiny zlyhania", 4), "príč");
    }
}
