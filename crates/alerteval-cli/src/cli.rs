use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;

use alerteval_core::analyzer::Analyzer;
use alerteval_core::dataset;
use alerteval_core::engine::{Pipeline, RunOptions};
use alerteval_core::errors::EvalError;
use alerteval_core::judge::Judge;
use alerteval_core::prompts::PromptStore;
use alerteval_core::providers::anthropic::{AnthropicClient, DEFAULT_MODEL};
use alerteval_core::providers::ModelClient;
use alerteval_core::report::RunSummary;

#[derive(Parser)]
#[command(
    name = "alerteval",
    version,
    about = "Run the commodity alert evaluation pipeline"
)]
pub struct Cli {
    /// Path to the golden dataset CSV
    #[arg(long, default_value = "golden/scenarios.csv")]
    pub csv: PathBuf,

    /// Analyzer prompt version
    #[arg(long, default_value = "v1")]
    pub analyzer_prompt: String,

    /// Judge prompt version
    #[arg(long, default_value = "v1")]
    pub judge_prompt: String,

    /// Directory containing analyzer_prompts/ and judge_prompts/
    #[arg(long, default_value = ".")]
    pub prompts_dir: PathBuf,

    /// Output directory for results
    #[arg(long, default_value = "eval_results")]
    pub output_dir: PathBuf,

    /// Model identifier used for both analyzer and judge calls
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Skip analysis phase, only run judge on existing responses
    #[arg(long)]
    pub skip_analysis: bool,

    /// Skip judge phase, only run analysis
    #[arg(long)]
    pub skip_judge: bool,

    /// Print progress information
    #[arg(short, long)]
    pub verbose: bool,
}

fn output_file_name(analyzer_prompt: &str, judge_prompt: &str, timestamp: &str) -> String {
    format!("analyzer-{analyzer_prompt}_judge-{judge_prompt}_{timestamp}.csv")
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    // The credential is resolved here and handed to the client
    // explicitly; core components never touch the environment.
    let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
        EvalError::Config("ANTHROPIC_API_KEY environment variable is required".to_string())
    })?;

    let client: Arc<dyn ModelClient> = Arc::new(AnthropicClient::new(cli.model.clone(), api_key));
    let prompts = PromptStore::new(&cli.prompts_dir);
    let pipeline = Pipeline::new(
        Analyzer::new(client.clone(), prompts.clone()),
        Judge::new(client, prompts),
    );

    if cli.verbose {
        println!("Loading scenarios from {}", cli.csv.display());
    }
    let rows = dataset::load_rows(&cli.csv)?;
    if cli.verbose {
        println!("Loaded {} scenarios\n", rows.len());
    }

    let opts = RunOptions {
        analyzer_prompt: cli.analyzer_prompt.clone(),
        judge_prompt: cli.judge_prompt.clone(),
        skip_analysis: cli.skip_analysis,
        skip_judge: cli.skip_judge,
        verbose: cli.verbose,
    };
    let rows = pipeline.run(rows, &opts).await?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let output_path = cli.output_dir.join(output_file_name(
        &cli.analyzer_prompt,
        &cli.judge_prompt,
        &timestamp,
    ));
    dataset::save_rows(&rows, &output_path)?;
    println!("Results saved to {}", output_path.display());

    print!("{}", RunSummary::from_rows(&rows).render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_name_encodes_versions_and_timestamp() {
        assert_eq!(
            output_file_name("v2", "v1", "20260823_120000"),
            "analyzer-v2_judge-v1_20260823_120000.csv"
        );
    }

    #[test]
    fn cli_defaults_match_documented_values() {
        let cli = Cli::parse_from(["alerteval"]);
        assert_eq!(cli.analyzer_prompt, "v1");
        assert_eq!(cli.judge_prompt, "v1");
        assert_eq!(cli.output_dir, PathBuf::from("eval_results"));
        assert_eq!(cli.model, DEFAULT_MODEL);
        assert!(!cli.skip_analysis);
        assert!(!cli.skip_judge);
        assert!(!cli.verbose);
    }
}
