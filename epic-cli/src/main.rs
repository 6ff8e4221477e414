//! Command-line entry point for the epic evaluation workflow.
//!
//! Reads epic documents from the given files (or falls back to the bundled
//! samples), drives each one through the evaluation pipeline strictly in
//! sequence, prints every report to stdout, and leaves a timestamped JSON
//! artifact per epic in the output directory.

mod samples;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use epic_flow::{EpicDocument, EpicFlow};
use epic_model::GeminiModel;
use tracing::{error, info};

/// Evaluate epic planning documents against a fixed quality rubric.
#[derive(Debug, Parser)]
#[command(name = "epic-eval", version, about)]
struct Cli {
    /// Epic text files to evaluate; the bundled sample epics run when omitted.
    paths: Vec<PathBuf>,

    /// Gemini model identifier.
    #[arg(long, default_value = "gemini-2.5-flash")]
    model: String,

    /// Directory receiving the JSON report artifacts.
    #[arg(long, default_value = "evaluation_results")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let api_key = std::env::var("GOOGLE_API_KEY")
        .or_else(|_| std::env::var("GEMINI_API_KEY"))
        .context("GOOGLE_API_KEY or GEMINI_API_KEY must be set")?;

    let model = Arc::new(GeminiModel::new(api_key, &cli.model)?);
    let flow = EpicFlow::new(model).with_out_dir(&cli.out_dir);

    let epics = load_epics(&cli.paths).await?;
    let total = epics.len();

    for (position, (source, text)) in epics.into_iter().enumerate() {
        let index = position + 1;
        info!(epic = index, total, source = %source, "evaluating epic");

        match flow.run(EpicDocument::new(index, text)).await {
            Ok(report) => {
                println!("{}", report.to_json()?);
                match &report.saved_to {
                    Some(path) => println!("Report saved to {}", path.display()),
                    None => println!("Report could not be saved; output above is authoritative."),
                }
            }
            // A failed epic does not abort the batch.
            Err(err) => error!(epic = index, error = %err, "epic evaluation failed"),
        }

        if index < total {
            flow.pacing().settle_between_epics().await;
        }
    }

    Ok(())
}

/// Pair each epic text with a label for logging. With no paths given, the
/// two bundled sample epics are used.
async fn load_epics(paths: &[PathBuf]) -> Result<Vec<(String, String)>> {
    if paths.is_empty() {
        return Ok(samples::SAMPLE_EPICS
            .iter()
            .enumerate()
            .map(|(i, text)| (format!("sample #{}", i + 1), (*text).to_string()))
            .collect());
    }

    let mut epics = Vec::with_capacity(paths.len());
    for path in paths {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read epic file {}", path.display()))?;
        epics.push((path.display().to_string(), text));
    }
    Ok(epics)
}
