//! precis — local document summarizer driven by a BART ONNX export.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use precis_core::{PrecisConfig, SummaryLength};
use precis_runtime::{start_worker, submit, Readiness, SummaryService};

#[derive(Parser)]
#[command(name = "precis")]
#[command(about = "Summarize text, PDF and Word documents with a local model")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a document, or text piped on stdin
    Summarize {
        /// Document to summarize (.txt, .docx or .pdf); stdin when omitted
        file: Option<PathBuf>,

        /// Summary length
        #[arg(short, long, value_enum, default_value = "medium")]
        length: LengthArg,

        /// Also save the summary to this path as UTF-8 text
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding the exported model and tokenizer
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },
    /// Print the text extracted from a document
    Extract {
        /// Document to extract (.txt, .docx or .pdf)
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LengthArg {
    Short,
    Medium,
    Long,
}

impl From<LengthArg> for SummaryLength {
    fn from(arg: LengthArg) -> Self {
        match arg {
            LengthArg::Short => SummaryLength::Short,
            LengthArg::Medium => SummaryLength::Medium,
            LengthArg::Long => SummaryLength::Long,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries extracted text and summaries.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Summarize {
            file,
            length,
            output,
            model_dir,
        } => run_summarize(file, length.into(), output, model_dir).await,
        Commands::Extract { file } => {
            let text = precis_extract::extract_text(&file)?;
            print!("{}", text);
            Ok(())
        }
    }
}

async fn run_summarize(
    file: Option<PathBuf>,
    length: SummaryLength,
    output: Option<PathBuf>,
    model_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = match &file {
        Some(path) => {
            let text = precis_extract::extract_text(path)?;
            info!(
                "Loaded {} ({} words)",
                path.display(),
                precis_summarize::word_count(&text)
            );
            text
        }
        None => {
            let text = read_stdin().context("Failed to read stdin")?;
            info!(
                "Read {} words from stdin",
                precis_summarize::word_count(&text)
            );
            text
        }
    };

    let config = PrecisConfig::from_env(model_dir.as_deref());
    let service = SummaryService::start(config);
    wait_for_model(&service).await?;

    let tx = start_worker(service);

    let pb = spinner("Generating summary...")?;
    let outcome = submit(&tx, text, length).await;
    pb.finish_and_clear();
    let summary = outcome?;

    println!("{}", summary);
    info!(
        "Summary complete ({} words)",
        precis_summarize::word_count(&summary)
    );

    if let Some(path) = output {
        save_summary(&path, &summary)?;
    }

    Ok(())
}

/// Save the summary as UTF-8 text at the requested path.
fn save_summary(path: &Path, summary: &str) -> anyhow::Result<()> {
    std::fs::write(path, summary)
        .with_context(|| format!("Failed to save summary to {}", path.display()))?;
    info!("Summary saved to {}", path.display());
    Ok(())
}

/// Block until the one-time model load settles.
async fn wait_for_model(service: &SummaryService) -> anyhow::Result<()> {
    let pb = spinner("Loading summarization model...")?;
    loop {
        match service.readiness() {
            Readiness::Loading => tokio::time::sleep(Duration::from_millis(100)).await,
            Readiness::Ready => {
                pb.finish_and_clear();
                return Ok(());
            }
            Readiness::Failed => {
                pb.finish_and_clear();
                let reason = service
                    .load_failure()
                    .unwrap_or_else(|| "unknown error".to_string());
                anyhow::bail!("Summarization model failed to load: {}", reason);
            }
        }
    }
}

/// Stderr spinner for long-running stages.
fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

fn read_stdin() -> std::io::Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_summarize_defaults() {
        let cli = Cli::parse_from(["precis", "summarize", "report.pdf"]);
        match cli.command {
            Commands::Summarize {
                file,
                length,
                output,
                model_dir,
            } => {
                assert_eq!(file, Some(PathBuf::from("report.pdf")));
                assert!(matches!(length, LengthArg::Medium));
                assert!(output.is_none());
                assert!(model_dir.is_none());
            }
            _ => panic!("expected summarize subcommand"),
        }
    }

    #[test]
    fn test_saved_summary_is_exact_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        let summary = "Résumé of the findings.";
        save_summary(&path, summary).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), summary);
    }

    #[test]
    fn test_length_values_parse() {
        for (flag, expected) in [
            ("short", SummaryLength::Short),
            ("medium", SummaryLength::Medium),
            ("long", SummaryLength::Long),
        ] {
            let cli = Cli::parse_from(["precis", "summarize", "--length", flag]);
            match cli.command {
                Commands::Summarize { length, .. } => {
                    assert_eq!(SummaryLength::from(length), expected);
                }
                _ => panic!("expected summarize subcommand"),
            }
        }
    }
}
