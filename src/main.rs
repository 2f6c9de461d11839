use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use tcdata::config::Config;
use tcdata::corpus::archive::extract_archive;
use tcdata::corpus::tokenize::PunctuationTokenizer;
use tcdata::corpus::writer::write_buckets;
use tcdata::evaluation::ground_truth::GroundTruth;
use tcdata::evaluation::precision::{DEFAULT_CUTOFFS, PRIMARY_CUTOFF};
use tcdata::evaluation::report::evaluate;
use tcdata::evaluation::submission::Submission;

/// tcdata: scoring and corpus tools for text classification exercises.
#[derive(Parser)]
#[command(name = "tcdata", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a ranked submission against ground-truth labels
    Evaluate {
        /// Submission file: one `<doc_id> [<score>]` per line, best first
        output_file: PathBuf,

        /// Ground-truth CSV without header: id,label
        label_file: PathBuf,

        /// Print the report as JSON instead of a text summary
        #[arg(long)]
        json: bool,
    },

    /// Extract per-topic documents from the Reuters SGML archive
    Extract {
        /// Directory containing the .sgm files (default: TCDATA_REUTERS_DIR)
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Where per-topic directories are written (default: TCDATA_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Documents written per topic (default: TCDATA_MAX_DOCS_PER_TOPIC or 100)
        #[arg(long)]
        max_docs: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tcdata=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            output_file,
            label_file,
            json,
        } => {
            let truth = GroundTruth::load(&label_file)?;
            info!(rows = truth.row_count(), "Loaded ground-truth labels");

            let submission = Submission::load(&output_file)?;
            info!(lines = submission.len(), "Loaded submission");

            let report = evaluate(&truth, &submission, PRIMARY_CUTOFF, &DEFAULT_CUTOFFS)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                tcdata::output::terminal::display_evaluation(&report);
            }
        }

        Commands::Extract {
            input_dir,
            output_dir,
            max_docs,
        } => {
            let config = Config::load()?;
            let input_dir = input_dir.unwrap_or(config.reuters_dir);
            let output_dir = output_dir.unwrap_or(config.output_dir);
            let max_docs = max_docs.unwrap_or(config.max_docs_per_topic);
            if max_docs == 0 {
                anyhow::bail!("--max-docs must be at least 1");
            }

            println!("Scanning archive: {}", input_dir.display());
            let outcome = extract_archive(&input_dir, &config.categories, true)?;

            println!("Writing documents to: {}", output_dir.display());
            let summary = write_buckets(
                &outcome.buckets,
                &output_dir,
                max_docs,
                &PunctuationTokenizer,
            )?;

            tcdata::output::terminal::display_extraction(&outcome, &summary);
            println!("\n{}", "Extraction complete.".bold());
        }
    }

    Ok(())
}
