use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use emotion_corpus::builder::CorpusBuilder;
use emotion_corpus::config::AppConfig;
use emotion_corpus::corpus;
use emotion_corpus::logging::init_logging;
use emotion_corpus::models::BuildSummary;
use emotion_corpus::validation::InputValidator;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the corpus from raw streaming dumps
    Build {
        /// Directory holding the raw dump files
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// File name pattern of the dumps (e.g. "tweets*.txt")
        #[arg(short, long)]
        pattern: Option<String>,

        /// Corpus file to append to
        #[arg(short, long)]
        corpus: Option<PathBuf>,

        /// Keep the unterminated last record of each file
        #[arg(long)]
        keep_trailing: bool,

        /// Drop records detected as another language
        #[arg(long)]
        english_only: bool,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Show how often each emotion occurs in the corpus
    Stats {
        /// Corpus file to read
        #[arg(short, long)]
        corpus: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    let log_file = config.logging.file_path.as_deref().map(Path::new);
    let _log_guard = init_logging(Some(config.logging.level.as_str()), log_file, config.logging.format == "json")?;

    // Parse command line arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input_dir,
            pattern,
            corpus,
            keep_trailing,
            english_only,
            json,
        } => {
            let input_dir = input_dir.unwrap_or_else(|| config.input_dir());
            let pattern = pattern.unwrap_or_else(|| config.input.file_pattern.clone());
            let corpus_path = corpus.unwrap_or_else(|| config.corpus_path());

            let mut options = config.build_options();
            options.segmenter.emit_trailing |= keep_trailing;
            options.require_english |= english_only;

            let summary = build_corpus(&input_dir, &pattern, &corpus_path, options)?;
            if json {
                print_summary_json(&summary)?;
            }
        },
        Commands::Stats { corpus } => {
            let corpus_path = corpus.unwrap_or_else(|| config.corpus_path());
            show_frequency(&corpus_path)?;
        },
    }

    Ok(())
}

/// Append every matching dump in `input_dir` to the corpus
fn build_corpus(
    input_dir: &Path, pattern: &str, corpus_path: &Path, options: emotion_corpus::BuildOptions,
) -> Result<BuildSummary> {
    InputValidator::validate_file_pattern(pattern)?;
    InputValidator::validate_corpus_path(corpus_path)?;

    info!(
        input_dir = %input_dir.display(),
        pattern,
        corpus = %corpus_path.display(),
        "Starting corpus build"
    );

    let builder = CorpusBuilder::new(options)?;
    let summary = builder
        .build_into_store(input_dir, pattern, corpus_path)
        .with_context(|| format!("Failed to build corpus store {}", corpus_path.display()))?;
    info!(
        rows = summary.rows_written,
        records = summary.records_seen,
        "Wrote rows to {}",
        corpus_path.display()
    );
    Ok(summary)
}

/// Log the label frequencies of a corpus, most common first
fn show_frequency(corpus_path: &Path) -> Result<()> {
    InputValidator::validate_corpus_path(corpus_path)?;
    let frequency = corpus::emotion_frequency(corpus_path)
        .with_context(|| format!("Failed to read corpus store {}", corpus_path.display()))?;

    let total: usize = frequency.iter().map(|(_, count)| count).sum();
    info!("Corpus holds {} rows", total);
    for (label, count) in frequency {
        info!("{label}: {count}");
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_summary_json(summary: &BuildSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
