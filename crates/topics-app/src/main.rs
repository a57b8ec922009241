//! comment-topics - tag campaign comments with topics.
//!
//! Reads comments (one per line, or a CSV column), classifies each one and
//! writes the tagged rows or a per-topic summary to stdout. Logs go to
//! stderr so the output can be piped.

mod input;
mod output;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use topics_core::{campaign_metadata, TopicClassifier};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, TaggedComment};

/// Tag campaign comments with topics
#[derive(Parser, Debug)]
#[command(name = "comment-topics", version, about)]
struct Args {
    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Read the input as CSV instead of one comment per line
    #[arg(long)]
    csv: bool,

    /// CSV column holding the comment text
    #[arg(long, default_value = "comment")]
    column: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print per-topic counts instead of tagged rows
    #[arg(long)]
    summary: bool,

    /// JSON rule set to use instead of the built-in campaign
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Print the campaign metadata and exit
    #[arg(long)]
    metadata: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Initialize console logging on stderr.
fn init_logging(args: &Args) {
    let log_level = if args.debug { "debug" } else { &args.log_level };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "comment_topics={0},topics_core={0},warn",
            log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

/// Build the classifier from `--rules`, or the built-in campaign.
fn load_classifier(args: &Args) -> Result<TopicClassifier> {
    match &args.rules {
        Some(path) => {
            let classifier = TopicClassifier::from_file(path)
                .with_context(|| format!("Failed to load rule set {}", path.display()))?;
            tracing::info!(
                "Loaded {} rules from {}",
                classifier.rule_count(),
                path.display()
            );
            Ok(classifier)
        }
        None => {
            let classifier = TopicClassifier::new();
            let undeclared = campaign_metadata().undeclared_labels(classifier.labels());
            if !undeclared.is_empty() {
                tracing::warn!(
                    "Campaign metadata does not declare {} classifier topics: {}",
                    undeclared.len(),
                    undeclared.join(", ")
                );
            }
            Ok(classifier)
        }
    }
}

fn run<W: Write>(args: &Args, mut out: W) -> Result<()> {
    if args.metadata {
        serde_json::to_writer_pretty(&mut out, &campaign_metadata())?;
        writeln!(out)?;
        return Ok(());
    }

    let classifier = load_classifier(args)?;

    let reader = input::open(args.input.as_deref())?;
    let comments = if args.csv {
        input::read_csv_column(reader, &args.column)?
    } else {
        input::read_lines(reader)?
    };

    if args.summary {
        let tally = classifier.tally(&comments);
        tracing::info!("Classified {} comments", tally.total());
        output::write_summary(&mut out, args.format, &tally)?;
    } else {
        let rows: Vec<TaggedComment<'_>> = comments
            .iter()
            .map(|comment| TaggedComment {
                comment: comment.as_str(),
                topic: classifier.classify(comment),
            })
            .collect();
        tracing::info!("Classified {} comments", rows.len());
        output::write_rows(&mut out, args.format, &rows)?;
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let stdout = io::stdout();
    run(&args, stdout.lock())
}
