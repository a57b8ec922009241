//! Rendering of tagged comments and topic summaries.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use topics_core::TopicTally;

/// Output format for tagged comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<topic>\t<comment>` per line.
    Text,
    /// One JSON object per line.
    Json,
    /// CSV with a `comment,topic` header.
    Csv,
}

/// A comment with its assigned topic.
#[derive(Debug, Clone, Serialize)]
pub struct TaggedComment<'a> {
    pub comment: &'a str,
    pub topic: &'a str,
}

/// Writes one row per tagged comment.
pub fn write_rows<W: Write>(out: W, format: OutputFormat, rows: &[TaggedComment<'_>]) -> Result<()> {
    match format {
        OutputFormat::Text => write_text_rows(out, rows),
        OutputFormat::Json => write_json_rows(out, rows),
        OutputFormat::Csv => write_csv_rows(out, rows),
    }
}

fn write_text_rows<W: Write>(mut out: W, rows: &[TaggedComment<'_>]) -> Result<()> {
    for row in rows {
        writeln!(out, "{}\t{}", row.topic, row.comment)?;
    }
    Ok(())
}

fn write_json_rows<W: Write>(mut out: W, rows: &[TaggedComment<'_>]) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut out, row)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_csv_rows<W: Write>(out: W, rows: &[TaggedComment<'_>]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["comment", "topic"])?;
    for row in rows {
        writer.write_record([row.comment, row.topic])?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Writes the per-topic summary.
pub fn write_summary<W: Write>(mut out: W, format: OutputFormat, tally: &TopicTally) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, tally)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["topic", "count", "percentage"])?;
            for topic in tally.topics() {
                writer.write_record([
                    topic.label.clone(),
                    topic.count.to_string(),
                    format!("{:.1}", tally.percentage(&topic.label)),
                ])?;
            }
            writer.flush().context("Failed to flush CSV output")?;
        }
        OutputFormat::Text => {
            let width = tally
                .topics()
                .iter()
                .map(|t| t.label.chars().count())
                .max()
                .unwrap_or(0)
                .max("Total".len());
            for topic in tally.topics() {
                writeln!(
                    out,
                    "{:<width$}  {:>6}  {:>5.1}%",
                    topic.label,
                    topic.count,
                    tally.percentage(&topic.label),
                    width = width
                )?;
            }
            writeln!(out, "{:<width$}  {:>6}", "Total", tally.total(), width = width)?;
        }
    }
    Ok(())
}
