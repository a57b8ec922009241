//! Comment sources.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Opens the input file, or stdin when no path is given.
pub fn open(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Reads one comment per line. Blank lines are kept as empty comments.
///
/// Invalid UTF-8 is replaced rather than rejected, so one bad byte does not
/// drop the rest of the batch.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut comments = Vec::new();
    for line in reader.split(b'\n') {
        let mut line = line.context("Failed to read comments")?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        comments.push(String::from_utf8_lossy(&line).into_owned());
    }
    Ok(comments)
}

/// Reads the named column of a CSV export.
///
/// Rows shorter than the header yield an empty comment.
pub fn read_csv_column<R: Read>(reader: R, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();
    let Some(index) = headers.iter().position(|h| h == column) else {
        bail!(
            "Column '{}' not found in CSV header (available: {})",
            column,
            headers.join(", ")
        );
    };

    let mut comments = Vec::new();
    for (line, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV record {}", line + 1))?;
        let comment = record.get(index).unwrap_or_default();
        comments.push(String::from_utf8_lossy(comment).into_owned());
    }

    tracing::debug!("Read {} comments from CSV column '{}'", comments.len(), column);
    Ok(comments)
}
