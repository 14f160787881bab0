// src/geo/output.rs
//! Writers for the final ranked-geo records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PlaceRankError, Result};
use crate::stream::spawn_sink;
use crate::types::GeoRankRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<id> "<name>" <title> <rank> <order>` per line, with spaces in the
    /// title written as underscores.
    Text,
    /// One JSON object per line.
    JsonLines,
}

impl OutputFormat {
    /// Picks the format from the destination's extension; text by default.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl" | "ndjson") => Self::JsonLines,
            _ => Self::Text,
        }
    }
}

/// Formats one record as a text output line, without the newline.
///
/// The title goes out in its URL form so the line stays five
/// space-separated fields.
#[must_use]
pub fn format_line(record: &GeoRankRecord) -> String {
    format!(
        "{} \"{}\" {} {:.10} {}",
        record.id,
        record.name,
        record.title.replace(' ', "_"),
        record.rank,
        record.order
    )
}

fn write_record<W: Write>(out: &mut W, format: OutputFormat, record: &GeoRankRecord) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", format_line(record)),
        OutputFormat::JsonLines => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)
        }
    }
}

/// Writes `records` in order through a bounded queue to `path`.
///
/// # Errors
/// Returns error if the file cannot be created or written.
pub fn write_geo_ranks(path: &Path, records: Vec<GeoRankRecord>, capacity: usize) -> Result<()> {
    let format = OutputFormat::from_path(path);
    info!(path = %path.display(), ?format, records = records.len(), "writing ranked locations");

    let file = File::create(path).map_err(|e| PlaceRankError::io(path, e))?;
    let owned: PathBuf = path.to_path_buf();
    let sink = spawn_sink("geo-writer", capacity, move |rx| {
        let mut out = BufWriter::new(file);
        for record in rx {
            write_record(&mut out, format, &record).map_err(|e| PlaceRankError::io(&owned, e))?;
        }
        out.flush().map_err(|e| PlaceRankError::io(&owned, e))
    })?;

    for record in records {
        sink.send(record)?;
    }
    sink.close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_line_layout() {
        let record = GeoRankRecord {
            id: 1,
            name: "X".into(),
            title: "Page1".into(),
            rank: 0.002,
            order: 5,
        };
        assert_eq!(format_line(&record), "1 \"X\" Page1 0.0020000000 5");
    }

    #[test]
    fn multi_word_title_stays_one_field() {
        let record = GeoRankRecord {
            id: 5_128_581,
            name: "New York City".into(),
            title: "New York City".into(),
            rank: 0.002,
            order: 5,
        };
        let line = format_line(&record);
        assert_eq!(line, "5128581 \"New York City\" New_York_City 0.0020000000 5");
        let after_name = line.rsplit('"').next().unwrap();
        assert_eq!(after_name.split_whitespace().count(), 3);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.txt")), OutputFormat::Text);
        assert_eq!(OutputFormat::from_path(Path::new("out.jsonl")), OutputFormat::JsonLines);
        assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Text);
    }
}
