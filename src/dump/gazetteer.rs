// src/dump/gazetteer.rs
//! Line-oriented extraction of wiki-linked entries from a geonames RDF dump.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::error::{PlaceRankError, Result};
use crate::stream::{emit, spawn_producer, Producer};
use crate::types::GeoEntry;

static WIKI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<gn:wikipediaArticle rdf:resource="http://en\.wikipedia\.org/wiki/([^"]+)""#)
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<gn:name>([^<]+)<").unwrap_or_else(|_| panic!("Invalid Regex")));
static ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"rdf:about="http://sws\.geonames\.org/(\d+)/""#)
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Turns the URL path segment of an article link into a page title.
#[must_use]
pub fn title_from_url_segment(segment: &str) -> String {
    let decoded = urlencoding::decode(segment)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string());
    decoded.replace('_', " ")
}

/// Extracts a gazetteer entry from one dump line.
///
/// Lines without an English article link yield `None`. A linked line
/// missing its name or id is malformed.
///
/// # Errors
/// Returns a `Decode` error for malformed linked lines.
pub fn parse_line(line: &str, path: &Path, line_no: usize) -> Result<Option<GeoEntry>> {
    let Some(wiki) = WIKI_RE.captures(line) else {
        return Ok(None);
    };
    let name = NAME_RE
        .captures(line)
        .ok_or_else(|| PlaceRankError::decode(path, format!("line {line_no}: entry has no name")))?;
    let id = ID_RE
        .captures(line)
        .ok_or_else(|| PlaceRankError::decode(path, format!("line {line_no}: entry has no id")))?;
    let id = id[1]
        .parse::<u64>()
        .map_err(|e| PlaceRankError::decode(path, format!("line {line_no}: bad id: {e}")))?;

    Ok(Some(GeoEntry {
        id,
        name: name[1].to_string(),
        title: title_from_url_segment(&wiki[1]),
    }))
}

/// Streams gazetteer entries from a geonames RDF dump.
///
/// # Errors
/// Returns error if the dump cannot be opened. Read and decode errors
/// surface when the producer is drained.
pub fn read_gazetteer(path: &Path, capacity: usize) -> Result<Producer<GeoEntry>> {
    let file = File::open(path).map_err(|e| PlaceRankError::io(path, e))?;
    let owned: PathBuf = path.to_path_buf();
    info!(path = %owned.display(), "reading gazetteer dump");
    spawn_producer("gazetteer-dump", capacity, move |tx| {
        let mut found = 0u64;
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| PlaceRankError::io(&owned, e))?;
            if let Some(entry) = parse_line(&line, &owned, i + 1)? {
                found += 1;
                emit(tx, entry)?;
            }
        }
        info!(found, "locations with wiki links");
        Ok(())
    })
}
