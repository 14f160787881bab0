// src/dump/wiki.rs
//! Streaming reader for MediaWiki XML page dumps.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use bzip2::read::MultiBzDecoder;
use crossbeam_channel::Sender;
use flate2::read::MultiGzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use tracing::info;

use super::{PageRecord, PageSource};
use crate::error::{PlaceRankError, Result};
use crate::stream::{emit, spawn_producer, Producer};

/// Pages in these namespaces never enter the graph.
static NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "^(File|Talk|Special|Wikipedia|Wiktionary|User|User Talk|Category|Portal|Template|Mediawiki|Help|Draft):",
    )
    .unwrap_or_else(|_| panic!("Invalid Regex"))
});

const PROGRESS_EVERY: u64 = 100_000;

/// True if `title` belongs to an excluded namespace.
#[must_use]
pub fn is_filtered_namespace(title: &str) -> bool {
    NAMESPACE_RE.is_match(title)
}

/// How a dump file is compressed, judged by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Bzip2,
    Gzip,
}

impl Compression {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bz2") => Self::Bzip2,
            Some("gz") => Self::Gzip,
            _ => Self::None,
        }
    }

    fn wrap(self, file: File) -> Box<dyn Read + Send> {
        match self {
            Self::None => Box::new(file),
            Self::Bzip2 => Box::new(MultiBzDecoder::new(file)),
            Self::Gzip => Box::new(MultiGzDecoder::new(file)),
        }
    }
}

/// A MediaWiki XML dump on disk, plain or compressed with bzip2 or gzip.
#[derive(Debug, Clone)]
pub struct WikiDump {
    path: PathBuf,
}

impl WikiDump {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl PageSource for WikiDump {
    fn open(&self, capacity: usize) -> Result<Producer<PageRecord>> {
        let file = File::open(&self.path).map_err(|e| PlaceRankError::io(&self.path, e))?;
        let path = self.path.clone();
        let compression = Compression::from_path(&path);
        info!(path = %path.display(), ?compression, "reading page dump");
        spawn_producer("wiki-dump", capacity, move |tx| {
            let mut reader = Reader::from_reader(BufReader::new(compression.wrap(file)));
            read_pages(&mut reader, &path, tx)
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Id,
    Text,
    Other,
}

fn field_of(stack: &[Vec<u8>]) -> Field {
    match stack {
        [.., page, leaf] if page.as_slice() == b"page" && leaf.as_slice() == b"title" => Field::Title,
        [.., page, leaf] if page.as_slice() == b"page" && leaf.as_slice() == b"id" => Field::Id,
        [.., page, rev, leaf]
            if page.as_slice() == b"page"
                && rev.as_slice() == b"revision"
                && leaf.as_slice() == b"text" =>
        {
            Field::Text
        }
        _ => Field::Other,
    }
}

#[derive(Default)]
struct PartialPage {
    title: String,
    id: String,
    redirect: Option<String>,
    text: String,
}

impl PartialPage {
    fn push(&mut self, field: Field, content: &str) {
        match field {
            Field::Title => self.title.push_str(content),
            Field::Id => self.id.push_str(content),
            Field::Text => self.text.push_str(content),
            Field::Other => {}
        }
    }

    fn finish(self, path: &Path) -> Result<PageRecord> {
        let id = self.id.trim().parse::<u64>().map_err(|e| {
            PlaceRankError::decode(path, format!("page '{}' has bad id '{}': {e}", self.title, self.id))
        })?;
        Ok(PageRecord {
            title: self.title,
            id,
            redirect: self.redirect,
            text: self.text,
        })
    }
}

fn redirect_target(start: &BytesStart<'_>, path: &Path) -> Result<Option<String>> {
    let attr = start
        .try_get_attribute("title")
        .map_err(|e| PlaceRankError::decode(path, e.to_string()))?;
    attr.map(|a| {
        a.unescape_value()
            .map(|v| v.into_owned())
            .map_err(|e| PlaceRankError::decode(path, e.to_string()))
    })
    .transpose()
}

fn read_pages<R: BufRead>(
    reader: &mut Reader<R>,
    path: &Path,
    tx: &Sender<PageRecord>,
) -> Result<()> {
    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut page: Option<PartialPage> = None;
    let mut count = 0u64;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            PlaceRankError::decode(path, format!("at byte {}: {e}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(start) => {
                let name = start.local_name().as_ref().to_vec();
                if name.as_slice() == b"page" {
                    page = Some(PartialPage::default());
                } else if name.as_slice() == b"redirect" {
                    if let Some(p) = page.as_mut() {
                        p.redirect = redirect_target(&start, path)?;
                    }
                }
                stack.push(name);
            }
            Event::Empty(start) => {
                if start.local_name().as_ref() == b"redirect" {
                    if let Some(p) = page.as_mut() {
                        p.redirect = redirect_target(&start, path)?;
                    }
                }
            }
            Event::Text(text) => {
                if let Some(p) = page.as_mut() {
                    let content = text
                        .unescape()
                        .map_err(|e| PlaceRankError::decode(path, e.to_string()))?;
                    p.push(field_of(&stack), &content);
                }
            }
            Event::CData(data) => {
                if let Some(p) = page.as_mut() {
                    p.push(field_of(&stack), &String::from_utf8_lossy(&data));
                }
            }
            Event::End(end) => {
                stack.pop();
                if end.local_name().as_ref() == b"page" {
                    if let Some(done) = page.take() {
                        let record = done.finish(path)?;
                        if !is_filtered_namespace(&record.title) {
                            count += 1;
                            if count % PROGRESS_EVERY == 0 {
                                info!(pages = count, "dump progress");
                            }
                            emit(tx, record)?;
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    info!(pages = count, "finished reading dump");
    Ok(())
}
