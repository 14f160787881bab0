// src/dump/mod.rs
//! Adapters turning raw dumps into record streams.

pub mod gazetteer;
pub mod wiki;

pub use gazetteer::read_gazetteer;
pub use wiki::{is_filtered_namespace, Compression, WikiDump};

use crate::error::Result;
use crate::stream::{emit, spawn_producer, Producer};

/// One page of the corpus as it comes out of a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub title: String,
    pub id: u64,
    /// Raw redirect target, anchor included, for redirect pages.
    pub redirect: Option<String>,
    /// Raw page markup.
    pub text: String,
}

impl PageRecord {
    #[must_use]
    pub fn page(id: u64, title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            id,
            redirect: None,
            text: text.to_string(),
        }
    }

    #[must_use]
    pub fn redirect(id: u64, title: &str, target: &str) -> Self {
        Self {
            title: title.to_string(),
            id,
            redirect: Some(target.to_string()),
            text: format!("#REDIRECT [[{target}]]"),
        }
    }

    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.redirect.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// A corpus that can be streamed from the start any number of times.
pub trait PageSource {
    /// Starts a fresh pass over every page, in order.
    ///
    /// # Errors
    /// Returns error if the underlying stream cannot be opened.
    fn open(&self, capacity: usize) -> Result<Producer<PageRecord>>;
}

impl PageSource for Vec<PageRecord> {
    fn open(&self, capacity: usize) -> Result<Producer<PageRecord>> {
        let pages = self.clone();
        spawn_producer("memory-pages", capacity, move |tx| {
            for page in pages {
                emit(tx, page)?;
            }
            Ok(())
        })
    }
}
