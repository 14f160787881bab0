// src/graph/index.rs
use std::collections::HashMap;

/// Title and alias lookup used while the graph is under construction.
///
/// Maps every page title, and every resolved redirect title, to a position
/// in the builder's node list. Later insertions for the same title replace
/// earlier ones.
#[derive(Debug, Default)]
pub struct TitleIndex {
    entries: HashMap<String, usize>,
}

impl TitleIndex {
    /// Points `title` at `node`, returning the node it previously pointed at.
    pub fn insert(&mut self, title: &str, node: usize) -> Option<usize> {
        self.entries.insert(title.to_string(), node)
    }

    #[must_use]
    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.entries.get(title).copied()
    }

    /// Number of titles and aliases indexed.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::TitleIndex;

    #[test]
    fn later_insert_replaces_earlier() {
        let mut index = TitleIndex::default();
        assert_eq!(index.insert("Dup", 0), None);
        assert_eq!(index.insert("Dup", 3), Some(0));
        index.insert("Alias", 3);
        assert_eq!(index.resolve("Dup"), Some(3));
        assert_eq!(index.resolve("Alias"), Some(3));
        assert_eq!(index.resolve("dup"), None);
        assert_eq!(index.len(), 2);
    }
}
