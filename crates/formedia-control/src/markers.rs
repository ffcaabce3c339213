//! Loaded-marker cache
//!
//! The host keeps a page-wide cache of "already loaded" markers so that
//! one-time setup (like attaching the delegated media change listener) runs
//! at most once no matter how many media fields the page holds. This is the
//! explicit, injectable form of that cache: a plain append-only set with a
//! `has`/`add` contract, owned by the page environment rather than hiding
//! in a global.

use std::collections::HashSet;

/// Append-only set of setup markers for one page.
#[derive(Debug, Clone, Default)]
pub struct LoadedMarkers {
    entries: HashSet<String>,
}

impl LoadedMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, marker: &str) -> bool {
        self.entries.contains(marker)
    }

    /// Add a marker. Returns `false` when it was already present.
    pub fn add(&mut self, marker: impl Into<String>) -> bool {
        self.entries.insert(marker.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut markers = LoadedMarkers::new();
        assert!(!markers.has("controlMediaEmbedded"));
        assert!(markers.add("controlMediaEmbedded"));
        assert!(!markers.add("controlMediaEmbedded"));
        assert!(markers.has("controlMediaEmbedded"));
        assert_eq!(markers.len(), 1);
    }
}
