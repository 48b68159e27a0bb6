//! Shared tag → paths aggregation for the concurrent fan-out stage.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// The tag index being built during a run.
///
/// Concurrently completing documents merge through a mutex, so each tag's
/// path list gains exactly one entry per document that declared it, whatever
/// order the fetches finish in. The lock is never held across an await.
#[derive(Debug, Default)]
pub struct TagIndex {
    inner: Mutex<BTreeMap<String, Vec<String>>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` under every tag in `tags`, creating entries as needed.
    pub fn merge(&self, path: &str, tags: &[String]) {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for tag in tags {
            map.entry(tag.clone()).or_default().push(path.to_string());
        }
    }

    /// Number of distinct tags seen so far.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finalize into a plain map. Each path list is sorted so that two runs
    /// over the same tree serialize identically, regardless of the order
    /// the concurrent fetches completed in.
    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        let mut map = self
            .inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        for paths in map.values_mut() {
            paths.sort();
        }
        map
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
