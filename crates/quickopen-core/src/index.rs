//! The directory index: path collection plus character map.

use crate::charmap::CharIndex;
use crate::matcher::match_basename;
use crate::score::{mtime_or_epoch, rank, score, SearchMatch};
use crate::walker::{IgnoreRules, IndexedPath, Walker};
use crate::IndexError;
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

/// A complete snapshot of the indexable files under one root.
///
/// Built wholesale by a rescan and replaced atomically; searches only
/// ever see a fully built snapshot.
#[derive(Debug, Default)]
pub struct DirectoryIndex {
    paths: Vec<IndexedPath>,
    chars: Option<CharIndex>,
}

impl DirectoryIndex {
    /// Walk `root` and build a fresh index from scratch.
    pub fn build(root: &Path, rules: &IgnoreRules) -> Result<Self, IndexError> {
        let paths = Walker::new(root, rules.clone()).collect()?;
        let chars = CharIndex::build(&paths);
        debug!(
            root = %root.display(),
            files = paths.len(),
            chars = chars.len(),
            "index built"
        );
        Ok(Self {
            paths,
            chars: Some(chars),
        })
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The indexed paths, in walk order.
    pub fn paths(&self) -> &[IndexedPath] {
        &self.paths
    }

    /// Run a query against the snapshot and return ranked matches.
    ///
    /// The character map pre-narrows candidates when available;
    /// otherwise every path is scanned. An empty query yields an empty
    /// result set.
    pub fn search(&self, query: &str, now: SystemTime) -> Vec<SearchMatch> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches = Vec::new();
        let mut consider = |indexed: &IndexedPath| {
            if let Some(positions) = match_basename(&indexed.basename, query) {
                let mtime = mtime_or_epoch(&indexed.path);
                matches.push(SearchMatch {
                    path: indexed.path.clone(),
                    basename: indexed.basename.clone(),
                    score: score(&positions, mtime, now),
                });
            }
        };

        match &self.chars {
            Some(chars) => {
                let mut candidates: Vec<usize> = chars.narrow(query).into_iter().collect();
                // Stable candidate order so ranking ties stay deterministic.
                candidates.sort_unstable();
                for i in candidates {
                    consider(&self.paths[i]);
                }
            }
            None => {
                for indexed in &self.paths {
                    consider(indexed);
                }
            }
        }

        rank(&mut matches);
        matches
    }
}
