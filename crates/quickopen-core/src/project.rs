//! The project: one indexed root and its lifecycle.
//!
//! Owns the current [`DirectoryIndex`] and the rescan scheduling state.
//! All mutation goes through explicit lifecycle calls; the index is
//! rebuilt aside and swapped in whole, never edited in place.

use crate::index::DirectoryIndex;
use crate::lifecycle::{Lifecycle, LifecycleState, RescanDecision};
use crate::score::SearchMatch;
use crate::walker::IgnoreRules;
use crate::IndexError;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{info, warn};

/// A single indexed root directory and its search lifecycle.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    rules: IgnoreRules,
    index: Option<DirectoryIndex>,
    lifecycle: Lifecycle,
}

impl Project {
    /// Open a project rooted at `root` (default: the current working
    /// directory) and perform the initial scan.
    ///
    /// With no prior index to fall back on, an inaccessible root is an
    /// error here.
    pub fn open(root: Option<PathBuf>, rules: IgnoreRules) -> Result<Self, IndexError> {
        let root = match root {
            Some(path) => normalize_root(&path)?,
            None => std::env::current_dir()?,
        };
        let mut project = Self {
            root,
            rules,
            index: None,
            lifecycle: Lifecycle::new(),
        };
        project.rescan()?;
        Ok(project)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of files in the current index, if one exists.
    pub fn indexed_files(&self) -> usize {
        self.index.as_ref().map_or(0, DirectoryIndex::len)
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Change the indexed root, forcing an immediate synchronous
    /// rescan; the whole index is invalid otherwise.
    ///
    /// On failure the previous root and index are both retained, so
    /// searches keep serving stale-but-valid results.
    pub fn set_root(&mut self, path: &Path) -> Result<(), IndexError> {
        let root = normalize_root(path)?;
        self.lifecycle.begin_rescan();
        let result = DirectoryIndex::build(&root, &self.rules);
        self.lifecycle.finish_rescan();
        let index = result?;
        info!(root = %root.display(), files = index.len(), "root changed");
        self.root = root;
        self.index = Some(index);
        Ok(())
    }

    /// Handle an external rescan trigger per the lifecycle transition
    /// table: run now when idle, defer while searching, coalesce while
    /// already rescanning.
    pub fn request_rescan(&mut self) -> Result<RescanDecision, IndexError> {
        let decision = self.lifecycle.request_rescan();
        if decision == RescanDecision::RunNow {
            self.rescan()?;
        }
        Ok(decision)
    }

    /// Mark a search as in flight; rescan requests defer until
    /// [`Project::finish_search`].
    pub fn begin_search(&mut self) {
        self.lifecycle.begin_search();
    }

    /// Run a query against the current index snapshot.
    pub fn run_search(&self, query: &str) -> Vec<SearchMatch> {
        match &self.index {
            Some(index) => index.search(query, SystemTime::now()),
            None => Vec::new(),
        }
    }

    /// Complete the in-flight search and run any deferred rescan.
    ///
    /// A failed deferred rescan keeps the prior index and is reported
    /// to the caller.
    pub fn finish_search(&mut self) -> Result<(), IndexError> {
        if self.lifecycle.finish_search() {
            self.rescan()?;
        }
        Ok(())
    }

    /// Full re-walk and re-index of the current root. The new index is
    /// built aside and swapped in whole; on failure the prior one
    /// stays intact.
    fn rescan(&mut self) -> Result<(), IndexError> {
        self.lifecycle.begin_rescan();
        let result = DirectoryIndex::build(&self.root, &self.rules);
        self.lifecycle.finish_rescan();
        match result {
            Ok(index) => {
                info!(root = %self.root.display(), files = index.len(), "rescan complete");
                self.index = Some(index);
                Ok(())
            }
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "rescan failed, keeping prior index");
                Err(e)
            }
        }
    }
}

/// Expand a root path to absolute form, stripping a single trailing
/// slash the way interactive callers tend to provide it.
fn normalize_root(path: &Path) -> Result<PathBuf, IndexError> {
    let mut text = path.to_string_lossy().into_owned();
    if text.len() > 1 && text.ends_with('/') {
        text.pop();
    }
    let path = PathBuf::from(text);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
