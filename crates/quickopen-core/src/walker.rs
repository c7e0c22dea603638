//! Recursive path collector with ignore rules.
//!
//! Walks a root directory and produces the flat set of indexed file
//! paths, pruning version-control and build-cache directories and
//! excluding editor artifacts by basename pattern.

use crate::IndexError;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file admitted into the index.
///
/// The modification time is deliberately not cached here: it is read at
/// scoring time, since files may change between scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPath {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Final path component, cached for matching and output
    pub basename: String,
}

impl IndexedPath {
    /// Build an entry from a path, deriving the basename.
    ///
    /// Returns `None` for paths without a UTF-8 final component.
    pub fn new(path: PathBuf) -> Option<Self> {
        let basename = path.file_name()?.to_str()?.to_string();
        Some(Self { path, basename })
    }
}

/// Directory and file exclusion rules applied during collection.
///
/// The defaults cover common version-control and editor artifacts; the
/// directory list can be replaced for callers that need a different set.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    ignored_dirs: Vec<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            ignored_dirs: [".git", ".svn", ".hg", ".bzr", "CVS", "_build", "_darcs"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl IgnoreRules {
    /// Rules with a custom ignored-directory list.
    pub fn with_dirs<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored_dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a directory with this basename is pruned entirely.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }

    /// Whether a file with this basename is excluded from the index.
    ///
    /// Covers backup files (`foo~`), editor swap files (`#foo#`,
    /// `.foo.swp`, `_foo.swp`) and core dumps (`core.1234`).
    pub fn is_ignored_file(&self, name: &str) -> bool {
        if name.ends_with('~') {
            return true;
        }
        if name.len() >= 2 && name.starts_with('#') && name.ends_with('#') {
            return true;
        }
        if let Some(digits) = name.strip_prefix("core.") {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return true;
            }
        }
        if (name.starts_with('.') || name.starts_with('_')) && name.ends_with(".swp") {
            return true;
        }
        false
    }
}

/// Recursive directory walker producing the indexable file set.
pub struct Walker {
    root: PathBuf,
    rules: IgnoreRules,
}

impl Walker {
    pub fn new(root: &Path, rules: IgnoreRules) -> Self {
        Self {
            root: root.to_path_buf(),
            rules,
        }
    }

    /// Walk the tree and collect every indexable file.
    ///
    /// Fails only if the root itself cannot be read; unreadable
    /// subtrees are logged and skipped. The result order carries no
    /// meaning, downstream ranking imposes its own.
    pub fn collect(&self) -> Result<Vec<IndexedPath>, IndexError> {
        // Probe the root up front so its inaccessibility is surfaced
        // instead of being swallowed like any other walk error.
        std::fs::read_dir(&self.root).map_err(|source| IndexError::RootInaccessible {
            path: self.root.clone(),
            source,
        })?;

        let rules = self.rules.clone();
        let walk = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().map_or(false, |ft| ft.is_dir());
                if !is_dir {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .map_or(true, |name| !rules.is_ignored_dir(name))
            })
            .build();

        let mut paths = Vec::new();
        for result in walk {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    // Permissions or a race with deletion; skip the subtree.
                    debug!(error = %e, "walk error, subtree skipped");
                    continue;
                }
            };

            // Regular files only: symlinks and special files are excluded.
            if !entry.file_type().map_or(false, |ft| ft.is_file()) {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if self.rules.is_ignored_file(name) {
                continue;
            }
            if let Some(indexed) = IndexedPath::new(entry.into_path()) {
                paths.push(indexed);
            }
        }

        Ok(paths)
    }
}
