//! Quickopen Core
//!
//! This crate provides the indexing and search engine for the
//! quickopen daemon, including:
//! - Recursive path collection with ignore rules
//! - A character occurrence index for candidate narrowing
//! - Boundary-anchored fuzzy subsequence matching
//! - Gap + recency scoring and ranking
//! - The rescan scheduling lifecycle

mod charmap;
mod error;
mod index;
mod lifecycle;
mod matcher;
mod project;
mod score;
mod walker;

pub use charmap::CharIndex;
pub use error::IndexError;
pub use index::DirectoryIndex;
pub use lifecycle::{Lifecycle, LifecycleState, RescanDecision};
pub use matcher::match_basename;
pub use project::Project;
pub use score::{gap_score, score, SearchMatch};
pub use walker::{IgnoreRules, IndexedPath, Walker};
