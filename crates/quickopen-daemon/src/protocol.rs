//! Line-oriented request protocol.
//!
//! One request per input line. `setroot <path>` changes the indexed
//! root; `search <query>` runs a search; any other non-empty line is
//! treated directly as a search query. Responses to a search are one
//! `<basename>|<absolute path>|<score>` line per match followed by a
//! blank terminator line.

use quickopen_core::SearchMatch;
use std::path::PathBuf;

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Change the indexed root and rescan
    SetRoot(PathBuf),
    /// Run a search query
    Search(String),
}

impl Request {
    /// Parse one input line. Blank lines carry no request.
    ///
    /// Only line endings are stripped before matching, so `search `
    /// with nothing after stays an empty query rather than becoming a
    /// bare-line search for the word "search".
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }
        if let Some(path) = line.strip_prefix("setroot ") {
            return Some(Request::SetRoot(PathBuf::from(path.trim())));
        }
        if let Some(query) = line.strip_prefix("search ") {
            return Some(Request::Search(query.to_string()));
        }
        // Simplest variant: a bare line is a query.
        Some(Request::Search(line.trim().to_string()))
    }
}

/// Render one result line for a match.
pub fn format_match(m: &SearchMatch) -> String {
    format!("{}|{}|{}", m.basename, m.path.display(), m.score)
}
