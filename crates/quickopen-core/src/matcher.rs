//! Boundary-anchored subsequence matcher.
//!
//! Determines whether a query occurs in a basename as an ordered,
//! possibly non-contiguous character subsequence, case-insensitively.
//! The first query character must sit at a word boundary: the start of
//! the basename, or immediately after a `.` or `_` separator. Each
//! following character is taken at the earliest position after the
//! previous match (leftmost, lazy), so recorded positions describe the
//! shortest span from that anchor.
//!
//! Implemented as an explicit linear scan rather than a pattern engine
//! so the anchoring and gap accounting stay directly auditable.

/// Lowercase a char without changing its position accounting.
///
/// Uses the first char of the full lowercase mapping; multi-char
/// expansions are irrelevant for equality against a likewise-folded
/// query character. The character index folds with this same function
/// so narrowing and matching always agree on equality.
pub(crate) fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn is_separator(c: char) -> bool {
    c == '.' || c == '_'
}

/// Match `query` against `basename`.
///
/// Returns the char offset of each matched query character, or `None`
/// when the query is empty, longer than the basename, or not present
/// as a boundary-anchored ordered subsequence.
pub fn match_basename(basename: &str, query: &str) -> Option<Vec<usize>> {
    let haystack: Vec<char> = basename.chars().map(fold).collect();
    let needle: Vec<char> = query.chars().map(fold).collect();

    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    // Earliest boundary-anchored occurrence of the first query char.
    let first = haystack.iter().enumerate().position(|(i, &c)| {
        c == needle[0] && (i == 0 || is_separator(haystack[i - 1]))
    })?;

    let mut positions = Vec::with_capacity(needle.len());
    positions.push(first);
    let mut cursor = first + 1;

    for &qc in &needle[1..] {
        let found = haystack[cursor..].iter().position(|&c| c == qc)?;
        let at = cursor + found;
        positions.push(at);
        cursor = at + 1;
    }

    Some(positions)
}
