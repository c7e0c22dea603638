//! Match scoring and result ranking.
//!
//! The rank of a match is its gap score (characters skipped between
//! consecutive matched positions) plus the file's age in days, so a
//! tighter match always beats a looser one and, among equally tight
//! matches, the more recently modified file wins. Lower is better.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A ranked search result.
#[derive(Debug, Clone)]
pub struct SearchMatch {
    /// Absolute path of the matched file
    pub path: PathBuf,
    /// Cached basename, as indexed
    pub basename: String,
    /// Combined gap + recency score; lower ranks first
    pub score: f64,
}

/// Total characters skipped between consecutive matched positions.
///
/// Zero for a fully contiguous match.
pub fn gap_score(positions: &[usize]) -> usize {
    positions.windows(2).map(|w| w[1] - w[0] - 1).sum()
}

/// Combine the gap score with the file's age in days.
///
/// An mtime in the future contributes zero age rather than going
/// negative.
pub fn score(positions: &[usize], mtime: SystemTime, now: SystemTime) -> f64 {
    let age_days = now
        .duration_since(mtime)
        .unwrap_or_default()
        .as_secs_f64()
        / SECONDS_PER_DAY;
    gap_score(positions) as f64 + age_days
}

/// Read a file's modification time at scoring time.
///
/// A file deleted between indexing and scoring yields the epoch
/// sentinel, ranking it as very old instead of failing the search.
pub fn mtime_or_epoch(path: &Path) -> SystemTime {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(mtime) => mtime,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "stat failed, using epoch sentinel");
            UNIX_EPOCH
        }
    }
}

/// Sort matches ascending by score.
///
/// The sort is stable; equal scores keep their incoming order.
pub fn rank(matches: &mut [SearchMatch]) {
    matches.sort_by(|a, b| a.score.total_cmp(&b.score));
}
