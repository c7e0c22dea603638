//! Character occurrence index over basenames.
//!
//! Maps each lowercase character to the set of paths whose basename
//! contains it, so a query can be narrowed to candidate paths before
//! the matcher runs. Purely an optimization: narrowing never excludes
//! a path that contains every query character.

use crate::matcher::fold;
use crate::walker::IndexedPath;
use std::collections::{HashMap, HashSet};

/// Mapping from lowercase character to indices into the path vector.
///
/// Rebuilt from empty in lockstep with the path collection; never
/// mutated incrementally.
#[derive(Debug, Default)]
pub struct CharIndex {
    map: HashMap<char, HashSet<usize>>,
}

impl CharIndex {
    /// Build the index for a path collection.
    ///
    /// Characters are folded with the matcher's fold, not full string
    /// lowercasing, so a query character the matcher would accept is
    /// always present here under the same key.
    pub fn build(paths: &[IndexedPath]) -> Self {
        let mut map: HashMap<char, HashSet<usize>> = HashMap::new();
        for (i, indexed) in paths.iter().enumerate() {
            for c in indexed.basename.chars().map(fold) {
                map.entry(c).or_default().insert(i);
            }
        }
        Self { map }
    }

    /// Candidate paths whose basenames contain every query character.
    ///
    /// Intersects the per-character sets; any character with no entries
    /// empties the result.
    pub fn narrow(&self, query: &str) -> HashSet<usize> {
        let mut chars = query.chars().map(fold).collect::<Vec<_>>();
        chars.sort_unstable();
        chars.dedup();

        let mut chars = chars.into_iter();
        let Some(first) = chars.next() else {
            return HashSet::new();
        };
        let mut result = match self.map.get(&first) {
            Some(set) => set.clone(),
            None => return HashSet::new(),
        };
        for c in chars {
            match self.map.get(&c) {
                Some(set) => result.retain(|i| set.contains(i)),
                None => return HashSet::new(),
            }
            if result.is_empty() {
                break;
            }
        }
        result
    }

    /// Number of distinct characters indexed.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn paths(names: &[&str]) -> Vec<IndexedPath> {
        names
            .iter()
            .map(|n| IndexedPath::new(PathBuf::from(format!("/root/{n}"))).unwrap())
            .collect()
    }

    #[test]
    fn test_build_indexes_every_basename_char() {
        let paths = paths(&["foo.rb"]);
        let index = CharIndex::build(&paths);
        for c in ['f', 'o', '.', 'r', 'b'] {
            assert_eq!(index.narrow(&c.to_string()), HashSet::from([0]));
        }
        assert!(index.narrow("z").is_empty());
    }

    #[test]
    fn test_build_lowercases_basenames() {
        let paths = paths(&["README"]);
        let index = CharIndex::build(&paths);
        assert_eq!(index.narrow("r"), HashSet::from([0]));
        assert_eq!(index.narrow("R"), HashSet::from([0]));
    }

    #[test]
    fn test_narrow_intersects_characters() {
        let paths = paths(&["foo.txt", "bar.txt", "fab.txt"]);
        let index = CharIndex::build(&paths);
        // 'f' in foo and fab, 'b' in bar and fab.
        assert_eq!(index.narrow("fb"), HashSet::from([2]));
    }

    #[test]
    fn test_narrow_no_false_negatives() {
        let paths = paths(&["bar_foo.rb", "zz.foo.bak", "foo.txt"]);
        let index = CharIndex::build(&paths);
        let candidates = index.narrow("foo");
        // Every basename containing f and o must survive narrowing.
        assert_eq!(candidates, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn test_narrow_empty_query() {
        let index = CharIndex::build(&paths(&["foo.txt"]));
        assert!(index.narrow("").is_empty());
    }

    #[test]
    fn test_narrow_folds_like_the_matcher() {
        // Turkish dotted capital I lowercases to two chars under full
        // string lowercasing; the index must fold it to plain 'i' the
        // way the matcher does, in both directions.
        let paths = paths(&["i.txt", "\u{130}stanbul.txt"]);
        let index = CharIndex::build(&paths);
        assert!(index.narrow("\u{130}").contains(&0));
        assert!(index.narrow("i").contains(&1));
    }

    #[test]
    fn test_narrow_repeated_query_chars() {
        let paths = paths(&["odo"]);
        let index = CharIndex::build(&paths);
        // Occurrence counts are not tracked, only presence.
        assert_eq!(index.narrow("ooo"), HashSet::from([0]));
    }

    #[test]
    fn test_rebuild_reflects_new_collection() {
        let first = CharIndex::build(&paths(&["aaa"]));
        assert!(!first.narrow("a").is_empty());
        let second = CharIndex::build(&paths(&["bbb"]));
        assert!(second.narrow("a").is_empty());
        assert!(!second.narrow("b").is_empty());
    }
}
