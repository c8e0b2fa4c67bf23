//! Directory snapshot - immutable-per-tick record of one listing

use std::collections::HashMap;

use super::entry::Entry;
use super::errors::DomainError;

// ============================================================================
// Snapshot struct
// ============================================================================

/// The full set of directory entries observed at one poll tick
///
/// Entries are indexed by name so the diff engine's "does this name exist in
/// the other snapshot" lookups are O(1). Once built, a snapshot is never
/// mutated; each tick replaces the previous snapshot wholesale.
///
/// ## Invariant
///
/// No two entries share a name. [`Snapshot::from_entries`] enforces this by
/// rejecting listings with duplicate (or malformed) names, which in turn
/// rejects the tick that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Entry modification times keyed by entry name
    entries: HashMap<String, u64>,
}

impl Snapshot {
    /// Builds a snapshot from a raw listing
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateEntryName`] if two entries share a
    /// name, or [`DomainError::InvalidEntryName`] if a name is empty or
    /// contains a `/` (the watcher covers a single flat directory level).
    pub fn from_entries(listing: Vec<Entry>) -> Result<Self, DomainError> {
        let mut entries = HashMap::with_capacity(listing.len());
        for entry in listing {
            if entry.name.is_empty() || entry.name.contains('/') {
                return Err(DomainError::InvalidEntryName(entry.name));
            }
            if entries.insert(entry.name.clone(), entry.modified_at).is_some() {
                return Err(DomainError::DuplicateEntryName(entry.name));
            }
        }
        Ok(Self { entries })
    }

    /// Returns the modification time recorded for `name`, if present
    pub fn modified_at(&self, name: &str) -> Option<u64> {
        self.entries.get(name).copied()
    }

    /// Returns true if an entry with the given name was observed
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over the entry names in this snapshot (unspecified order)
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries in this snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the directory was empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(entries: &[(&str, u64)]) -> Vec<Entry> {
        entries.iter().map(|(n, m)| Entry::new(*n, *m)).collect()
    }

    #[test]
    fn test_from_entries_empty() {
        let snap = Snapshot::from_entries(Vec::new()).unwrap();
        assert!(snap.is_empty());
        assert_eq!(snap.len(), 0);
    }

    #[test]
    fn test_from_entries_indexes_by_name() {
        let snap = Snapshot::from_entries(listing(&[("a.txt", 100), ("b.txt", 200)])).unwrap();
        assert_eq!(snap.len(), 2);
        assert!(snap.contains("a.txt"));
        assert_eq!(snap.modified_at("b.txt"), Some(200));
        assert_eq!(snap.modified_at("missing.txt"), None);
    }

    #[test]
    fn test_from_entries_rejects_duplicate_name() {
        let err = Snapshot::from_entries(listing(&[("a.txt", 100), ("a.txt", 200)])).unwrap_err();
        assert_eq!(err, DomainError::DuplicateEntryName("a.txt".to_string()));
    }

    #[test]
    fn test_from_entries_rejects_empty_name() {
        let err = Snapshot::from_entries(listing(&[("", 100)])).unwrap_err();
        assert_eq!(err, DomainError::InvalidEntryName(String::new()));
    }

    #[test]
    fn test_from_entries_rejects_path_separator() {
        let err = Snapshot::from_entries(listing(&[("sub/file.txt", 100)])).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidEntryName("sub/file.txt".to_string())
        );
    }

    #[test]
    fn test_names_iterates_all_entries() {
        let snap = Snapshot::from_entries(listing(&[("a", 1), ("b", 2), ("c", 3)])).unwrap();
        let mut names: Vec<&str> = snap.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
