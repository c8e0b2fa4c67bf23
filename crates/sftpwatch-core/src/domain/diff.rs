//! Snapshot diff engine
//!
//! Computes the three-way delta between two successive directory snapshots.
//! This is the heart of the watcher and is deliberately a pure function:
//! no I/O, no side effects, fully deterministic given its inputs.

use super::snapshot::Snapshot;

// ============================================================================
// ChangeSet struct
// ============================================================================

/// The triple of disjoint name lists produced by one tick's diff
///
/// Each list is sorted lexicographically so output does not depend on hash
/// map iteration order. A change set is transient: it is published as events
/// and not retained past the tick that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Names present in the current snapshot but not the previous one
    pub created: Vec<String>,
    /// Names present in both snapshots whose modification time moved forward
    pub updated: Vec<String>,
    /// Names present in the previous snapshot but not the current one
    pub deleted: Vec<String>,
}

impl ChangeSet {
    /// Returns true if the tick observed no changes at all
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    /// Total number of changed names across all three lists
    pub fn len(&self) -> usize {
        self.created.len() + self.updated.len() + self.deleted.len()
    }
}

// ============================================================================
// diff()
// ============================================================================

/// Computes the change set between two successive snapshots
///
/// - **created**: every name in `current` that does not appear in `previous`.
/// - **deleted**: every name in `previous` that does not appear in `current`.
/// - **updated**: every name in both whose `modified_at` in `current` is
///   *strictly greater* than in `previous`. Equal or lesser timestamps
///   produce nothing: with polling, only forward progress is observable, so
///   clock regression is silently ignored.
///
/// Name matching is exact string equality. The three lists are pairwise
/// disjoint, and together with the unchanged names they account for every
/// name in `previous` ∪ `current` exactly once.
pub fn diff(previous: &Snapshot, current: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for name in current.names() {
        match previous.modified_at(name) {
            None => changes.created.push(name.to_string()),
            Some(old_mtime) => {
                // Strict inequality: an identical or regressed timestamp
                // is not an update.
                if current.modified_at(name).is_some_and(|new| new > old_mtime) {
                    changes.updated.push(name.to_string());
                }
            }
        }
    }

    for name in previous.names() {
        if !current.contains(name) {
            changes.deleted.push(name.to_string());
        }
    }

    changes.created.sort_unstable();
    changes.updated.sort_unstable();
    changes.deleted.sort_unstable();
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::Entry;
    use std::collections::HashSet;

    fn snapshot(entries: &[(&str, u64)]) -> Snapshot {
        Snapshot::from_entries(entries.iter().map(|(n, m)| Entry::new(*n, *m)).collect())
            .expect("test snapshot must not contain duplicate names")
    }

    #[test]
    fn test_diff_identical_snapshots_is_empty() {
        let snap = snapshot(&[("a", 100), ("b", 200), ("c", 300)]);
        let changes = diff(&snap, &snap);
        assert!(changes.is_empty());
        assert_eq!(changes.len(), 0);
    }

    #[test]
    fn test_diff_both_empty() {
        let changes = diff(&Snapshot::default(), &Snapshot::default());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_diff_created_and_updated() {
        // previous = {a:100, b:100}; current = {a:100, b:200, c:100}
        let previous = snapshot(&[("a", 100), ("b", 100)]);
        let current = snapshot(&[("a", 100), ("b", 200), ("c", 100)]);

        let changes = diff(&previous, &current);
        assert_eq!(changes.created, vec!["c"]);
        assert_eq!(changes.updated, vec!["b"]);
        assert!(changes.deleted.is_empty());
    }

    #[test]
    fn test_diff_deleted() {
        // previous = {a:100, b:100}; current = {a:100}
        let previous = snapshot(&[("a", 100), ("b", 100)]);
        let current = snapshot(&[("a", 100)]);

        let changes = diff(&previous, &current);
        assert!(changes.created.is_empty());
        assert!(changes.updated.is_empty());
        assert_eq!(changes.deleted, vec!["b"]);
    }

    #[test]
    fn test_diff_everything_deleted() {
        let previous = snapshot(&[("a", 1), ("b", 2)]);
        let changes = diff(&previous, &Snapshot::default());
        assert_eq!(changes.deleted, vec!["a", "b"]);
        assert!(changes.created.is_empty());
    }

    #[test]
    fn test_diff_everything_created() {
        let current = snapshot(&[("x", 1), ("y", 2)]);
        let changes = diff(&Snapshot::default(), &current);
        assert_eq!(changes.created, vec!["x", "y"]);
        assert!(changes.deleted.is_empty());
    }

    #[test]
    fn test_diff_strictly_greater_timestamp_is_update() {
        let previous = snapshot(&[("f", 100)]);
        let current = snapshot(&[("f", 101)]);
        assert_eq!(diff(&previous, &current).updated, vec!["f"]);
    }

    #[test]
    fn test_diff_equal_timestamp_is_not_update() {
        let previous = snapshot(&[("f", 100)]);
        let current = snapshot(&[("f", 100)]);
        assert!(diff(&previous, &current).is_empty());
    }

    #[test]
    fn test_diff_regressed_timestamp_is_ignored() {
        // Clock went backwards on the remote; nothing is reported.
        let previous = snapshot(&[("f", 100)]);
        let current = snapshot(&[("f", 50)]);
        assert!(diff(&previous, &current).is_empty());
    }

    #[test]
    fn test_diff_mixed_changes_sorted() {
        let previous = snapshot(&[("keep", 10), ("bump1", 10), ("bump2", 10), ("gone", 10)]);
        let current = snapshot(&[
            ("keep", 10),
            ("bump1", 20),
            ("bump2", 30),
            ("new2", 1),
            ("new1", 1),
        ]);

        let changes = diff(&previous, &current);
        assert_eq!(changes.created, vec!["new1", "new2"]);
        assert_eq!(changes.updated, vec!["bump1", "bump2"]);
        assert_eq!(changes.deleted, vec!["gone"]);
    }

    #[test]
    fn test_diff_sets_are_disjoint_and_cover_union() {
        let previous = snapshot(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let current = snapshot(&[("b", 2), ("c", 9), ("e", 1), ("f", 1)]);

        let changes = diff(&previous, &current);

        let created: HashSet<&String> = changes.created.iter().collect();
        let updated: HashSet<&String> = changes.updated.iter().collect();
        let deleted: HashSet<&String> = changes.deleted.iter().collect();

        assert!(created.is_disjoint(&updated));
        assert!(created.is_disjoint(&deleted));
        assert!(updated.is_disjoint(&deleted));

        // Every changed name belongs to the union of the two snapshots, and
        // every name in the union is either changed or unchanged in place.
        let union: HashSet<String> = previous
            .names()
            .chain(current.names())
            .map(str::to_string)
            .collect();
        for name in created.iter().chain(&updated).chain(&deleted) {
            assert!(union.contains(name.as_str()));
        }
        let changed = changes.len();
        let unchanged = union
            .iter()
            .filter(|n| {
                previous.contains(n)
                    && current.contains(n)
                    && !updated.contains(&n.to_string())
            })
            .count();
        assert_eq!(changed + unchanged, union.len());
    }
}
