//! Typed change events delivered to watcher subscribers
//!
//! A closed set of event kinds replaces the dynamic string-keyed listener
//! pattern: subscribers match on an enum instead of registering named
//! callbacks, and stopping the watcher is a separate control operation
//! ([`SftpWatcher::stop`](crate::SftpWatcher::stop)) rather than a
//! pseudo-event mixed into the data channel.

use sftpwatch_core::domain::ChangeSet;

// ============================================================================
// FileEvent enum
// ============================================================================

/// One observed change to the watched directory
///
/// The payload is the entry name only; callers that need more re-fetch
/// through their own session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    /// An entry appeared that was not in the previous snapshot
    Created(String),
    /// An entry's modification time moved strictly forward
    Updated(String),
    /// An entry from the previous snapshot is gone
    Deleted(String),
}

impl FileEvent {
    /// Returns the entry name this event refers to
    pub fn name(&self) -> &str {
        match self {
            FileEvent::Created(name) => name,
            FileEvent::Updated(name) => name,
            FileEvent::Deleted(name) => name,
        }
    }

    /// Flattens one tick's change set into events in publication order
    ///
    /// The order is fixed: all created, then all updated, then all deleted.
    pub fn from_change_set(changes: &ChangeSet) -> Vec<FileEvent> {
        let mut events = Vec::with_capacity(changes.len());
        events.extend(changes.created.iter().cloned().map(FileEvent::Created));
        events.extend(changes.updated.iter().cloned().map(FileEvent::Updated));
        events.extend(changes.deleted.iter().cloned().map(FileEvent::Deleted));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name() {
        assert_eq!(FileEvent::Created("a.txt".to_string()).name(), "a.txt");
        assert_eq!(FileEvent::Updated("b.txt".to_string()).name(), "b.txt");
        assert_eq!(FileEvent::Deleted("c.txt".to_string()).name(), "c.txt");
    }

    #[test]
    fn test_event_equality() {
        let a = FileEvent::Created("a.txt".to_string());
        let b = FileEvent::Created("a.txt".to_string());
        let c = FileEvent::Updated("a.txt".to_string());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_from_change_set_fixed_order() {
        let changes = ChangeSet {
            created: vec!["new.txt".to_string()],
            updated: vec!["changed.txt".to_string()],
            deleted: vec!["gone.txt".to_string()],
        };

        let events = FileEvent::from_change_set(&changes);
        assert_eq!(
            events,
            vec![
                FileEvent::Created("new.txt".to_string()),
                FileEvent::Updated("changed.txt".to_string()),
                FileEvent::Deleted("gone.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_change_set_empty() {
        assert!(FileEvent::from_change_set(&ChangeSet::default()).is_empty());
    }

    #[test]
    fn test_from_change_set_multiple_per_kind() {
        let changes = ChangeSet {
            created: vec!["a".to_string(), "b".to_string()],
            updated: Vec::new(),
            deleted: vec!["z".to_string()],
        };

        let events = FileEvent::from_change_set(&changes);
        assert_eq!(events.len(), 3);
        // All creates precede all deletes
        assert!(matches!(events[0], FileEvent::Created(_)));
        assert!(matches!(events[1], FileEvent::Created(_)));
        assert!(matches!(events[2], FileEvent::Deleted(_)));
    }
}
