//! Directory entry - one remote file observed at a point in time

// ============================================================================
// Entry struct
// ============================================================================

/// One remote file (or directory) as observed in a single listing
///
/// The modification time is an opaque, totally-ordered value taken from the
/// transport protocol (SFTP mtime, seconds since epoch). Only ordering and
/// equality matter to the diff engine; no calendar arithmetic is ever
/// performed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Entry name, unique within one snapshot (single directory level,
    /// no path separators)
    pub name: String,
    /// Protocol-native modification timestamp
    pub modified_at: u64,
}

impl Entry {
    /// Creates a new entry
    pub fn new(name: impl Into<String>, modified_at: u64) -> Self {
        Self {
            name: name.into(),
            modified_at,
        }
    }
}
