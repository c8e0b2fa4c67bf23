//! Remote session port (driven/secondary port)
//!
//! This module defines the interface for the authenticated transport
//! connection the watcher polls through. The primary implementation is the
//! SFTP adapter in `sftpwatch-ssh`, but the trait is transport-agnostic:
//! anything that can list one flat directory level as (name, mtime) pairs
//! can drive the watcher.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - Uses `#[async_trait]` for async trait methods.
//! - [`RemoteEntry`] is a port-level DTO, not a domain entity; the poll loop
//!   is responsible for mapping it to the domain `Entry`.
//! - The session is an explicitly owned resource handed to the poll loop,
//!   never ambient state, so multiple independent watcher instances can
//!   coexist in one process.

// ============================================================================
// RemoteEntry struct
// ============================================================================

/// A single raw entry from a remote directory listing
///
/// Carries exactly what the watcher needs: the entry name (final path
/// component, no separators) and the protocol-native modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Entry name within the listed directory
    pub name: String,
    /// Modification time as reported by the transport (seconds since epoch)
    pub modified_at: u64,
}

// ============================================================================
// IRemoteSession trait
// ============================================================================

/// Port trait for the authenticated transport session
///
/// One session wraps one underlying connection. It is opened once before the
/// poll loop starts (by the adapter's connect function) and closed exactly
/// once when the watcher stops.
///
/// ## Implementation Notes
///
/// - `list_directory` is the only operation invoked on the hot path; it is
///   called once per poll tick and may suspend on network I/O.
/// - `close` must be idempotent: the watcher's `stop()` is allowed to run
///   more than once, and a second close must not error or double-release.
/// - No reconnection contract: if the underlying connection drops,
///   `list_directory` keeps failing and the watcher keeps retrying at its
///   poll interval against the last known-good state.
#[async_trait::async_trait]
pub trait IRemoteSession: Send + Sync {
    /// Lists the entries of one remote directory (non-recursive)
    ///
    /// # Arguments
    /// * `path` - Absolute remote directory path
    ///
    /// # Returns
    /// The raw entries observed at this instant, in no particular order
    async fn list_directory(&self, path: &str) -> anyhow::Result<Vec<RemoteEntry>>;

    /// Releases the underlying connection
    ///
    /// Idempotent; closing an already-closed session is a no-op.
    async fn close(&self) -> anyhow::Result<()>;
}
