//! Domain model for remote directory change detection
//!
//! Pure data structures and logic: no I/O, no async, deterministic. The
//! watcher crate feeds listings obtained through a port into this module
//! and publishes the resulting change sets.

pub mod diff;
pub mod entry;
pub mod errors;
pub mod snapshot;

pub use diff::{diff, ChangeSet};
pub use entry::Entry;
pub use errors::DomainError;
pub use snapshot::Snapshot;
