//! Domain error types
//!
//! Errors raised while building domain values from raw listings. A domain
//! error rejects the tick that produced it; the poll state is left untouched.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Two entries in one listing share a name. The remote filesystem is
    /// supposed to guarantee uniqueness; rather than silently picking one
    /// entry, the whole listing is rejected.
    #[error("Duplicate entry name in listing: {0}")]
    DuplicateEntryName(String),

    /// Entry name is empty or contains a path separator (only one flat
    /// directory level is watched)
    #[error("Invalid entry name: {0:?}")]
    InvalidEntryName(String),
}
