//! SSH/SFTP transport adapter
//!
//! Implements the [`IRemoteSession`](sftpwatch_core::ports::IRemoteSession)
//! port on top of the `ssh2` crate (libssh2 bindings).
//!
//! libssh2 sessions are blocking and must not be shared across threads, so
//! the adapter runs a dedicated worker thread that owns the SSH session and
//! SFTP channel for its whole lifetime. Async callers talk to the worker
//! through a command channel and await oneshot replies:
//!
//! ```text
//! PollLoop ──→ SshSession ──→ mpsc (commands) ──→ worker thread (ssh2)
//!                   ▲                                   │
//!                   └────────── oneshot (replies) ──────┘
//! ```

pub mod error;
pub mod session;

pub use error::TransportError;
pub use session::SshSession;
