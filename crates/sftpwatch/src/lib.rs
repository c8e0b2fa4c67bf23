//! sftpwatch - Polling SFTP directory watcher
//!
//! Watches one flat remote directory over SFTP and emits typed change
//! events (created / updated / deleted) by diffing successive listings.
//!
//! # Architecture
//!
//! ```text
//! SshSession (sftpwatch-ssh)
//!       │ list_directory
//!       ▼
//!   PollLoop ──→ diff(previous, current) ──→ mpsc::Receiver<FileEvent>
//!       ▲
//!       └── CancellationToken (SftpWatcher::stop)
//! ```
//!
//! The poll loop is one task: each tick lists the directory, diffs the fresh
//! snapshot against the stored one, publishes the changes in the fixed order
//! created → updated → deleted, and replaces the stored snapshot. The first
//! successful tick only establishes the baseline and emits nothing.
//!
//! # Usage
//!
//! ```ignore
//! use sftpwatch::{FileEvent, SftpWatcher, WatcherConfig};
//!
//! let config = WatcherConfig::default()
//!     .with_host("files.example.com")
//!     .with_password_auth("deploy", "secret")
//!     .with_path("/srv/incoming");
//!
//! let (mut watcher, mut events) = SftpWatcher::start(config).await?;
//! while let Some(event) = events.recv().await {
//!     match event {
//!         FileEvent::Created(name) => println!("created {name}"),
//!         FileEvent::Updated(name) => println!("updated {name}"),
//!         FileEvent::Deleted(name) => println!("deleted {name}"),
//!     }
//! }
//! watcher.stop().await?;
//! ```

pub mod events;
mod poller;
pub mod watcher;

pub use events::FileEvent;
pub use watcher::SftpWatcher;

pub use sftpwatch_core::config::WatcherConfig;
pub use sftpwatch_core::domain::{diff, ChangeSet, DomainError, Entry, Snapshot};
pub use sftpwatch_core::ports::{IRemoteSession, RemoteEntry};
pub use sftpwatch_ssh::{SshSession, TransportError};
