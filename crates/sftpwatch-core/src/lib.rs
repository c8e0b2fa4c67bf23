//! sftpwatch Core - Domain logic and ports
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Entry`, `Snapshot`, `ChangeSet` and the pure
//!   [`diff`](domain::diff::diff) function over successive snapshots
//! - **Port definitions** - [`IRemoteSession`](ports::remote_session::IRemoteSession),
//!   the narrow capability the poll loop consumes to list a remote directory
//! - **Configuration** - [`WatcherConfig`](config::WatcherConfig)
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure change-detection logic with no I/O and no
//! external dependencies. Ports define trait interfaces that adapter crates
//! (e.g. `sftpwatch-ssh`) implement. The watcher crate orchestrates the
//! domain through the port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
