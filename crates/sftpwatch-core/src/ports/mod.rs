//! Port definitions (trait interfaces implemented by adapter crates)

pub mod remote_session;

pub use remote_session::{IRemoteSession, RemoteEntry};
