//! Transport adapter error types

use thiserror::Error;

/// Errors raised by the SSH/SFTP transport adapter
///
/// Connection-phase variants (`Connect` through `SftpChannel`) surface once,
/// from [`SshSession::connect`](crate::SshSession::connect), and abort the
/// watcher before polling starts. `Listing` and `WorkerGone` occur per tick
/// and only fail the tick that hit them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// TCP connection to the remote host failed
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        /// The `host:port` pair that was dialed
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The session worker thread could not be spawned
    #[error("Failed to spawn session worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// libssh2 session allocation failed
    #[error("SSH session initialization failed: {0}")]
    SessionInit(#[source] ssh2::Error),

    /// The SSH protocol handshake failed
    #[error("SSH handshake with {addr} failed: {source}")]
    Handshake {
        /// The `host:port` pair that was dialed
        addr: String,
        #[source]
        source: ssh2::Error,
    },

    /// Password or private-key authentication was rejected
    #[error("Authentication failed for user {username}: {source}")]
    Auth {
        /// The username that was presented
        username: String,
        #[source]
        source: ssh2::Error,
    },

    /// The SFTP subsystem could not be opened on the authenticated session
    #[error("Failed to open SFTP channel: {0}")]
    SftpChannel(#[source] ssh2::Error),

    /// A directory listing failed (transient network error, permissions,
    /// missing directory)
    #[error("Listing {path} failed: {source}")]
    Listing {
        /// The remote directory that was being listed
        path: String,
        #[source]
        source: ssh2::Error,
    },

    /// The SSH disconnect at close time failed
    #[error("SSH disconnect failed: {0}")]
    Disconnect(#[source] ssh2::Error),

    /// The worker thread has exited; the session is unusable
    #[error("Session worker is no longer running")]
    WorkerGone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_error_display() {
        let err = TransportError::Connect {
            addr: "example.com:22".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to connect to example.com:22: refused"
        );
    }

    #[test]
    fn test_worker_gone_display() {
        assert_eq!(
            TransportError::WorkerGone.to_string(),
            "Session worker is no longer running"
        );
    }
}
