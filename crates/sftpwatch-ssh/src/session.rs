//! SFTP session adapter backed by a dedicated worker thread
//!
//! [`SshSession`] implements the `IRemoteSession` port. All libssh2 calls
//! run on one worker thread that owns the `ssh2::Session` and `ssh2::Sftp`
//! handles; the async side never touches them directly.

use std::net::TcpStream;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use sftpwatch_core::config::WatcherConfig;
use sftpwatch_core::ports::{IRemoteSession, RemoteEntry};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::TransportError;

// ============================================================================
// Worker commands
// ============================================================================

/// Requests serviced by the session worker thread
enum Command {
    /// List one remote directory and reply with its raw entries
    ListDirectory {
        path: String,
        reply: oneshot::Sender<Result<Vec<RemoteEntry>, TransportError>>,
    },
    /// Disconnect the session and shut the worker down
    Close {
        reply: oneshot::Sender<Result<(), TransportError>>,
    },
}

// ============================================================================
// SshSession
// ============================================================================

/// An authenticated SFTP session usable from async code
///
/// Created by [`SshSession::connect`]. Internally this is a handle to a
/// worker thread; dropping the handle (without an explicit close) makes the
/// worker disconnect and exit on its own once the command channel closes.
pub struct SshSession {
    /// Command channel to the worker thread
    commands: mpsc::UnboundedSender<Command>,
    /// Set by the first successful `close()`; later calls are no-ops
    closed: AtomicBool,
}

impl SshSession {
    /// Opens a TCP connection, performs the SSH handshake, authenticates,
    /// and opens the SFTP channel
    ///
    /// Private-key authentication takes precedence over the configured
    /// password when `config.private_key` is set.
    ///
    /// # Errors
    ///
    /// Any connection-phase failure is returned here, once; the session
    /// never retries establishment on its own.
    pub async fn connect(config: &WatcherConfig) -> Result<Self, TransportError> {
        let addr = format!("{}:{}", config.host, config.port);
        if config.verbose_logging {
            info!(addr = %addr, username = %config.username, "Connecting to SFTP server");
        } else {
            debug!(addr = %addr, username = %config.username, "Connecting to SFTP server");
        }

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();

        let worker_config = config.clone();
        std::thread::Builder::new()
            .name("sftpwatch-ssh".to_string())
            .spawn(move || run_worker(worker_config, cmd_rx, ready_tx))
            .map_err(TransportError::WorkerSpawn)?;

        // The worker reports the outcome of the connection phase before it
        // starts serving commands.
        match ready_rx.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(err),
            Err(_) => return Err(TransportError::WorkerGone),
        }

        debug!(addr = %addr, "SFTP session established");
        Ok(Self {
            commands: cmd_tx,
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait::async_trait]
impl IRemoteSession for SshSession {
    async fn list_directory(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::ListDirectory {
                path: path.to_string(),
                reply: reply_tx,
            })
            .map_err(|_| TransportError::WorkerGone)?;

        let entries = reply_rx.await.map_err(|_| TransportError::WorkerGone)??;
        Ok(entries)
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("Session already closed, ignoring");
            return Ok(());
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .commands
            .send(Command::Close { reply: reply_tx })
            .is_err()
        {
            // Worker already exited; it disconnects on its own way out.
            debug!("Session worker already gone at close");
            return Ok(());
        }

        match reply_rx.await {
            Ok(result) => Ok(result?),
            Err(_) => Ok(()),
        }
    }
}

// ============================================================================
// Worker thread
// ============================================================================

/// Entry point of the session worker thread
///
/// Establishes the session, reports the outcome through `ready`, then
/// services commands until `Close` arrives or the command channel is
/// dropped. Either way the session is disconnected exactly once before the
/// thread exits.
fn run_worker(
    config: WatcherConfig,
    mut commands: mpsc::UnboundedReceiver<Command>,
    ready: oneshot::Sender<Result<(), TransportError>>,
) {
    let (session, sftp) = match establish(&config) {
        Ok(pair) => {
            let _ = ready.send(Ok(()));
            pair
        }
        Err(err) => {
            let _ = ready.send(Err(err));
            return;
        }
    };

    while let Some(command) = commands.blocking_recv() {
        match command {
            Command::ListDirectory { path, reply } => {
                let _ = reply.send(list_directory_blocking(&sftp, &path));
            }
            Command::Close { reply } => {
                debug!("Disconnecting SFTP session");
                let result = session
                    .disconnect(None, "watcher stopped", None)
                    .map_err(|err| {
                        warn!(error = %err, "SSH disconnect reported an error");
                        TransportError::Disconnect(err)
                    });
                let _ = reply.send(result);
                return;
            }
        }
    }

    // Command channel dropped without an explicit close (watcher was
    // dropped). Disconnect best-effort before the thread exits.
    if let Err(err) = session.disconnect(None, "session dropped", None) {
        debug!(error = %err, "SSH disconnect on drop reported an error");
    }
}

/// Connection phase: TCP connect, handshake, authenticate, open SFTP
fn establish(config: &WatcherConfig) -> Result<(ssh2::Session, ssh2::Sftp), TransportError> {
    let addr = format!("{}:{}", config.host, config.port);

    let tcp = TcpStream::connect((config.host.as_str(), config.port)).map_err(|source| {
        TransportError::Connect {
            addr: addr.clone(),
            source,
        }
    })?;

    let mut session = ssh2::Session::new().map_err(TransportError::SessionInit)?;
    session.set_tcp_stream(tcp);
    session.handshake().map_err(|source| TransportError::Handshake {
        addr: addr.clone(),
        source,
    })?;

    // Key authentication takes precedence when both are configured.
    match &config.private_key {
        Some(key_path) => {
            debug!(key = %key_path.display(), "Authenticating with private key");
            session
                .userauth_pubkey_file(&config.username, None, key_path, None)
                .map_err(|source| TransportError::Auth {
                    username: config.username.clone(),
                    source,
                })?;
        }
        None => {
            debug!("Authenticating with password");
            session
                .userauth_password(&config.username, &config.password)
                .map_err(|source| TransportError::Auth {
                    username: config.username.clone(),
                    source,
                })?;
        }
    }

    let sftp = session.sftp().map_err(TransportError::SftpChannel)?;
    Ok((session, sftp))
}

/// Lists one directory over SFTP, mapping each entry to a [`RemoteEntry`]
///
/// `readdir` reports entries as full paths joined to the directory; only the
/// final component is kept. Directories are listed like files, and a missing
/// mtime maps to 0 (a constant value never produces an update event).
fn list_directory_blocking(
    sftp: &ssh2::Sftp,
    path: &str,
) -> Result<Vec<RemoteEntry>, TransportError> {
    let raw = sftp
        .readdir(Path::new(path))
        .map_err(|source| TransportError::Listing {
            path: path.to_string(),
            source,
        })?;

    let mut entries = Vec::with_capacity(raw.len());
    for (entry_path, stat) in raw {
        match entry_name(&entry_path) {
            Some(name) => entries.push(RemoteEntry {
                name,
                modified_at: stat.mtime.unwrap_or(0),
            }),
            None => {
                warn!(path = %entry_path.display(), "Skipping listing entry without a file name");
            }
        }
    }
    Ok(entries)
}

/// Extracts the final path component as an owned string
fn entry_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}
