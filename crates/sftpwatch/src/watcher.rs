//! Watcher handle and async factory
//!
//! [`SftpWatcher::start`] connects the transport session, spawns the poll
//! loop, and hands back the watcher handle plus the event receiver. The
//! handle owns the session and the loop task for the watcher's lifetime;
//! [`SftpWatcher::stop`] tears both down.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sftpwatch_core::config::WatcherConfig;
use sftpwatch_core::ports::IRemoteSession;
use sftpwatch_ssh::SshSession;

use crate::events::FileEvent;
use crate::poller::PollLoop;

/// Capacity of the event channel handed to subscribers
const EVENT_CHANNEL_CAPACITY: usize = 1024;

// ============================================================================
// SftpWatcher struct
// ============================================================================

/// Handle to one running directory watcher
///
/// Each instance owns its own transport session and poll loop, so multiple
/// watchers against different hosts or directories coexist independently in
/// one process.
pub struct SftpWatcher {
    /// The transport session, closed exactly once at stop
    session: Arc<dyn IRemoteSession>,
    /// Cancellation source for the poll loop
    shutdown: CancellationToken,
    /// Join handle of the poll loop task; `None` once stopped
    task: Option<JoinHandle<()>>,
    /// Kept for stop-time diagnostics
    config: WatcherConfig,
}

impl SftpWatcher {
    /// Connects to the configured SFTP server and starts polling
    ///
    /// Resolves once the session is established and the poll loop is
    /// running. The first poll tick establishes the baseline snapshot and
    /// emits nothing; change events flow from the second tick onward.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration or on any connection/authentication
    /// error. Connection failures are surfaced here once and never retried
    /// automatically.
    pub async fn start(config: WatcherConfig) -> Result<(Self, mpsc::Receiver<FileEvent>)> {
        config.validate().context("invalid watcher configuration")?;
        let session = SshSession::connect(&config)
            .await
            .context("failed to establish SFTP session")?;
        Self::with_session(Arc::new(session), config)
    }

    /// Starts a watcher over an already-established session
    ///
    /// This is the injection seam: tests and alternate transports provide
    /// their own [`IRemoteSession`] implementation here. The session is
    /// owned by the watcher from this point on and will be closed by
    /// [`stop`](Self::stop).
    pub fn with_session(
        session: Arc<dyn IRemoteSession>,
        config: WatcherConfig,
    ) -> Result<(Self, mpsc::Receiver<FileEvent>)> {
        config.validate().context("invalid watcher configuration")?;

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let shutdown = CancellationToken::new();

        let poll_loop = PollLoop::new(
            session.clone(),
            config.clone(),
            event_tx,
            shutdown.clone(),
        );
        let task = tokio::spawn(poll_loop.run());

        Ok((
            Self {
                session,
                shutdown,
                task: Some(task),
                config,
            },
            event_rx,
        ))
    }

    /// Stops polling and releases the transport session
    ///
    /// A tick already in flight completes (including publishing its events)
    /// before the loop exits; this method joins the loop task, so once it
    /// returns no further events will be published. Closing the session is
    /// best-effort: a close failure is logged and suppressed.
    ///
    /// Idempotent: calling `stop` on an already-stopped watcher is a no-op.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(task) = self.task.take() else {
            debug!("Watcher already stopped, ignoring");
            return Ok(());
        };

        if self.config.verbose_logging {
            info!(path = %self.config.path, "Stopping watcher");
        } else {
            debug!(path = %self.config.path, "Stopping watcher");
        }

        self.shutdown.cancel();
        if let Err(err) = task.await {
            warn!(error = %err, "Poll loop task ended abnormally");
        }

        if let Err(err) = self.session.close().await {
            warn!(
                error = format!("{err:#}"),
                "Failed to close transport session cleanly"
            );
        }

        Ok(())
    }

    /// Returns true once [`stop`](Self::stop) has run
    pub fn is_stopped(&self) -> bool {
        self.task.is_none()
    }
}

impl Drop for SftpWatcher {
    fn drop(&mut self) {
        // Dropping without stop(): cancel the loop so the task winds down
        // and the session worker disconnects once its handles are dropped.
        self.shutdown.cancel();
    }
}
