//! Timer-driven poll loop
//!
//! The [`PollLoop`] owns the poll state (the previous snapshot) and runs the
//! acquire → diff → publish → replace cycle on a fixed interval.
//!
//! ## Tick serialization
//!
//! The loop is a single task and awaits each tick body to completion before
//! asking the timer for the next tick, so at most one list/diff/publish
//! sequence is ever in flight and snapshot transitions happen strictly in
//! tick order. A listing that takes longer than the interval delays the next
//! tick (`MissedTickBehavior::Delay`) instead of overlapping it.
//!
//! ## Cancellation
//!
//! Cancellation is observed between ticks: a tick already in flight when the
//! token fires completes, including its publishes, and the loop exits before
//! the next tick. [`SftpWatcher::stop`](crate::SftpWatcher::stop) joins the
//! loop task, so no events can be observed after `stop()` returns.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sftpwatch_core::config::WatcherConfig;
use sftpwatch_core::domain::{diff, ChangeSet, Entry, Snapshot};
use sftpwatch_core::ports::IRemoteSession;

use crate::events::FileEvent;

// ============================================================================
// PollLoop struct
// ============================================================================

/// Single-owner poll state plus the machinery that advances it
///
/// Constructed by the watcher factory and consumed by [`PollLoop::run`];
/// nothing outside the loop task can read or write the stored snapshot.
pub(crate) struct PollLoop {
    /// Transport session used to acquire fresh listings
    session: Arc<dyn IRemoteSession>,
    /// Connection and polling configuration
    config: WatcherConfig,
    /// The previous snapshot; `None` until the first successful tick
    state: Option<Snapshot>,
    /// Publish side of the event channel
    events: mpsc::Sender<FileEvent>,
    /// Cancellation source shared with the watcher handle
    shutdown: CancellationToken,
}

impl PollLoop {
    pub(crate) fn new(
        session: Arc<dyn IRemoteSession>,
        config: WatcherConfig,
        events: mpsc::Sender<FileEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            session,
            config,
            state: None,
            events,
            shutdown,
        }
    }

    /// Runs the poll loop until cancelled
    ///
    /// Each tick failure (listing error, inconsistent listing) is logged and
    /// swallowed; the stored snapshot is left untouched and the next tick
    /// retries against the last known-good baseline.
    pub(crate) async fn run(mut self) {
        debug!(
            interval_ms = self.config.poll_interval_ms,
            path = %self.config.path,
            "Poll loop starting"
        );

        let mut ticker = tokio::time::interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let shutdown = self.shutdown.clone();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(err) = self.tick().await {
                        warn!(
                            error = format!("{err:#}"),
                            path = %self.config.path,
                            "Poll tick failed; keeping previous snapshot"
                        );
                    }
                }
            }
        }

        debug!(path = %self.config.path, "Poll loop stopped");
    }

    /// One poll cycle: acquire, diff, publish, replace
    ///
    /// Returns early (state untouched) on any failure, so a failed tick can
    /// never leave a partial update behind.
    async fn tick(&mut self) -> Result<()> {
        if self.config.verbose_logging {
            info!(path = %self.config.path, "Checking for changes");
        } else {
            debug!(path = %self.config.path, "Checking for changes");
        }

        let raw = self
            .session
            .list_directory(&self.config.path)
            .await
            .with_context(|| format!("failed to list remote directory {}", self.config.path))?;

        let listing: Vec<Entry> = raw
            .into_iter()
            .map(|entry| Entry::new(entry.name, entry.modified_at))
            .collect();
        let fresh = Snapshot::from_entries(listing)
            .context("rejecting inconsistent directory listing")?;

        match self.state.as_ref() {
            None => {
                // First successful tick: establish the baseline, emit
                // nothing. Pre-existing files never flood subscribers with
                // create events at startup.
                if self.config.verbose_logging {
                    info!(entries = fresh.len(), "Initializing baseline snapshot");
                } else {
                    debug!(entries = fresh.len(), "Initializing baseline snapshot");
                }
                self.state = Some(fresh);
            }
            Some(previous) => {
                let changes = diff(previous, &fresh);
                if !changes.is_empty() {
                    debug!(
                        created = changes.created.len(),
                        updated = changes.updated.len(),
                        deleted = changes.deleted.len(),
                        "Publishing change events"
                    );
                }
                self.publish(&changes).await?;
                self.state = Some(fresh);
            }
        }

        Ok(())
    }

    /// Publishes one tick's events in the fixed order created → updated → deleted
    ///
    /// Publishing awaits channel capacity, so a slow subscriber back-pressures
    /// the poll loop instead of losing events. A dropped receiver cancels the
    /// loop: nobody is listening any more.
    async fn publish(&self, changes: &ChangeSet) -> Result<()> {
        for event in FileEvent::from_change_set(changes) {
            if self.events.send(event).await.is_err() {
                self.shutdown.cancel();
                anyhow::bail!("event receiver dropped, stopping poll loop");
            }
        }
        Ok(())
    }
}
