//! Periodic background task that publishes snapshots.
//!
//! A [`Ticker`] owns its collector on a dedicated thread. Every interval it
//! collects one snapshot and hands it to a [`SnapshotSink`]. The display side
//! never shares the collector and only ever observes whole snapshots.

use crate::collector::Collector;
use crate::snapshot::Snapshot;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Refresh interval of the dashboard.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

/// Errors starting a ticker.
#[derive(Debug, thiserror::Error)]
pub enum TickerError {
    #[error("tick interval must be greater than zero")]
    ZeroInterval,

    #[error("failed to spawn ticker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Receives published snapshots.
pub trait SnapshotSink<S>: Send + 'static {
    /// Deliver one snapshot. Returning `false` means the consumer is gone
    /// and the ticker stops.
    fn publish(&mut self, snapshot: S) -> bool;
}

impl<S: Send + 'static> SnapshotSink<S> for mpsc::Sender<S> {
    fn publish(&mut self, snapshot: S) -> bool {
        self.send(snapshot).is_ok()
    }
}

/// Latest-value cell shared between a ticker and any number of readers.
#[derive(Debug)]
pub struct LatestSnapshot<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for LatestSnapshot<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Snapshot> LatestSnapshot<S> {
    /// Cell holding [`Snapshot::empty`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_value(S::empty())
    }

    #[must_use]
    pub fn with_value(value: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Copy of the most recent snapshot.
    #[must_use]
    pub fn get(&self) -> S {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the stored snapshot wholesale.
    pub fn set(&self, value: S) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl<S: Snapshot> Default for LatestSnapshot<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Snapshot + Sync> SnapshotSink<S> for LatestSnapshot<S> {
    fn publish(&mut self, snapshot: S) -> bool {
        self.set(snapshot);
        true
    }
}

/// Handle to a running periodic collector.
///
/// Dropping the handle stops the thread. After [`Ticker::stop`] returns no
/// further snapshot is published.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start collecting every `interval`. The first snapshot is published
    /// one interval after the call, never immediately.
    pub fn spawn<C, K>(mut collector: C, interval: Duration, mut sink: K) -> Result<Self, TickerError>
    where
        C: Collector,
        K: SnapshotSink<C::Snapshot>,
    {
        if interval.is_zero() {
            return Err(TickerError::ZeroInterval);
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("folio-ticker".to_string())
            .spawn(move || {
                tracing::debug!(interval_ms = interval.as_millis() as u64, "ticker started");
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let snapshot = collector.collect();
                            if !sink.publish(snapshot) {
                                tracing::debug!("snapshot consumer gone, ticker exiting");
                                break;
                            }
                            tracing::trace!("tick published");
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::debug!("ticker stopped");
            })?;

        Ok(Self {
            interval,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the background thread is still alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread and wait for it to exit. Idempotent.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
