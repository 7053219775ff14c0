// Mounted surfaces: each owns its scheduler task and in-memory state exclusively.
// State is published through a watch channel; nothing is shared across surfaces.

pub mod dashboard;
pub mod overlay;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinError, JoinHandle};

use crate::error::{FetchError, SnapshotKind};

/// Cleared on unmount. Checked before every state mutation so a fetch that
/// resolves after unmount is dropped instead of applied.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn kill(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Kills the surface's liveness when the handle goes away, unmounted or dropped.
struct AliveGuard(Liveness);

impl Drop for AliveGuard {
    fn drop(&mut self) {
        self.0.kill();
    }
}

/// Task side of a mounted surface.
pub(crate) struct Mount<S> {
    name: &'static str,
    state_tx: watch::Sender<S>,
    liveness: Liveness,
    pub(crate) shutdown_rx: oneshot::Receiver<()>,
    pub(crate) refresh_rx: mpsc::Receiver<()>,
}

impl<S> Mount<S> {
    pub(crate) fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Applies `f` to the published state unless the surface is gone.
    /// Returns false when the update was discarded.
    pub(crate) fn publish(&self, f: impl FnOnce(&mut S)) -> bool {
        if !self.liveness.is_alive() {
            tracing::debug!(surface = self.name, "surface unmounted; discarding late result");
            return false;
        }
        self.state_tx.send_modify(f);
        true
    }
}

/// A panicked fetch task counts as a failed fetch of its kind.
pub(crate) fn joined<T>(
    kind: SnapshotKind,
    outcome: Result<Result<T, FetchError>, JoinError>,
) -> Result<T, FetchError> {
    outcome.unwrap_or_else(|e| {
        tracing::warn!(error = %e, kind = %kind, operation = "fetch", "fetch task failed");
        Err(FetchError::Unreachable(format!("{} fetch task failed: {}", kind, e)))
    })
}

/// UI-side handle of a mounted surface.
pub struct Surface<S> {
    state: watch::Receiver<S>,
    refresh_tx: mpsc::Sender<()>,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
    alive: AliveGuard,
}

impl<S> Surface<S>
where
    S: Send + Sync + 'static,
{
    pub(crate) fn spawn<F, Fut>(name: &'static str, initial: S, run: F) -> Self
    where
        F: FnOnce(Mount<S>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (state_tx, state) = watch::channel(initial);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let liveness = Liveness::new();
        let mount = Mount {
            name,
            state_tx,
            liveness: liveness.clone(),
            shutdown_rx,
            refresh_rx,
        };
        let handle = tokio::spawn(run(mount));
        tracing::debug!(surface = name, "surface mounted");
        Self {
            state,
            refresh_tx,
            shutdown_tx,
            handle,
            alive: AliveGuard(liveness),
        }
    }

    /// Receiver for the published state; `changed()` wakes on every applied update.
    pub fn state(&self) -> watch::Receiver<S> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.state.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.alive.0.is_alive() && !self.handle.is_finished()
    }

    pub fn liveness(&self) -> Liveness {
        self.alive.0.clone()
    }

    /// Asks for an immediate fetch round. Returns false if one is already queued.
    pub fn refresh(&self) -> bool {
        self.refresh_tx.try_send(()).is_ok()
    }

    /// Stops all timers. A fetch already in flight completes and its result is discarded.
    /// The returned handle resolves once the scheduler task has exited.
    pub fn unmount(self) -> JoinHandle<()> {
        let Surface {
            shutdown_tx,
            handle,
            alive,
            ..
        } = self;
        drop(alive);
        let _ = shutdown_tx.send(());
        handle
    }
}
