//! Engine Resource Guard
//!
//! Owns the single long-lived engine instance and serializes all access to it.
//!
//! The guard moves the engine onto one dedicated blocking worker at startup.
//! Callers submit jobs over a bounded channel and await a oneshot reply under
//! a timeout, so a long search never blocks the async dispatch path that
//! serves unrelated requests (including cheap rate-limit rejections).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use regex::Regex;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

use super::types::{MoveResult, SearchEngine};
use crate::error::GatewayError;
use crate::position::BoardPosition;

/// One queued search request.
struct SearchJob {
    position: BoardPosition,
    depth: u8,
    reply: oneshot::Sender<Result<MoveResult, GatewayError>>,
}

/// Serialized, time-bounded front door to the shared engine.
///
/// The engine handle itself lives inside the worker task; no other component
/// holds a reference to it. Jobs are served strictly in arrival order.
pub struct EngineGuard {
    jobs: mpsc::Sender<SearchJob>,
    degraded: Arc<AtomicBool>,
    call_timeout: Duration,
}

impl EngineGuard {
    /// Takes ownership of `engine` and spawns its dedicated worker.
    ///
    /// # Arguments
    /// * `call_timeout` - Budget for one call, covering queue wait and execution.
    /// * `queue_depth` - Jobs allowed to wait for the worker before callers
    ///   get `Busy`.
    pub fn new(
        engine: Box<dyn SearchEngine>,
        call_timeout: Duration,
        queue_depth: usize,
    ) -> Arc<Self> {
        let (jobs, job_rx) = mpsc::channel(queue_depth.max(1));
        let degraded = Arc::new(AtomicBool::new(false));

        let flag = degraded.clone();
        // The worker exits on its own once every guard handle is dropped and
        // the job channel closes, so the handle is not retained.
        let _worker = tokio::task::spawn_blocking(move || worker_loop(engine, job_rx, flag));

        tracing::info!(
            "Engine guard started (timeout {:?}, queue depth {})",
            call_timeout,
            queue_depth
        );

        Arc::new(Self {
            jobs,
            degraded,
            call_timeout,
        })
    }

    /// Runs one serialized engine call.
    ///
    /// Fails fast with `Busy` when the wait queue is full and with
    /// `EngineUnavailable` while the guard is degraded. If the call exceeds
    /// the configured budget the caller gets `EngineTimeout` and its slot is
    /// released; the engine itself has no cancellation hook, so the worker
    /// still finishes the stale search before serving the next job. That is a
    /// known limitation documented here rather than papered over.
    pub async fn best_move(
        &self,
        position: BoardPosition,
        depth: u8,
    ) -> Result<MoveResult, GatewayError> {
        if self.is_degraded() {
            return Err(GatewayError::EngineUnavailable);
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        let job = SearchJob {
            position,
            depth,
            reply: reply_tx,
        };

        self.jobs.try_send(job).map_err(|err| match err {
            TrySendError::Full(_) => GatewayError::Busy,
            TrySendError::Closed(_) => GatewayError::EngineUnavailable,
        })?;

        match tokio::time::timeout(self.call_timeout, reply_rx).await {
            Ok(Ok(outcome)) => outcome,
            // Worker dropped the reply channel without answering.
            Ok(Err(_)) => Err(GatewayError::EngineUnavailable),
            Err(_) => {
                tracing::warn!("Engine call exceeded {:?} budget", self.call_timeout);
                Err(GatewayError::EngineTimeout)
            }
        }
    }

    /// Whether the guard has been marked degraded by an unrecoverable engine
    /// failure.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::SeqCst)
    }

    /// Operator action: clears the degraded flag so calls reach the engine
    /// again. Never invoked on the request path.
    pub fn reset(&self) {
        self.degraded.store(false, Ordering::SeqCst);
        tracing::info!("Engine guard reset, resuming engine calls");
    }
}

/// The worker loop that exclusively owns the engine.
///
/// Runs on a blocking thread until every `EngineGuard` handle is dropped and
/// the job channel closes.
fn worker_loop(
    mut engine: Box<dyn SearchEngine>,
    mut jobs: mpsc::Receiver<SearchJob>,
    degraded: Arc<AtomicBool>,
) {
    // Coordinate notation with an optional promotion letter.
    let move_shape = Regex::new(r"^[a-h][1-8][a-h][1-8][nbrq]?$").unwrap();

    while let Some(job) = jobs.blocking_recv() {
        if degraded.load(Ordering::SeqCst) {
            let _ = job.reply.send(Err(GatewayError::EngineUnavailable));
            continue;
        }

        let outcome = match engine.best_move(&job.position, job.depth) {
            Ok(notation) if move_shape.is_match(&notation) => Ok(MoveResult(notation)),
            Ok(notation) => {
                tracing::error!("Engine returned non-move result {:?}", notation);
                check_engine_after_failure(engine.as_mut(), &degraded);
                Err(GatewayError::EngineFailure(format!(
                    "engine returned non-move result {notation:?}"
                )))
            }
            Err(err) => {
                tracing::error!("Engine call failed: {err:#}");
                check_engine_after_failure(engine.as_mut(), &degraded);
                Err(GatewayError::EngineFailure(err.to_string()))
            }
        };

        // The caller may have timed out and dropped its receiver; the stale
        // result is simply discarded.
        let _ = job.reply.send(outcome);
    }

    tracing::debug!("Engine worker shutting down, job channel closed");
}

/// After any failed call, verify the engine is still usable before serving the
/// next job. If it is not, flip the guard into degraded mode.
fn check_engine_after_failure(engine: &mut dyn SearchEngine, degraded: &AtomicBool) {
    if !engine.is_ready() {
        degraded.store(true, Ordering::SeqCst);
        tracing::error!("Engine unusable after failure, guard degraded until operator reset");
    }
}
