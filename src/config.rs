//! Gateway Configuration
//!
//! All tunables consumed by the core, gathered in one injected struct.
//! The binary fills this from CLI flags; tests construct it directly.

use std::time::Duration;

/// Runtime configuration for the gateway core.
///
/// The rate-limit threshold and window are deliberately configurable rather
/// than hardcoded. The limiter is global (one key for all clients) because it
/// exists to cap aggregate load on a single scarce engine, not to enforce
/// per-user fairness.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Maximum number of requests admitted per rate window.
    pub rate_limit_max: u32,
    /// Length of the fixed rate window.
    pub rate_limit_window: Duration,
    /// Budget for one engine call, covering both queue wait and execution.
    pub engine_timeout: Duration,
    /// Fixed search depth passed to the engine for every request.
    pub search_depth: u8,
    /// Maximum number of requests allowed to wait for the engine worker.
    /// Requests beyond this fail fast instead of growing the queue.
    pub engine_queue_depth: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rate_limit_max: 10,
            rate_limit_window: Duration::from_secs(60),
            engine_timeout: Duration::from_secs(10),
            search_depth: 3,
            engine_queue_depth: 8,
        }
    }
}
