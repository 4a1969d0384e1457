//! Gateway Error Taxonomy
//!
//! Every rejection the gateway can produce, as one typed enum. Handlers map
//! these to HTTP status codes; tests assert on variants instead of strings.

use std::time::Duration;

use thiserror::Error;

use crate::position::PositionError;

/// All failure kinds a request can terminate with.
///
/// Validation and admission failures are resolved without touching the engine.
/// Engine-side failures are isolated per request; only `EngineUnavailable`
/// outlives the request that caused it, and only until an operator reset.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The submitted FEN did not decode into a well-formed position.
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] PositionError),

    /// The global request quota for the current window is exhausted.
    #[error("rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// The engine wait queue is at capacity.
    #[error("engine queue is full")]
    Busy,

    /// The engine call exceeded its configured time budget.
    #[error("engine call timed out")]
    EngineTimeout,

    /// The engine returned an error or a non-move result.
    #[error("engine failure: {0}")]
    EngineFailure(String),

    /// The engine is degraded after an unrecoverable failure and every call
    /// fails until an operator reset.
    #[error("engine unavailable, operator reset required")]
    EngineUnavailable,
}

impl GatewayError {
    /// Stable machine-readable kind string carried in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::InvalidPosition(_) => "invalid_position",
            GatewayError::RateLimited { .. } => "rate_limited",
            GatewayError::Busy => "busy",
            GatewayError::EngineTimeout => "engine_timeout",
            GatewayError::EngineFailure(_) => "engine_failure",
            GatewayError::EngineUnavailable => "engine_unavailable",
        }
    }
}
