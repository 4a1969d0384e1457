//! Request Orchestrator
//!
//! Composes admission, validation and the engine guard into the per-request
//! pipeline. Stage order matters: the cheap global rate check runs first, the
//! pure parse second, and only fully admitted, well-formed requests ever queue
//! for the engine.

use std::sync::Arc;

use super::types::MoveRequest;
use crate::admission::{AdmissionDecision, RateLimiter};
use crate::config::GatewayConfig;
use crate::engine::{EngineGuard, MoveResult};
use crate::error::GatewayError;
use crate::position::BoardPosition;

/// The per-request pipeline: admit -> parse -> search.
pub struct MoveService {
    limiter: Arc<RateLimiter>,
    guard: Arc<EngineGuard>,
    config: GatewayConfig,
}

impl MoveService {
    pub fn new(
        limiter: Arc<RateLimiter>,
        guard: Arc<EngineGuard>,
        config: GatewayConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            limiter,
            guard,
            config,
        })
    }

    /// Runs one request through the pipeline.
    ///
    /// Each stage gates the next; the first rejection short-circuits the rest,
    /// so rate-limited and malformed requests never consume engine capacity.
    pub async fn best_move(&self, request: &MoveRequest) -> Result<MoveResult, GatewayError> {
        if let AdmissionDecision::Rejected { retry_after } = self.limiter.try_admit() {
            return Err(GatewayError::RateLimited { retry_after });
        }

        let position = BoardPosition::parse(&request.fen)?;

        self.guard
            .best_move(position, self.config.search_depth)
            .await
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn engine_degraded(&self) -> bool {
        self.guard.is_degraded()
    }

    /// Operator action: clears the guard's degraded state.
    pub fn reset_engine(&self) {
        self.guard.reset();
    }
}
