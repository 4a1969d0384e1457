use serde::{Deserialize, Serialize};

use crate::position::BoardPosition;

/// The move-search capability consumed by the gateway.
///
/// Implementations are synchronous and CPU-bound, and are **not** assumed safe
/// to invoke concurrently with themselves; the [`EngineGuard`] serializes all
/// calls. `&mut self` makes that ownership explicit: only the guard's worker
/// ever holds the engine.
///
/// [`EngineGuard`]: super::guard::EngineGuard
pub trait SearchEngine: Send {
    /// Picks a move for `position` looking `depth` plies ahead. Returns the
    /// move in coordinate notation (e.g. `e2e4`, `a7a8q`).
    fn best_move(&mut self, position: &BoardPosition, depth: u8) -> anyhow::Result<String>;

    /// Whether the engine is still in a usable state. Polled by the guard
    /// after a failed call to decide between an isolated per-request failure
    /// and degrading the whole guard.
    fn is_ready(&mut self) -> bool {
        true
    }
}

/// A move chosen by the engine, in coordinate notation.
///
/// Opaque to the gateway beyond a shape check; legality is the engine's
/// business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult(pub String);
