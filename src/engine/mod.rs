//! Engine Resource Module
//!
//! Exclusive, time-bounded access to the single shared search engine.
//!
//! ## Overview
//! The underlying engine is CPU-bound, synchronous, and not verified safe for
//! concurrent invocation, so this module owns it outright: one dedicated
//! blocking worker runs every search, and the rest of the process only ever
//! talks to the worker through a bounded queue.
//!
//! ## Responsibilities
//! - **Mutual exclusion**: At most one engine call executes at any instant;
//!   waiting callers are served in arrival order.
//! - **Timeouts**: A per-call budget covering queue wait plus execution.
//! - **Backpressure**: A bounded wait queue that fails fast when full.
//! - **Degradation**: After an unrecoverable engine failure the guard fails
//!   all calls until an operator reset.
//!
//! ## Submodules
//! - **`guard`**: The `EngineGuard` resource guard and its worker loop.
//! - **`greedy`**: A minimal builtin engine so the binary runs end to end.
//! - **`types`**: The `SearchEngine` capability trait and `MoveResult`.

pub mod greedy;
pub mod guard;
pub mod types;

pub use greedy::GreedyEngine;
pub use guard::EngineGuard;
pub use types::{MoveResult, SearchEngine};

#[cfg(test)]
mod tests;
