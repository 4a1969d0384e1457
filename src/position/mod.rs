//! Position Validation Module
//!
//! Parses FEN position descriptions into the validated `BoardPosition` used by
//! the rest of the gateway.
//!
//! ## Overview
//! Nothing downstream of this module ever re-checks position well-formedness:
//! a `BoardPosition` can only be obtained through a successful parse, so the
//! engine guard and orchestrator treat it as trusted input.
//!
//! ## Responsibilities
//! - **Parsing**: Decoding all six FEN fields (placement, side to move,
//!   castling rights, en passant target, move counters).
//! - **Validation**: Rejecting malformed input with a specific
//!   `PositionError` before any rate-limited engine capacity is spent on it.
//!
//! ## Submodules
//! - **`parser`**: The FEN decoder.
//! - **`types`**: `BoardPosition`, `Piece`, `Square` and friends.

pub mod parser;
pub mod types;

pub use parser::PositionError;
pub use types::{BoardPosition, CastlingRights, Color, Piece, PieceKind, Square};
