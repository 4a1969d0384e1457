use serde::{Deserialize, Serialize};

/// Raw client input: a FEN position description. No invariants beyond
/// presence; validation happens in the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub fen: String,
}

/// Successful response: the engine's chosen move in coordinate notation.
#[derive(Debug, Serialize, Deserialize)]
pub struct BestMoveResponse {
    pub best_move: String,
}

/// Typed failure body. `kind` is a stable machine-readable discriminator;
/// `retry_after_secs` is only present for rate-limit rejections.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

/// Health probe payload: degradation state plus a config echo.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub engine_degraded: bool,
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
    pub search_depth: u8,
}

/// Response to the internal engine reset endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub engine_degraded: bool,
}
