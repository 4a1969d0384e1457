use std::sync::Arc;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use super::service::MoveService;
use super::types::{BestMoveResponse, ErrorResponse, HealthResponse, MoveRequest, ResetResponse};
use crate::error::GatewayError;

/// `POST /bestmove` - the public move endpoint.
pub async fn handle_best_move(
    Extension(service): Extension<Arc<MoveService>>,
    Json(request): Json<MoveRequest>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();
    tracing::debug!("[{}] best-move request received", request_id);

    match service.best_move(&request).await {
        Ok(result) => {
            tracing::info!("[{}] best move {}", request_id, result.0);
            (
                StatusCode::OK,
                Json(BestMoveResponse {
                    best_move: result.0,
                }),
            )
                .into_response()
        }
        Err(err) => {
            tracing::warn!("[{}] request rejected: {}", request_id, err);
            error_response(err)
        }
    }
}

/// `GET /health` - degradation state and config echo.
pub async fn handle_health(
    Extension(service): Extension<Arc<MoveService>>,
) -> (StatusCode, Json<HealthResponse>) {
    let degraded = service.engine_degraded();
    let config = service.config();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: if degraded { "degraded" } else { "ok" }.to_string(),
            engine_degraded: degraded,
            rate_limit_max: config.rate_limit_max,
            rate_limit_window_secs: config.rate_limit_window.as_secs(),
            search_depth: config.search_depth,
        }),
    )
}

/// `POST /internal/engine/reset` - operator action clearing the degraded
/// engine guard.
pub async fn handle_engine_reset(
    Extension(service): Extension<Arc<MoveService>>,
) -> (StatusCode, Json<ResetResponse>) {
    service.reset_engine();
    tracing::info!("Engine guard reset via internal endpoint");
    (
        StatusCode::OK,
        Json(ResetResponse {
            engine_degraded: service.engine_degraded(),
        }),
    )
}

/// Maps every `GatewayError` kind to its HTTP status and typed body.
fn error_response(err: GatewayError) -> Response {
    let status = match &err {
        GatewayError::InvalidPosition(_) => StatusCode::BAD_REQUEST,
        GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        GatewayError::Busy => StatusCode::SERVICE_UNAVAILABLE,
        GatewayError::EngineTimeout => StatusCode::GATEWAY_TIMEOUT,
        GatewayError::EngineFailure(_) | GatewayError::EngineUnavailable => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let retry_after_secs = match &err {
        GatewayError::RateLimited { retry_after } => {
            // Round up so "retry after" never undershoots the window.
            let mut secs = retry_after.as_secs();
            if retry_after.subsec_nanos() > 0 {
                secs += 1;
            }
            Some(secs.max(1))
        }
        _ => None,
    };

    let body = Json(ErrorResponse {
        error: err.to_string(),
        kind: err.kind().to_string(),
        retry_after_secs,
    });

    match retry_after_secs {
        Some(secs) => (status, [(header::RETRY_AFTER, secs.to_string())], body).into_response(),
        None => (status, body).into_response(),
    }
}
