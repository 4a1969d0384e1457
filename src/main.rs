use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use chess_gateway::admission::RateLimiter;
use chess_gateway::config::GatewayConfig;
use chess_gateway::engine::{EngineGuard, GreedyEngine};
use chess_gateway::gateway::handlers::{handle_best_move, handle_engine_reset, handle_health};
use chess_gateway::gateway::service::MoveService;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} --bind <addr:port> [options]", args[0]);
        eprintln!("Options:");
        eprintln!("  --rate-limit <n>          requests admitted per window (default 10)");
        eprintln!("  --rate-window-secs <n>    rate window length (default 60)");
        eprintln!("  --engine-timeout-ms <n>   per-call engine budget (default 10000)");
        eprintln!("  --depth <n>               engine search depth (default 3)");
        eprintln!("  --queue-depth <n>         engine wait queue size (default 8)");
        eprintln!("Example: {} --bind 127.0.0.1:8000 --rate-limit 10", args[0]);

        std::process::exit(1);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut config = GatewayConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--rate-limit" => {
                config.rate_limit_max = args[i + 1].parse()?;
                i += 2;
            }
            "--rate-window-secs" => {
                config.rate_limit_window = Duration::from_secs(args[i + 1].parse()?);
                i += 2;
            }
            "--engine-timeout-ms" => {
                config.engine_timeout = Duration::from_millis(args[i + 1].parse()?);
                i += 2;
            }
            "--depth" => {
                config.search_depth = args[i + 1].parse()?;
                i += 2;
            }
            "--queue-depth" => {
                config.engine_queue_depth = args[i + 1].parse()?;
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bind_addr = bind_addr.expect("--bind is required");

    tracing::info!("Starting chess gateway on {}", bind_addr);
    tracing::info!(
        "Rate limit {}/{:?}, engine timeout {:?}, depth {}, queue depth {}",
        config.rate_limit_max,
        config.rate_limit_window,
        config.engine_timeout,
        config.search_depth,
        config.engine_queue_depth
    );

    // 1. Shared components: one limiter and one engine guard for the process.
    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max,
        config.rate_limit_window,
    ));
    let guard = EngineGuard::new(
        Box::new(GreedyEngine),
        config.engine_timeout,
        config.engine_queue_depth,
    );

    // 2. Request pipeline:
    let service = MoveService::new(limiter, guard, config);

    // 3. HTTP Router:
    let app = Router::new()
        .route("/bestmove", post(handle_best_move))
        .route("/health", get(handle_health))
        .route("/internal/engine/reset", post(handle_engine_reset))
        .layer(Extension(service));

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
