//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that loads
//! configuration, builds the completion provider and balance aggregator,
//! creates the Axum router, applies middleware, and starts the HTTP server.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, stamp_req};
use crate::services::{build_provider, ChatService};
use axum::{
    routing::{get, post},
    Router,
};
use lib_core::Config;
use lib_solana::BalanceAggregator;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub balances: Arc<BalanceAggregator>,
}

impl axum::extract::FromRef<AppState> for Arc<ChatService> {
    fn from_ref(state: &AppState) -> Self {
        state.chat.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<BalanceAggregator> {
    fn from_ref(state: &AppState) -> Self {
        state.balances.clone()
    }
}

impl AppState {
    /// Build every service from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = build_provider(&config.ai, Duration::from_secs(config.http_timeout_secs))?;
        info!(" Completion provider: {} (model {})", provider.name(), config.ai.model);

        let chat = Arc::new(ChatService::new(provider, config.ai.system_prompt.clone()));
        let balances = Arc::new(BalanceAggregator::from_config(&config.chain)?);

        Ok(Self { chat, balances })
    }
}
// endregion: --- AppState

// region: --- Server Setup
/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` picks a plain level.
pub fn init_tracing() -> anyhow::Result<String> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
            _ => tracing_subscriber::EnvFilter::new("info"),
        }
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - The completion provider or balance clients cannot be built
/// - Server binding fails
pub async fn start_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = init_tracing()?;

    info!(" BRINE BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    info!(" Solana RPC: {}", config.chain.rpc_url);
    info!(" Balance indexer: {}", config.chain.indexer_url);

    let state = AppState::from_config(&config)?;
    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    use axum::http::{HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/wallet/snapshot", get(handlers::wallet::get_wallet_snapshot))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        // Comprehensive request/response logging
        .layer(axum::middleware::from_fn(log_requests))
        // Request stamping (adds request ID); outermost so the logger sees it
        .layer(axum::middleware::from_fn(stamp_req))
        // Tower HTTP trace layer for spans
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" CHAT:");
    info!("   • POST /api/chat");
    info!(" WALLET:");
    info!("   • GET  /api/wallet/snapshot?address={{pubkey}}");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
