//! `MindEase` - wellness companion backend
//!
//! Serves a scripted, keyword-driven support chat alongside a mood journal
//! and guided breathing patterns.

mod api;
mod calm;
mod config;
mod db;
mod dialogue;
mod runtime;
mod session;
mod sound;

use api::{create_router, AppState};
use config::AppConfig;
use db::Database;
use runtime::RandomDelay;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindease=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env();

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&config.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %config.db_path, "Opening mood journal");
    let db = Database::open(&config.db_path)?;

    tracing::info!(
        think_min = ?config.think_min,
        think_max = ?config.think_max,
        session_idle = ?config.session_idle,
        "Companion pacing configured"
    );
    let state = AppState::new(
        db,
        RandomDelay::new(config.think_min, config.think_max),
        config.session_idle,
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("MindEase server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
