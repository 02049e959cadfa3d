//! Lighthouse Bot - find the lighthouse nearest to you
//!
//! A chat bot that walks a user through country, state and location, then
//! pages through the five closest lighthouses.

mod api;
mod catalog;
mod config;
mod geo;
mod ranking;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use catalog::Catalog;
use config::BotConfig;
use runtime::{TracingTransport, SessionManager};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
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
                .unwrap_or_else(|_| "lighthouse_bot=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = BotConfig::from_env();
    tracing::info!(?config, "Starting the bot server");

    // Reference data is loaded once and shared read-only
    let catalog = Arc::new(Catalog::load(&config.data_dir)?);

    let sessions = SessionManager::new(
        catalog,
        Arc::new(TracingTransport::new()),
        config.session_queue,
    );
    let state = AppState::new(sessions);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Lighthouse Bot listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
