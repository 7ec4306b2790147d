// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::assistant::Assistant;
use crate::application::live_feed::LiveFeed;
use crate::application::pond_service::PondService;
use crate::application::responder::CannedResponder;
use crate::application::session::Session;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::mock_catalog::MockCatalog;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    connect_screen, current_screen, give_feedback, health_check, list_devices, list_ponds,
    live_view, navigate, pair_device, profile, readings_overview, settings, submit_chat,
    toggle_setting, transcript,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fishmate=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;
    config.feed.to_feed_config().validate()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(MockCatalog);

    // Create services (application layer)
    let pond_service = PondService::new(repository);
    let responder = Arc::new(CannedResponder::new(config.assistant.reply_delay()));
    let assistant = Assistant::new(config.assistant.greeting.clone(), responder);
    let live_feed = LiveFeed::new();
    let session = Session::new(
        live_feed.clone(),
        config.feed.to_feed_config(),
        config.connect.delays(),
    );

    // Create application state
    let state = Arc::new(AppState {
        pond_service,
        assistant,
        live_feed,
        session: Mutex::new(session),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/navigation", get(current_screen))
        .route("/navigation/:screen", post(navigate))
        .route("/ponds", get(list_ponds))
        .route("/devices", get(list_devices))
        .route("/connect", get(connect_screen))
        .route("/connect/:device_id", post(pair_device))
        .route("/readings", get(readings_overview))
        .route("/readings/feedback/:choice", post(give_feedback))
        .route("/settings", get(settings))
        .route("/settings/:toggle", post(toggle_setting))
        .route("/profile", get(profile))
        .route("/live", get(live_view))
        .route("/chat", get(transcript).post(submit_chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start server
    let addr = config.server.bind;
    tracing::info!("Starting fishmate on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the live feed and any pairing attempt before exiting
    state.session.lock().await.close();
    tracing::info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
