//! Gateway server setup
//!
//! Provides the WebSocket server configuration and routes.

mod gateway;
mod notifications;
mod state;

pub use gateway::gateway_handler;
pub use notifications::notifications_handler;
pub use state::GatewayState;

use crate::broker::TopicBroker;
use axum::{routing::get, Router};
use readshare_common::{AppConfig, AppError};
use readshare_realtime::{
    IdleSweeper, NotificationHub, PresenceLifecycleCoordinator, PresenceRegistry,
    RoomChannelRegistry, SessionBindings,
};
use readshare_store::{InMemoryChatRecordStore, InMemoryMemberDirectory};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ws/gateway", get(gateway_handler))
        .route("/ws/notifications/:room_id", get(notifications_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
///
/// Also starts the idle sweeper; callers get a state whose background
/// eviction is already running.
pub fn create_gateway_state(config: AppConfig) -> GatewayState {
    // Store collaborators
    let directory = Arc::new(InMemoryMemberDirectory::new());
    let records = Arc::new(InMemoryChatRecordStore::new());

    // Transport-side registries
    let channels = Arc::new(RoomChannelRegistry::new());
    let broker = Arc::new(TopicBroker::new());

    let hub = Arc::new(NotificationHub::new(broker.clone(), channels.clone()));

    // Presence tracking
    let registry = Arc::new(PresenceRegistry::new());
    let sessions = Arc::new(SessionBindings::new());

    let coordinator = Arc::new(PresenceLifecycleCoordinator::new(
        registry,
        sessions,
        directory.clone(),
        records,
        hub.clone(),
    ));

    let sweeper = Arc::new(IdleSweeper::new(
        coordinator.clone(),
        config.presence.sweep_interval(),
        config.presence.idle_timeout(),
    ));
    sweeper.clone().start();

    GatewayState::new(coordinator, hub, broker, channels, sweeper, directory, config)
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/ws/gateway", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));

    let state = create_gateway_state(config);
    let app = create_app(state);

    run_server(app, addr).await
}
