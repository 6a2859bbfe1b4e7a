//! Skirmish Bridge - HTTP surface for an external renderer
//!
//! This crate exposes a client session over HTTP:
//! - Snapshot intake and action space queries
//! - Pointer input (click, hover, button, cancel)
//! - Outbox of submitted player responses
//! - Pixel/hex geometry helpers
//! - Static file serving for the renderer

mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use skirmish_core::ClientConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub use state::{ClientHandle, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Hex size used for pixel conversion
    pub hex_size: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ClientConfig::default().into()
    }
}

impl From<ClientConfig> for ServerConfig {
    fn from(config: ClientConfig) -> Self {
        Self {
            port: config.port,
            static_dir: config.static_dir.to_string_lossy().into_owned(),
            hex_size: config.hex_size,
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Snapshot and derived views
        .route("/api/state", post(routes::snapshot::receive_state))
        .route("/api/action-space", get(routes::snapshot::get_action_space))
        .route("/api/menu", get(routes::snapshot::get_menu))
        // Pointer input
        .route("/api/click", post(routes::input::click))
        .route("/api/side-item", post(routes::input::click_side_item))
        .route("/api/hover", post(routes::input::hover))
        .route("/api/button", post(routes::input::press_button))
        .route("/api/cancel", post(routes::input::cancel))
        // Outbox
        .route("/api/responses", get(routes::input::drain_responses))
        // Geometry
        .route("/api/locate", post(routes::geometry::locate))
        .route("/api/geometry/ring", get(routes::geometry::get_ring))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(config.hex_size));
    let router = create_router(&config, state);

    tracing::info!("Skirmish bridge starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
