//! HTTP surface of the dashboard.

pub mod handlers;
pub mod sessions;

pub use sessions::{SessionStore, SharedSession};

use crate::config::Config;
use crate::data_access::Database;
use crate::error::AppError;
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

/// Shared router state: the database handle and the session table.
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(database: Database, max_sessions: usize) -> Self {
        Self {
            database,
            sessions: SessionStore::new(max_sessions),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/select/division", post(handlers::select_division))
        .route("/select/season", post(handlers::select_season))
        .route("/select/team", post(handlers::select_team))
        .route("/load", post(handlers::load))
        .route("/api/view", get(handlers::api_view))
        .route("/api/events", post(handlers::api_events))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}

/// Binds the configured address and serves until SIGINT or SIGTERM.
pub async fn serve(config: &Config, database: Database) -> Result<(), AppError> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::server_error(format!("Failed to bind {address}: {e}")))?;
    info!("Dashboard listening on http://{address}");

    let app = build_router(AppState::new(database, config.server.max_sessions));
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| AppError::server_error(format!("Server failed: {e}")))?;

    info!("Dashboard stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
