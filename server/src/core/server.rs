//! HTTP server
//!
//! Assembles the axum router, applies the shared layers and runs until
//! ctrl-c.

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::core::config::Config;
use crate::core::state::ServerState;
use crate::utils::AppError;

/// Build the application router. Kept separate from [`Server`] so tests can
/// drive it with `tower::ServiceExt::oneshot` against an in-memory state.
pub fn build_app() -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::menu::router())
        .merge(api::reservations::router())
        .merge(api::orders::router())
        .merge(api::gallery::router())
        .merge(api::contact::router())
        .merge(api::qr_codes::router())
        .merge(api::notifications::router())
}

/// Access log middleware, one line per request.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    tracing::info!(
        target: "http_access",
        "{} {} {}",
        method,
        uri,
        response.status().as_u16()
    );
    response
}

pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until ctrl-c.
    pub async fn run(self) -> Result<(), AppError> {
        let app = build_app()
            .layer(middleware::from_fn(log_request))
            .layer(CorsLayer::permissive())
            .with_state(self.state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        tracing::info!(%addr, "HTTP server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    } else {
        tracing::info!("shutdown signal received");
    }
}
