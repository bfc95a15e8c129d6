//! Axum-based HTTP server.

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::{register_routes, AppState};

pub struct RpcServer {
    pub listen_addr: String,
    pub port: u16,
    pub state: AppState,
}

impl RpcServer {
    pub fn new(listen_addr: impl Into<String>, port: u16, state: AppState) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            port,
            state,
        }
    }

    /// The application router with every route registered.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind and serve until Ctrl-C.
    pub async fn start(&self) -> std::io::Result<()> {
        let addr = format!("{}:{}", self.listen_addr, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("HTTP server listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the router for `state`.
pub fn build_router(state: AppState) -> Router {
    register_routes(Router::new(), &state)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
