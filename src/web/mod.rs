//! HTTP API for the ranking engine.
//!
//! Serves:
//! - `GET /api/search?q=` - ranked course records
//! - `GET /health` - liveness and catalog size
//! - `GET /metrics` - Prometheus exposition
//!
//! # Example
//!
//! ```rust,ignore
//! use coursefind::web::WebServer;
//!
//! let server = WebServer::new(state);
//! server.start("127.0.0.1:3000".parse()?).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// HTTP server for the search API.
pub struct WebServer {
    /// Shared application state
    state: AppState,
}

impl WebServer {
    /// Create a new web server with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// The router with CORS and request tracing applied.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone()).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
    }

    /// Bind to `addr` and serve until Ctrl+C.
    pub async fn start(self, addr: SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        let ct = CancellationToken::new();
        let signal_ct = ct.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
                return;
            }
            info!("Shutdown signal received, stopping server...");
            signal_ct.cancel();
        });

        self.serve(listener, ct).await
    }

    /// Serve on an already bound listener until `ct` is cancelled.
    pub async fn serve(self, listener: TcpListener, ct: CancellationToken) -> Result<()> {
        let addr = listener
            .local_addr()
            .with_context(|| "Listener has no local address")?;
        info!("Search API listening on http://{}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { ct.cancelled().await })
            .await
            .with_context(|| "Web server failed")?;

        info!("Search API stopped");
        Ok(())
    }
}
