//! API server implementation.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use probewatch_config::ServerConfig;
use probewatch_core::JobStore;
use probewatch_worker::Fetcher;

use crate::error::ApiError;
use crate::http::routes::create_router;
use crate::state::AppState;

/// The API server.
///
/// Owns the shared state handed to every request. On shutdown it stops
/// accepting connections, drains in-flight requests and then stops every
/// periodic probe.
pub struct ApiServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(config: ServerConfig, store: Arc<dyn JobStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        let state = AppState::new(store, fetcher).with_request_max_bytes(config.request_max_bytes);
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, ApiError> {
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        Ok(listener)
    }

    /// Serve requests on `listener` until `shutdown` resolves.
    pub async fn serve<S>(&self, listener: TcpListener, shutdown: S) -> Result<(), ApiError>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let app = create_router(self.state.clone());

        info!("API server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        let stopped = self.state.fetcher.stop_all();
        info!("API server stopped ({} probe activities cancelled)", stopped);
        Ok(())
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<S>(&self, shutdown: S) -> Result<(), ApiError>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }
}
