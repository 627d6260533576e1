//! towerd - Dice Tower roll server daemon
//!
//! Evaluates dice notation for the dice tower UI and keeps the tray
//! selection and roll history it displays.

pub mod api;
pub mod config;
pub mod dice;
pub mod history;
pub mod tray;

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use api::AppState;
pub use config::Config;

/// The towerd server instance
pub struct Server {
    config: Config,
    state: AppState,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        let state = AppState::new(&config);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            config,
            state,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Get the shared application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router
    fn router(&self) -> Router {
        let router = api::router(self.state.clone()).layer(TraceLayer::new_for_http());
        if self.config.cors {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Run the server until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        info!(max_dice = self.config.max_dice, "towerd listening on {}", local_addr);

        let router = self.router();
        let mut shutdown_rx = self.shutdown_rx.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_rx.changed().await.ok();
            })
            .await?;

        info!("towerd shutdown complete");
        Ok(())
    }

    /// Signal the server to shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }
}
