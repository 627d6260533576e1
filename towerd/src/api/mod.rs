//! HTTP API module - REST endpoints for the dice tower UI

mod error;
mod roll;
mod tray;

use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::Config;
use crate::dice::{RollExpression, RollReport};
use crate::history::{HistoryEntry, RollHistory};
use crate::tray::Tray;
pub use error::{ApiError, ErrorResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tray: Arc<RwLock<Tray>>,
    pub history: Arc<RollHistory>,
    pub max_dice: u32,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            tray: Arc::new(RwLock::new(Tray::new())),
            history: Arc::new(RollHistory::new()),
            max_dice: config.max_dice,
        }
    }

    /// Roll an expression and record it in the history
    pub fn roll(&self, expression: &RollExpression) -> Result<HistoryEntry, ApiError> {
        let count = expression.dice_count();
        if count > self.max_dice {
            return Err(ApiError::TooManyDice {
                count,
                max: self.max_dice,
            });
        }

        let report = RollReport::from(expression.roll());
        debug!(notation = %report.notation, total = report.total, "rolled");
        Ok(self.history.record(report))
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .merge(tray::router())
        .merge(roll::router())
        .with_state(state)
}

/// Root endpoint
async fn root() -> impl IntoResponse {
    Json(RootResponse {
        name: "towerd",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct RootResponse {
    name: &'static str,
    version: &'static str,
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}
