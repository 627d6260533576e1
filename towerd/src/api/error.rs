//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::dice::NotationError;
use crate::tray::TrayError;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Tray(#[from] TrayError),

    #[error("roll uses {count} dice, limit is {max}")]
    TooManyDice { count: u32, max: u32 },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Tray(TrayError::UnknownPreset(_) | TrayError::UnknownSpecial(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Notation(_) | ApiError::Tray(_) | ApiError::TooManyDice { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, "request rejected: {}", self);
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
