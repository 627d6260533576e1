//! Roll API - direct notation rolls, specials and history

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::dice::parse;
use crate::history::HistoryEntry;
use crate::tray::Special;

/// Roll request - the notation box contents
#[derive(Debug, Deserialize)]
struct RollRequest {
    notation: String,
}

/// Build the roll router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roll", post(roll_notation))
        .route("/roll/special/{name}", post(roll_special))
        .route("/history", get(list_history))
}

/// POST /roll
/// Pressing Enter in the notation box: the text stays in the tray and is rolled
async fn roll_notation(
    State(state): State<AppState>,
    Json(request): Json<RollRequest>,
) -> Result<Json<HistoryEntry>, ApiError> {
    state.tray.write().await.set_notation(&request.notation);
    let expression = parse(&request.notation)?;
    Ok(Json(state.roll(&expression)?))
}

/// POST /roll/special/{name}
/// Advantage/disadvantage buttons roll immediately without touching the tray
async fn roll_special(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<HistoryEntry>, ApiError> {
    let special: Special = name.parse()?;
    Ok(Json(state.roll(&special.expression())?))
}

/// GET /history
/// Every roll so far, oldest first
async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.entries())
}
