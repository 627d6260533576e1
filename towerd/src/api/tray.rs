//! Tray API - die buttons, notation input, presets and clear

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ApiError, AppState};
use crate::dice::Die;
use crate::history::HistoryEntry;
use crate::tray::{Preset, Tray, PRESETS};

/// Tray state as the UI renders it
#[derive(Debug, Serialize)]
struct TrayResponse {
    notation: String,
    /// Face count -> number of dice selected
    counts: BTreeMap<u32, u32>,
    preset: Option<&'static str>,
}

impl From<&Tray> for TrayResponse {
    fn from(tray: &Tray) -> Self {
        Self {
            notation: tray.notation().to_string(),
            counts: tray
                .counts()
                .iter()
                .map(|(die, &count)| (die.faces(), count))
                .collect(),
            preset: tray.preset(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NotationRequest {
    notation: String,
}

/// Build the tray router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tray", get(get_tray))
        .route("/tray/die/{faces}", post(add_die))
        .route("/tray/notation", put(set_notation))
        .route("/tray/preset/{id}", post(load_preset))
        .route("/tray/clear", post(clear_tray))
        .route("/tray/roll", post(roll_tray))
        .route("/presets", get(list_presets))
}

/// GET /tray
async fn get_tray(State(state): State<AppState>) -> Json<TrayResponse> {
    let tray = state.tray.read().await;
    Json(TrayResponse::from(&*tray))
}

/// POST /tray/die/{faces}
/// Same as clicking a die button
async fn add_die(
    State(state): State<AppState>,
    Path(faces): Path<u32>,
) -> Result<Json<TrayResponse>, ApiError> {
    let die = Die::try_from(faces)?;
    let mut tray = state.tray.write().await;
    let count = tray.add_die(die);
    debug!(%die, count, "die added to tray");
    Ok(Json(TrayResponse::from(&*tray)))
}

/// PUT /tray/notation
async fn set_notation(
    State(state): State<AppState>,
    Json(request): Json<NotationRequest>,
) -> Json<TrayResponse> {
    let mut tray = state.tray.write().await;
    tray.set_notation(&request.notation);
    Json(TrayResponse::from(&*tray))
}

/// POST /tray/preset/{id}
async fn load_preset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrayResponse>, ApiError> {
    let mut tray = state.tray.write().await;
    tray.load_preset(&id)?;
    Ok(Json(TrayResponse::from(&*tray)))
}

/// POST /tray/clear
async fn clear_tray(State(state): State<AppState>) -> Json<TrayResponse> {
    let mut tray = state.tray.write().await;
    tray.clear();
    Json(TrayResponse::from(&*tray))
}

/// POST /tray/roll
/// Rolls whatever the tray currently holds
async fn roll_tray(State(state): State<AppState>) -> Result<Json<HistoryEntry>, ApiError> {
    let expression = state.tray.read().await.expression()?;
    Ok(Json(state.roll(&expression)?))
}

/// GET /presets
async fn list_presets() -> Json<&'static [Preset]> {
    Json(PRESETS)
}
