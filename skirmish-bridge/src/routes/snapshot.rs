//! Snapshot intake and derived views

use super::ApiError;
use crate::state::ServerState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use skirmish_core::{ActionSpace, GameState};
use std::sync::Arc;

/// Replace the current snapshot
pub async fn receive_state(
    State(state): State<Arc<ServerState>>,
    Json(game): Json<GameState>,
) -> Json<Value> {
    let mut client = state.client_mut();
    client.session.receive_state(game);
    let version = client.sync_version();

    Json(json!({
        "success": true,
        "version": version
    }))
}

/// Current per-cell affordances
pub async fn get_action_space(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ActionSpace>, ApiError> {
    let client = state.client();
    Ok(Json(client.session.action_space()?))
}

/// Open menu, if any
pub async fn get_menu(State(state): State<Arc<ServerState>>) -> Json<Value> {
    let client = state.client();
    Json(json!({
        "menu": client.session.menu(),
        "version": client.version
    }))
}
