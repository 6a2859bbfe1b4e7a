//! Pointer input endpoints
//!
//! Every input re-derives the action space, applies one effect and reports
//! the new version so the renderer knows whether to redraw.

use super::ApiError;
use crate::state::{ClientHandle, ServerState};
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use skirmish_core::{Cc, CoreError, PlayerResponse};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ClickRequest {
    pub cc: Cc,
    #[serde(default)]
    pub action: usize,
}

#[derive(Deserialize)]
pub struct SideItemRequest {
    pub cc: Cc,
    pub item: usize,
}

#[derive(Deserialize)]
pub struct HoverRequest {
    pub cc: Cc,
}

fn apply(
    state: &ServerState,
    op: impl FnOnce(&mut ClientHandle) -> Result<(), CoreError>,
) -> Result<Json<Value>, ApiError> {
    let mut client = state.client_mut();
    op(&mut *client)?;
    let version = client.sync_version();
    Ok(Json(json!({
        "success": true,
        "version": version,
        "pending": client.session.sink().len()
    })))
}

pub async fn click(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<ClickRequest>,
) -> Result<Json<Value>, ApiError> {
    apply(&state, |client| client.session.click(req.cc, req.action))
}

pub async fn click_side_item(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SideItemRequest>,
) -> Result<Json<Value>, ApiError> {
    apply(&state, |client| client.session.click_side_item(req.cc, req.item))
}

pub async fn hover(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<HoverRequest>,
) -> Result<Json<Value>, ApiError> {
    apply(&state, |client| client.session.hover(req.cc))
}

pub async fn press_button(State(state): State<Arc<ServerState>>) -> Result<Json<Value>, ApiError> {
    apply(&state, |client| client.session.press_button())
}

pub async fn cancel(State(state): State<Arc<ServerState>>) -> Result<Json<Value>, ApiError> {
    apply(&state, |client| {
        client.session.cancel();
        Ok(())
    })
}

/// Take every response submitted since the last call
pub async fn drain_responses(State(state): State<Arc<ServerState>>) -> Json<Vec<PlayerResponse>> {
    let mut client = state.client_mut();
    let responses = client.session.drain_responses();
    if !responses.is_empty() {
        tracing::debug!(count = responses.len(), "responses drained");
    }
    Json(responses)
}
