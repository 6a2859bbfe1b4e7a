//! Geometry helpers for the renderer

use crate::state::ServerState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use skirmish_core::{ring, Cc};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct LocateRequest {
    pub x: f64,
    pub y: f64,
}

#[derive(Serialize)]
pub struct LocateResponse {
    pub cc: Cc,
    pub key: String,
    /// Pixel center of the located hex
    pub center: [f64; 2],
    pub on_board: bool,
}

/// Hex under a pixel position
pub async fn locate(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<LocateRequest>,
) -> Json<LocateResponse> {
    let cc = state.layout.from_pixel(req.x, req.y);
    let (cx, cy) = state.layout.to_pixel(cc);
    let on_board = state
        .client()
        .session
        .state()
        .is_some_and(|game| game.map.contains(cc));

    Json(LocateResponse {
        cc,
        key: cc.key(),
        center: [cx, cy],
        on_board,
    })
}

#[derive(Deserialize)]
pub struct RingParams {
    #[serde(default)]
    pub r: i32,
    #[serde(default)]
    pub h: i32,
    pub radius: u32,
}

#[derive(Serialize)]
pub struct RingResponse {
    pub center: Cc,
    pub radius: u32,
    pub cells: Vec<Cc>,
}

/// Largest ring radius the endpoint will enumerate
pub const MAX_RING_RADIUS: u32 = 256;

/// Largest absolute center coordinate accepted by the ring endpoint
pub const MAX_RING_COORD: i32 = 1 << 20;

/// Cells at exactly `radius` from a center, in ring order
pub async fn get_ring(
    Query(params): Query<RingParams>,
) -> Result<Json<RingResponse>, (StatusCode, Json<Value>)> {
    if params.radius > MAX_RING_RADIUS {
        return Err(bad_request(format!(
            "radius {} exceeds the maximum of {}",
            params.radius, MAX_RING_RADIUS
        )));
    }
    if params.r.unsigned_abs() > MAX_RING_COORD as u32
        || params.h.unsigned_abs() > MAX_RING_COORD as u32
    {
        return Err(bad_request(format!(
            "center ({}, {}) is outside +/-{}",
            params.r, params.h, MAX_RING_COORD
        )));
    }

    let center = Cc::new(params.r, params.h);
    Ok(Json(RingResponse {
        center,
        radius: params.radius,
        cells: ring(params.radius, center),
    }))
}

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    tracing::warn!(%message, "ring request rejected");
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}
