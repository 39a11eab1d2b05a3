use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use tracing::info;
use uuid::Uuid;

use models::parking_lot::{self, ListParkingLotReq, ListParkingLotRes, ParkingLotReq};

use super::request_ctx;
use crate::{errors::ApiError, state::ServerState};

pub async fn list(State(state): State<ServerState>, Query(q): Query<ListParkingLotReq>) -> Result<Json<ListParkingLotRes>, ApiError> {
    let page = state.services.parking_lots.get_list(&request_ctx(), q).await?;
    info!(count = page.data.len(), total = page.meta.total_rows, "list parking lots");
    Ok(Json(page))
}

pub async fn create(State(state): State<ServerState>, Json(input): Json<ParkingLotReq>) -> Result<(StatusCode, Json<parking_lot::Model>), ApiError> {
    let lot = state.services.parking_lots.create(&request_ctx(), input).await?;
    Ok((StatusCode::CREATED, Json(lot)))
}

pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<parking_lot::Model>, ApiError> {
    Ok(Json(state.services.parking_lots.get_one(&request_ctx(), id).await?))
}

pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, Json(input): Json<ParkingLotReq>) -> Result<Json<parking_lot::Model>, ApiError> {
    Ok(Json(state.services.parking_lots.update(&request_ctx(), id, input).await?))
}

pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    state.services.parking_lots.delete(&request_ctx(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
