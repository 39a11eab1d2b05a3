use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use uuid::Uuid;

use models::parking_slot::{self, ListParkingSlotReq, ListParkingSlotRes, ParkingSlotReq};

use super::request_ctx;
use crate::{errors::ApiError, state::ServerState};

pub async fn list(State(state): State<ServerState>, Query(q): Query<ListParkingSlotReq>) -> Result<Json<ListParkingSlotRes>, ApiError> {
    Ok(Json(state.services.parking_slots.get_list(&request_ctx(), q).await?))
}

pub async fn create(State(state): State<ServerState>, Json(input): Json<ParkingSlotReq>) -> Result<(StatusCode, Json<parking_slot::Model>), ApiError> {
    let slot = state.services.parking_slots.create(&request_ctx(), input).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<parking_slot::Model>, ApiError> {
    Ok(Json(state.services.parking_slots.get_one(&request_ctx(), id).await?))
}

pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, Json(input): Json<ParkingSlotReq>) -> Result<Json<parking_slot::Model>, ApiError> {
    Ok(Json(state.services.parking_slots.update(&request_ctx(), id, input).await?))
}

pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    state.services.parking_slots.delete(&request_ctx(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
