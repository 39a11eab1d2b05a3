use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use uuid::Uuid;

use models::vehicle::{self, ListVehicleReq, ListVehicleRes, VehicleReq};

use super::request_ctx;
use crate::{errors::ApiError, state::ServerState};

pub async fn list(State(state): State<ServerState>, Query(q): Query<ListVehicleReq>) -> Result<Json<ListVehicleRes>, ApiError> {
    Ok(Json(state.services.vehicles.get_list(&request_ctx(), q).await?))
}

pub async fn create(State(state): State<ServerState>, Json(input): Json<VehicleReq>) -> Result<(StatusCode, Json<vehicle::Model>), ApiError> {
    let vehicle = state.services.vehicles.create(&request_ctx(), input).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<vehicle::Model>, ApiError> {
    Ok(Json(state.services.vehicles.get_one(&request_ctx(), id).await?))
}

pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, Json(input): Json<VehicleReq>) -> Result<Json<vehicle::Model>, ApiError> {
    Ok(Json(state.services.vehicles.update(&request_ctx(), id, input).await?))
}

pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    state.services.vehicles.delete(&request_ctx(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
