use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use uuid::Uuid;

use models::block::{self, BlockReq, ListBlockReq, ListBlockRes};

use super::request_ctx;
use crate::{errors::ApiError, state::ServerState};

pub async fn list(State(state): State<ServerState>, Query(q): Query<ListBlockReq>) -> Result<Json<ListBlockRes>, ApiError> {
    Ok(Json(state.services.blocks.get_list(&request_ctx(), q).await?))
}

pub async fn create(State(state): State<ServerState>, Json(input): Json<BlockReq>) -> Result<(StatusCode, Json<block::Model>), ApiError> {
    let block = state.services.blocks.create(&request_ctx(), input).await?;
    Ok((StatusCode::CREATED, Json(block)))
}

pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<block::Model>, ApiError> {
    Ok(Json(state.services.blocks.get_one(&request_ctx(), id).await?))
}

pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, Json(input): Json<BlockReq>) -> Result<Json<block::Model>, ApiError> {
    Ok(Json(state.services.blocks.update(&request_ctx(), id, input).await?))
}

pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    state.services.blocks.delete(&request_ctx(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
