use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::Ctx;

use crate::state::ServerState;

pub mod blocks;
pub mod parking_lots;
pub mod parking_slots;
pub mod vehicles;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Root context for one request. Dropping the handler future (client gone)
/// drops every store call awaiting under it.
pub(crate) fn request_ctx() -> Ctx {
    Ctx::background()
}

/// Build the full application router: health plus the `/api/v1` resources.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/parking-lots", get(parking_lots::list).post(parking_lots::create))
        .route("/parking-lots/:id", get(parking_lots::get).put(parking_lots::update).delete(parking_lots::delete))
        .route("/blocks", get(blocks::list).post(blocks::create))
        .route("/blocks/:id", get(blocks::get).put(blocks::update).delete(blocks::delete))
        .route("/parking-slots", get(parking_slots::list).post(parking_slots::create))
        .route("/parking-slots/:id", get(parking_slots::get).put(parking_slots::update).delete(parking_slots::delete))
        .route("/vehicles", get(vehicles::list).post(vehicles::create))
        .route("/vehicles/:id", get(vehicles::get).put(vehicles::update).delete(vehicles::delete));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
