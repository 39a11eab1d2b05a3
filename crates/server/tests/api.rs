mod support;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use support::test_app;

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder.header(header::CONTENT_TYPE, "application/json").body(Body::from(v.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

async fn create_lot(app: &Router, name: &str) -> anyhow::Result<Value> {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/parking-lots",
        Some(json!({ "name": name, "address": "7 Dock St", "start_time": "07:00", "end_time": "21:00" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    Ok(body)
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = test_app().await?;
    let (status, body) = call(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn parking_lot_crud_round() -> anyhow::Result<()> {
    let app = test_app().await?;
    let lot = create_lot(&app, "Dockside").await?;
    let id = lot["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = call(&app, Method::GET, &format!("/api/v1/parking-lots/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Dockside");

    let (status, body) = call(&app, Method::PUT, &format!("/api/v1/parking-lots/{id}"), Some(json!({ "end_time": "23:00" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["end_time"], "23:00");
    assert_eq!(body["start_time"], "07:00");
    assert_eq!(body["name"], "Dockside");

    let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/parking-lots/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, Method::GET, &format!("/api/v1/parking-lots/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "record not found");
    Ok(())
}

#[tokio::test]
async fn list_returns_data_and_meta() -> anyhow::Result<()> {
    let app = test_app().await?;
    for name in ["A", "B", "C"] {
        create_lot(&app, name).await?;
    }
    let (status, body) = call(&app, Method::GET, "/api/v1/parking-lots?page=2&page_size=2&sort=name%20asc", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({ "page": 2, "page_size": 2, "total_pages": 2, "total_rows": 3 }));
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["name"], "C");
    Ok(())
}

#[tokio::test]
async fn validation_failures_are_bad_request() -> anyhow::Result<()> {
    let app = test_app().await?;
    let (status, body) = call(&app, Method::POST, "/api/v1/parking-lots", Some(json!({ "name": "Late", "start_time": "7pm" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");

    let (status, _) = call(&app, Method::POST, "/api/v1/blocks", Some(json!({ "code": "A" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn block_requires_existing_lot_and_cascades() -> anyhow::Result<()> {
    let app = test_app().await?;
    let (status, _) = call(&app, Method::POST, "/api/v1/blocks", Some(json!({ "parking_lot_id": Uuid::new_v4(), "code": "A" }))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let lot = create_lot(&app, "Tower").await?;
    let (status, block) = call(&app, Method::POST, "/api/v1/blocks", Some(json!({ "parking_lot_id": lot["id"], "code": "A" }))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call(&app, Method::POST, "/api/v1/parking-slots", Some(json!({ "block_id": block["id"], "name": "A-01" }))).await?;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/v1/parking-slots?block_id={}", block["id"].as_str().unwrap_or_default());
    let (_, slots) = call(&app, Method::GET, &uri, None).await?;
    assert_eq!(slots["meta"]["total_rows"], 1);

    let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/parking-lots/{}", lot["id"].as_str().unwrap_or_default()), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, slots) = call(&app, Method::GET, "/api/v1/parking-slots", None).await?;
    assert_eq!(slots["meta"]["total_rows"], 0);
    let (_, blocks) = call(&app, Method::GET, "/api/v1/blocks", None).await?;
    assert_eq!(blocks["meta"]["total_rows"], 0);
    Ok(())
}

#[tokio::test]
async fn vehicle_plate_is_normalized() -> anyhow::Result<()> {
    let app = test_app().await?;
    let (status, v) = call(&app, Method::POST, "/api/v1/vehicles", Some(json!({ "license_plate": "59c1-234.56", "vehicle_type": "car" }))).await?;
    assert_eq!(status, StatusCode::CREATED, "{v}");
    assert_eq!(v["license_plate"], "59C1-234.56");

    let (status, page) = call(&app, Method::GET, "/api/v1/vehicles?search=59c1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total_rows"], 1);
    Ok(())
}
