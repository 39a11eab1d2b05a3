#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use sea_orm::{ConnectOptions, Database};

use service::{Repo, RepoConfig, Services};

/// App over a fresh in-memory SQLite database.
pub async fn test_app() -> anyhow::Result<Router> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    models::db::create_schema(&db).await?;
    let repo = Arc::new(Repo::new(db, RepoConfig::default()));
    Ok(server::build_app(Services::new(repo)))
}
