use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{Repo, RepoConfig, Services};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over the given services, with CORS and request tracing.
pub fn build_app(services: Services) -> Router {
    routes::build_router(ServerState::new(services), build_cors())
}

/// Public entry: load config, migrate, and serve until the listener fails.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = configs::AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None).await?;

    let repo_config = RepoConfig::from(&cfg.query);
    info!(
        query_timeout_secs = repo_config.query_timeout.as_secs(),
        extended_query_timeout_secs = repo_config.extended_query_timeout.as_secs(),
        default_page_size = repo_config.pagination.default_page_size,
        max_page_size = repo_config.pagination.max_page_size,
        "data-access layer configured"
    );
    let app = build_app(Services::new(Arc::new(Repo::new(db, repo_config))));

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting parking api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
