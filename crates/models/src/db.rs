use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::{block, parking_lot, parking_slot, user, vehicle};

/// Open the shared pool. The data-access layer borrows from it per call and never pools on its own.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    info!(
        max_connections = cfg.max_connections,
        min_connections = cfg.min_connections,
        sqlx_logging = cfg.sqlx_logging,
        "connecting database pool"
    );
    Database::connect(opt).await
}

/// Create every table straight from the entity definitions, parents first.
/// Production schemas come from the `migration` crate; this serves throwaway
/// databases such as in-memory SQLite.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmts = vec![
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(parking_lot::Entity),
        schema.create_table_from_entity(block::Entity),
        schema.create_table_from_entity(parking_slot::Entity),
        schema.create_table_from_entity(vehicle::Entity),
    ];
    for stmt in stmts.iter_mut() {
        stmt.if_not_exists();
        db.execute(backend.build(&*stmt)).await?;
    }
    Ok(())
}
