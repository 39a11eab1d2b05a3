#![cfg(test)]
use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use uuid::Uuid;

use models::{block, parking_lot, user};

use crate::repo::{Repo, RepoConfig};

/// Fresh in-memory SQLite database with every table created.
/// One pooled connection, so the whole test sees the same database.
pub async fn memory_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    models::db::create_schema(&db).await?;
    Ok(db)
}

pub async fn memory_repo() -> Result<Arc<Repo>, anyhow::Error> {
    memory_repo_with(RepoConfig::default()).await
}

pub async fn memory_repo_with(config: RepoConfig) -> Result<Arc<Repo>, anyhow::Error> {
    Ok(Arc::new(Repo::new(memory_db().await?, config)))
}

/// A valid lot whose `created_at` is `offset_secs` after a fixed base, for ordering checks.
pub fn lot_at(name: &str, offset_secs: i64) -> parking_lot::Model {
    let base = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").expect("fixed base time");
    let at = base + ChronoDuration::seconds(offset_secs);
    parking_lot::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        address: "1 Main St".into(),
        start_time: "06:00".into(),
        end_time: "22:00".into(),
        lat: "10.77".into(),
        long: "106.70".into(),
        is_active: true,
        company_id: Uuid::nil(),
        created_at: at,
        updated_at: at,
    }
}

pub fn block_for(parking_lot_id: Uuid, code: &str) -> block::Model {
    let now = Utc::now().fixed_offset();
    block::Model {
        id: Uuid::new_v4(),
        parking_lot_id,
        code: code.to_string(),
        description: String::new(),
        created_at: now,
        updated_at: now,
    }
}

pub async fn insert_user(db: &DatabaseConnection, phone: &str) -> Result<user::Model, anyhow::Error> {
    let now = Utc::now().fixed_offset();
    let am = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        phone_number: Set(user::normalize_phone(phone)),
        display_name: Set("Driver".into()),
        password_hash: Set(String::new()),
        role: Set("user".into()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}
