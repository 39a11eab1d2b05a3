use sea_orm::entity::prelude::*;
use sea_orm::sea_query::ForeignKeyAction;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, query::{Page, PageQuery}, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub license_plate: String,
    pub vehicle_brand: String,
    pub vehicle_color: String,
    pub vehicle_type: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VehicleReq {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    /// Resolves the owner by phone number when `user_id` is not given.
    pub owner_phone: Option<String>,
    pub license_plate: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_color: Option<String>,
    pub vehicle_type: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListVehicleReq {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub user_id: Option<Uuid>,
}

impl ListVehicleReq {
    pub fn page_query(&self) -> PageQuery {
        PageQuery { page: self.page, page_size: self.page_size, sort: self.sort.clone() }
    }
}

pub type ListVehicleRes = Page<Model>;

/// Plates are stored upper-case without surrounding whitespace.
pub fn normalize_plate(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

pub fn validate_plate(plate: &str) -> Result<(), ModelError> {
    if plate.is_empty() {
        return Err(ModelError::Validation("license_plate required".into()));
    }
    if !plate.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == ' ') {
        return Err(ModelError::Validation("license_plate contains invalid characters".into()));
    }
    Ok(())
}

impl Model {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_plate(&self.license_plate)
    }
}
