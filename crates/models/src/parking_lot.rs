use sea_orm::entity::prelude::*;
use uuid::Uuid;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{block, errors::ModelError, query::{Page, PageQuery}};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_lot")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub address: String,
    pub start_time: String,
    pub end_time: String,
    pub lat: String,
    pub long: String,
    pub is_active: bool,
    pub company_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Block,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Block => Entity::has_many(block::Entity).into() }
    }
}

impl Related<block::Entity> for Entity {
    fn to() -> RelationDef { Relation::Block.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Create/update payload. Every field is optional so the same shape serves sparse updates.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ParkingLotReq {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub lat: Option<String>,
    pub long: Option<String>,
    pub is_active: Option<bool>,
    pub company_id: Option<Uuid>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParkingLotReq {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub company_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl ListParkingLotReq {
    pub fn page_query(&self) -> PageQuery {
        PageQuery { page: self.page, page_size: self.page_size, sort: self.sort.clone() }
    }
}

pub type ListParkingLotRes = Page<Model>;

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

/// Day times are `HH:MM`, 24h clock.
pub fn validate_day_time(field: &str, value: &str) -> Result<(), ModelError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| ModelError::Validation(format!("{field} must be HH:MM")))
}

pub fn validate_coordinate(field: &str, value: &str, limit: f64) -> Result<(), ModelError> {
    if value.is_empty() {
        return Ok(());
    }
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= limit => Ok(()),
        _ => Err(ModelError::Validation(format!("{field} must be a number within ±{limit}"))),
    }
}

impl Model {
    /// Checks applied to the entity right before it is written.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_day_time("start_time", &self.start_time)?;
        validate_day_time("end_time", &self.end_time)?;
        validate_coordinate("lat", &self.lat, 90.0)?;
        validate_coordinate("long", &self.long, 180.0)?;
        Ok(())
    }
}
