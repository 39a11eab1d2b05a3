use sea_orm::entity::prelude::*;
use sea_orm::sea_query::ForeignKeyAction;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, parking_lot, parking_slot, query::{Page, PageQuery}};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "block")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub parking_lot_id: Uuid,
    pub code: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ParkingLot,
    ParkingSlot,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ParkingLot => Entity::belongs_to(parking_lot::Entity)
                .from(Column::ParkingLotId)
                .to(parking_lot::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::ParkingSlot => Entity::has_many(parking_slot::Entity).into(),
        }
    }
}

impl Related<parking_lot::Entity> for Entity {
    fn to() -> RelationDef { Relation::ParkingLot.def() }
}

impl Related<parking_slot::Entity> for Entity {
    fn to() -> RelationDef { Relation::ParkingSlot.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BlockReq {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub parking_lot_id: Option<Uuid>,
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListBlockReq {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub parking_lot_id: Option<Uuid>,
}

impl ListBlockReq {
    pub fn page_query(&self) -> PageQuery {
        PageQuery { page: self.page, page_size: self.page_size, sort: self.sort.clone() }
    }
}

pub type ListBlockRes = Page<Model>;

pub fn validate_code(code: &str) -> Result<(), ModelError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ModelError::Validation("code required".into()));
    }
    if code.len() > 64 {
        return Err(ModelError::Validation("code must be at most 64 characters".into()));
    }
    Ok(())
}

impl Model {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_code(&self.code)?;
        if self.parking_lot_id.is_nil() {
            return Err(ModelError::Validation("parking_lot_id required".into()));
        }
        Ok(())
    }
}
