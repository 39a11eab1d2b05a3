use sea_orm::entity::prelude::*;
use sea_orm::sea_query::ForeignKeyAction;
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{block, errors::ModelError, query::{Page, PageQuery}};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_slot")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub block_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Block,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Block => Entity::belongs_to(block::Entity)
                .from(Column::BlockId)
                .to(block::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<block::Entity> for Entity {
    fn to() -> RelationDef { Relation::Block.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ParkingSlotReq {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub block_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParkingSlotReq {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub block_id: Option<Uuid>,
}

impl ListParkingSlotReq {
    pub fn page_query(&self) -> PageQuery {
        PageQuery { page: self.page, page_size: self.page_size, sort: self.sort.clone() }
    }
}

pub type ListParkingSlotRes = Page<Model>;

impl Model {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        if self.block_id.is_nil() {
            return Err(ModelError::Validation("block_id required".into()));
        }
        Ok(())
    }
}
