use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::parking_slot::{self, ListParkingSlotReq, ListParkingSlotRes};

use super::ops::mark_all_set;
use super::{classify, RepoError, Repository};
use crate::context::Ctx;

impl<C: ConnectionTrait> Repository<C> {
    pub async fn create_parking_slot(&self, ctx: &Ctx, slot: parking_slot::Model) -> Result<parking_slot::Model, RepoError> {
        let id = slot.id;
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(mark_all_set(parking_slot::ActiveModel::from(slot)).insert(scoped.conn()))
            .await
            .map_err(|e| classify("ParkingSlot.Create", e, "id", &id))
    }

    pub async fn get_one_parking_slot(&self, ctx: &Ctx, id: Uuid) -> Result<parking_slot::Model, RepoError> {
        self.fetch_one::<parking_slot::Entity>(ctx, id)
            .await
            .map_err(|e| classify("ParkingSlot.GetOne", e, "id", &id))
    }

    pub async fn get_list_parking_slot(&self, ctx: &Ctx, req: &ListParkingSlotReq) -> Result<ListParkingSlotRes, RepoError> {
        let mut select = parking_slot::Entity::find();
        if let Some(block_id) = req.block_id {
            select = select.filter(parking_slot::Column::BlockId.eq(block_id));
        }
        if let Some(search) = req.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            select = select.filter(parking_slot::Column::Name.contains(search));
        }
        self.fetch_page(ctx, select, &req.page_query())
            .await
            .map_err(|e| classify("ParkingSlot.GetList", e, "page", &req.page))
    }

    pub async fn update_parking_slot(&self, ctx: &Ctx, slot: parking_slot::Model) -> Result<parking_slot::Model, RepoError> {
        let id = slot.id;
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(mark_all_set(parking_slot::ActiveModel::from(slot)).update(scoped.conn()))
            .await
            .map_err(|e| classify("ParkingSlot.Update", e, "id", &id))
    }

    pub async fn delete_parking_slot(&self, ctx: &Ctx, id: Uuid) -> Result<(), RepoError> {
        self.delete_one::<parking_slot::Entity>(ctx, id)
            .await
            .map_err(|e| classify("ParkingSlot.Delete", e, "id", &id))
    }

    pub async fn delete_parking_slots_by_block(&self, ctx: &Ctx, block_id: Uuid) -> Result<u64, RepoError> {
        self.delete_parking_slots_by_blocks(ctx, &[block_id]).await
    }

    /// Bulk variant for cascades over several blocks; an empty set is a no-op.
    pub async fn delete_parking_slots_by_blocks(&self, ctx: &Ctx, block_ids: &[Uuid]) -> Result<u64, RepoError> {
        if block_ids.is_empty() {
            return Ok(0);
        }
        let (scoped, _release) = self.scope(ctx);
        let res = scoped
            .run(
                parking_slot::Entity::delete_many()
                    .filter(parking_slot::Column::BlockId.is_in(block_ids.iter().copied()))
                    .exec(scoped.conn()),
            )
            .await
            .map_err(|e| classify("ParkingSlot.DeleteByBlock", e, "block_count", &block_ids.len()))?;
        Ok(res.rows_affected)
    }
}
