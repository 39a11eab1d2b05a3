use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::block::{self, ListBlockReq, ListBlockRes};

use super::ops::mark_all_set;
use super::{classify, RepoError, Repository};
use crate::context::Ctx;

impl<C: ConnectionTrait> Repository<C> {
    pub async fn create_block(&self, ctx: &Ctx, block: block::Model) -> Result<block::Model, RepoError> {
        let id = block.id;
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(mark_all_set(block::ActiveModel::from(block)).insert(scoped.conn()))
            .await
            .map_err(|e| classify("Block.Create", e, "id", &id))
    }

    pub async fn get_one_block(&self, ctx: &Ctx, id: Uuid) -> Result<block::Model, RepoError> {
        self.fetch_one::<block::Entity>(ctx, id)
            .await
            .map_err(|e| classify("Block.GetOne", e, "id", &id))
    }

    pub async fn get_list_block(&self, ctx: &Ctx, req: &ListBlockReq) -> Result<ListBlockRes, RepoError> {
        let mut select = block::Entity::find();
        if let Some(parking_lot_id) = req.parking_lot_id {
            select = select.filter(block::Column::ParkingLotId.eq(parking_lot_id));
        }
        if let Some(search) = req.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            select = select.filter(block::Column::Code.contains(search));
        }
        self.fetch_page(ctx, select, &req.page_query())
            .await
            .map_err(|e| classify("Block.GetList", e, "page", &req.page))
    }

    pub async fn update_block(&self, ctx: &Ctx, block: block::Model) -> Result<block::Model, RepoError> {
        let id = block.id;
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(mark_all_set(block::ActiveModel::from(block)).update(scoped.conn()))
            .await
            .map_err(|e| classify("Block.Update", e, "id", &id))
    }

    pub async fn delete_block(&self, ctx: &Ctx, id: Uuid) -> Result<(), RepoError> {
        self.delete_one::<block::Entity>(ctx, id)
            .await
            .map_err(|e| classify("Block.Delete", e, "id", &id))
    }

    /// Ids of every block under a parking lot, oldest first.
    pub async fn list_block_ids_by_parking_lot(&self, ctx: &Ctx, parking_lot_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let (scoped, _release) = self.scope(ctx);
        let blocks = scoped
            .run(
                block::Entity::find()
                    .filter(block::Column::ParkingLotId.eq(parking_lot_id))
                    .order_by_asc(block::Column::CreatedAt)
                    .all(scoped.conn()),
            )
            .await
            .map_err(|e| classify("Block.ListIdsByParkingLot", e, "parking_lot_id", &parking_lot_id))?;
        Ok(blocks.into_iter().map(|b| b.id).collect())
    }

    /// Returns the number of removed blocks; zero is not an error.
    pub async fn delete_blocks_by_parking_lot(&self, ctx: &Ctx, parking_lot_id: Uuid) -> Result<u64, RepoError> {
        let (scoped, _release) = self.scope(ctx);
        let res = scoped
            .run(
                block::Entity::delete_many()
                    .filter(block::Column::ParkingLotId.eq(parking_lot_id))
                    .exec(scoped.conn()),
            )
            .await
            .map_err(|e| classify("Block.DeleteByParkingLot", e, "parking_lot_id", &parking_lot_id))?;
        Ok(res.rows_affected)
    }
}
