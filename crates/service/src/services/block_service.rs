use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use models::block::{self, BlockReq, ListBlockReq, ListBlockRes};

use super::trimmed;
use crate::context::Ctx;
use crate::errors::ServiceError;
use crate::merge::ApplyUpdate;
use crate::repo::Repo;

pub struct BlockService {
    repo: Arc<Repo>,
}

impl BlockService {
    pub fn new(repo: Arc<Repo>) -> Self { Self { repo } }

    /// The parent parking lot must exist.
    #[instrument(skip(self, ctx, req))]
    pub async fn create(&self, ctx: &Ctx, req: BlockReq) -> Result<block::Model, ServiceError> {
        let parking_lot_id = req
            .parking_lot_id
            .filter(|id| !id.is_nil())
            .ok_or_else(|| ServiceError::missing("parking_lot_id"))?;
        let now = Utc::now().fixed_offset();
        let block = block::Model {
            id: Uuid::new_v4(),
            parking_lot_id,
            code: trimmed(req.code),
            description: req.description.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        block.validate()?;
        self.repo.get_one_parking_lot(ctx, parking_lot_id).await?;
        let created = self.repo.create_block(ctx, block).await?;
        info!(block_id = %created.id, parking_lot_id = %parking_lot_id, "block_created");
        Ok(created)
    }

    pub async fn get_one(&self, ctx: &Ctx, id: Uuid) -> Result<block::Model, ServiceError> {
        Ok(self.repo.get_one_block(ctx, id).await?)
    }

    pub async fn get_list(&self, ctx: &Ctx, req: ListBlockReq) -> Result<ListBlockRes, ServiceError> {
        Ok(self.repo.get_list_block(ctx, &req).await?)
    }

    #[instrument(skip(self, ctx, req))]
    pub async fn update(&self, ctx: &Ctx, id: Uuid, req: BlockReq) -> Result<block::Model, ServiceError> {
        let mut block = self.repo.get_one_block(ctx, id).await?;
        let parent = block.parking_lot_id;
        req.apply_to(&mut block);
        block.updated_at = Utc::now().fixed_offset();
        block.validate()?;
        if block.parking_lot_id != parent {
            self.repo.get_one_parking_lot(ctx, block.parking_lot_id).await?;
        }
        Ok(self.repo.update_block(ctx, block).await?)
    }

    /// Removes the block and its slots, all or nothing.
    #[instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &Ctx, id: Uuid) -> Result<(), ServiceError> {
        let slots = self
            .repo
            .transaction_extended(ctx, move |tx, ctx| {
                Box::pin(async move {
                    let slots = tx.delete_parking_slots_by_block(ctx, id).await?;
                    tx.delete_block(ctx, id).await?;
                    Ok(slots)
                })
            })
            .await?;
        info!(block_id = %id, slots, "block_deleted");
        Ok(())
    }
}
