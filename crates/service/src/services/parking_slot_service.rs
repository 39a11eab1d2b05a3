use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use models::parking_slot::{self, ListParkingSlotReq, ListParkingSlotRes, ParkingSlotReq};

use super::trimmed;
use crate::context::Ctx;
use crate::errors::ServiceError;
use crate::merge::ApplyUpdate;
use crate::repo::Repo;

pub struct ParkingSlotService {
    repo: Arc<Repo>,
}

impl ParkingSlotService {
    pub fn new(repo: Arc<Repo>) -> Self { Self { repo } }

    #[instrument(skip(self, ctx, req))]
    pub async fn create(&self, ctx: &Ctx, req: ParkingSlotReq) -> Result<parking_slot::Model, ServiceError> {
        let block_id = req.block_id.filter(|id| !id.is_nil()).ok_or_else(|| ServiceError::missing("block_id"))?;
        let now = Utc::now().fixed_offset();
        let slot = parking_slot::Model {
            id: Uuid::new_v4(),
            block_id,
            name: trimmed(req.name),
            description: req.description.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        slot.validate()?;
        self.repo.get_one_block(ctx, block_id).await?;
        Ok(self.repo.create_parking_slot(ctx, slot).await?)
    }

    pub async fn get_one(&self, ctx: &Ctx, id: Uuid) -> Result<parking_slot::Model, ServiceError> {
        Ok(self.repo.get_one_parking_slot(ctx, id).await?)
    }

    pub async fn get_list(&self, ctx: &Ctx, req: ListParkingSlotReq) -> Result<ListParkingSlotRes, ServiceError> {
        Ok(self.repo.get_list_parking_slot(ctx, &req).await?)
    }

    #[instrument(skip(self, ctx, req))]
    pub async fn update(&self, ctx: &Ctx, id: Uuid, req: ParkingSlotReq) -> Result<parking_slot::Model, ServiceError> {
        let mut slot = self.repo.get_one_parking_slot(ctx, id).await?;
        let parent = slot.block_id;
        req.apply_to(&mut slot);
        slot.updated_at = Utc::now().fixed_offset();
        slot.validate()?;
        if slot.block_id != parent {
            self.repo.get_one_block(ctx, slot.block_id).await?;
        }
        Ok(self.repo.update_parking_slot(ctx, slot).await?)
    }

    pub async fn delete(&self, ctx: &Ctx, id: Uuid) -> Result<(), ServiceError> {
        Ok(self.repo.delete_parking_slot(ctx, id).await?)
    }
}
