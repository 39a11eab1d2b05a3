use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use models::parking_lot::{self, ListParkingLotReq, ListParkingLotRes, ParkingLotReq};

use super::trimmed;
use crate::context::Ctx;
use crate::errors::ServiceError;
use crate::merge::ApplyUpdate;
use crate::repo::Repo;

const DEFAULT_START_TIME: &str = "00:00";
const DEFAULT_END_TIME: &str = "23:59";

pub struct ParkingLotService {
    repo: Arc<Repo>,
}

impl ParkingLotService {
    pub fn new(repo: Arc<Repo>) -> Self { Self { repo } }

    #[instrument(skip(self, ctx, req))]
    pub async fn create(&self, ctx: &Ctx, req: ParkingLotReq) -> Result<parking_lot::Model, ServiceError> {
        let now = Utc::now().fixed_offset();
        let start_time = trimmed(req.start_time);
        let end_time = trimmed(req.end_time);
        let lot = parking_lot::Model {
            id: Uuid::new_v4(),
            name: trimmed(req.name),
            description: req.description.unwrap_or_default(),
            address: trimmed(req.address),
            start_time: if start_time.is_empty() { DEFAULT_START_TIME.into() } else { start_time },
            end_time: if end_time.is_empty() { DEFAULT_END_TIME.into() } else { end_time },
            lat: trimmed(req.lat),
            long: trimmed(req.long),
            is_active: req.is_active.unwrap_or(true),
            company_id: req.company_id.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        lot.validate()?;
        let created = self.repo.create_parking_lot(ctx, lot).await?;
        info!(parking_lot_id = %created.id, "parking_lot_created");
        Ok(created)
    }

    pub async fn get_one(&self, ctx: &Ctx, id: Uuid) -> Result<parking_lot::Model, ServiceError> {
        Ok(self.repo.get_one_parking_lot(ctx, id).await?)
    }

    pub async fn get_list(&self, ctx: &Ctx, req: ListParkingLotReq) -> Result<ListParkingLotRes, ServiceError> {
        Ok(self.repo.get_list_parking_lot(ctx, &req).await?)
    }

    /// Sparse update: only the fields present in `req` change.
    #[instrument(skip(self, ctx, req))]
    pub async fn update(&self, ctx: &Ctx, id: Uuid, req: ParkingLotReq) -> Result<parking_lot::Model, ServiceError> {
        let mut lot = self.repo.get_one_parking_lot(ctx, id).await?;
        req.apply_to(&mut lot);
        lot.updated_at = Utc::now().fixed_offset();
        lot.validate()?;
        Ok(self.repo.update_parking_lot(ctx, lot).await?)
    }

    /// Removes the lot with its blocks and their slots, all or nothing.
    #[instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &Ctx, id: Uuid) -> Result<(), ServiceError> {
        let (blocks, slots) = self
            .repo
            .transaction_extended(ctx, move |tx, ctx| {
                Box::pin(async move {
                    tx.get_one_parking_lot(ctx, id).await?;
                    let block_ids = tx.list_block_ids_by_parking_lot(ctx, id).await?;
                    let slots = tx.delete_parking_slots_by_blocks(ctx, &block_ids).await?;
                    let blocks = tx.delete_blocks_by_parking_lot(ctx, id).await?;
                    tx.delete_parking_lot(ctx, id).await?;
                    Ok((blocks, slots))
                })
            })
            .await?;
        info!(parking_lot_id = %id, blocks, slots, "parking_lot_deleted");
        Ok(())
    }
}
