use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use models::vehicle::{self, ListVehicleReq, ListVehicleRes, VehicleReq};

use super::trimmed;
use crate::context::Ctx;
use crate::errors::ServiceError;
use crate::merge::ApplyUpdate;
use crate::repo::Repo;

pub struct VehicleService {
    repo: Arc<Repo>,
}

impl VehicleService {
    pub fn new(repo: Arc<Repo>) -> Self { Self { repo } }

    /// Explicit `user_id` wins; otherwise `owner_phone` is looked up.
    async fn resolve_owner(&self, ctx: &Ctx, req: &VehicleReq) -> Result<Option<Uuid>, ServiceError> {
        if let Some(id) = req.user_id.filter(|id| !id.is_nil()) {
            return Ok(Some(id));
        }
        match req.owner_phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(phone) => Ok(Some(self.repo.get_one_user_by_phone(ctx, phone).await?.id)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, ctx, req))]
    pub async fn create(&self, ctx: &Ctx, req: VehicleReq) -> Result<vehicle::Model, ServiceError> {
        let user_id = self.resolve_owner(ctx, &req).await?;
        let now = Utc::now().fixed_offset();
        let v = vehicle::Model {
            id: Uuid::new_v4(),
            user_id,
            license_plate: vehicle::normalize_plate(req.license_plate.as_deref().unwrap_or_default()),
            vehicle_brand: trimmed(req.vehicle_brand),
            vehicle_color: trimmed(req.vehicle_color),
            vehicle_type: trimmed(req.vehicle_type),
            created_at: now,
            updated_at: now,
        };
        v.validate()?;
        Ok(self.repo.create_vehicle(ctx, v).await?)
    }

    pub async fn get_one(&self, ctx: &Ctx, id: Uuid) -> Result<vehicle::Model, ServiceError> {
        Ok(self.repo.get_one_vehicle(ctx, id).await?)
    }

    pub async fn get_list(&self, ctx: &Ctx, req: ListVehicleReq) -> Result<ListVehicleRes, ServiceError> {
        Ok(self.repo.get_list_vehicle(ctx, &req).await?)
    }

    #[instrument(skip(self, ctx, req))]
    pub async fn update(&self, ctx: &Ctx, id: Uuid, mut req: VehicleReq) -> Result<vehicle::Model, ServiceError> {
        let mut v = self.repo.get_one_vehicle(ctx, id).await?;
        req.user_id = self.resolve_owner(ctx, &req).await?;
        req.apply_to(&mut v);
        v.updated_at = Utc::now().fixed_offset();
        v.validate()?;
        Ok(self.repo.update_vehicle(ctx, v).await?)
    }

    pub async fn delete(&self, ctx: &Ctx, id: Uuid) -> Result<(), ServiceError> {
        Ok(self.repo.delete_vehicle(ctx, id).await?)
    }
}
