use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::vehicle::{self, ListVehicleReq, ListVehicleRes};

use super::ops::mark_all_set;
use super::{classify, RepoError, Repository};
use crate::context::Ctx;

impl<C: ConnectionTrait> Repository<C> {
    pub async fn create_vehicle(&self, ctx: &Ctx, vehicle: vehicle::Model) -> Result<vehicle::Model, RepoError> {
        let id = vehicle.id;
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(mark_all_set(vehicle::ActiveModel::from(vehicle)).insert(scoped.conn()))
            .await
            .map_err(|e| classify("Vehicle.Create", e, "id", &id))
    }

    pub async fn get_one_vehicle(&self, ctx: &Ctx, id: Uuid) -> Result<vehicle::Model, RepoError> {
        self.fetch_one::<vehicle::Entity>(ctx, id)
            .await
            .map_err(|e| classify("Vehicle.GetOne", e, "id", &id))
    }

    pub async fn get_list_vehicle(&self, ctx: &Ctx, req: &ListVehicleReq) -> Result<ListVehicleRes, RepoError> {
        let mut select = vehicle::Entity::find();
        if let Some(user_id) = req.user_id {
            select = select.filter(vehicle::Column::UserId.eq(user_id));
        }
        if let Some(search) = req.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            select = select.filter(vehicle::Column::LicensePlate.contains(vehicle::normalize_plate(search)));
        }
        self.fetch_page(ctx, select, &req.page_query())
            .await
            .map_err(|e| classify("Vehicle.GetList", e, "page", &req.page))
    }

    pub async fn update_vehicle(&self, ctx: &Ctx, vehicle: vehicle::Model) -> Result<vehicle::Model, RepoError> {
        let id = vehicle.id;
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(mark_all_set(vehicle::ActiveModel::from(vehicle)).update(scoped.conn()))
            .await
            .map_err(|e| classify("Vehicle.Update", e, "id", &id))
    }

    pub async fn delete_vehicle(&self, ctx: &Ctx, id: Uuid) -> Result<(), RepoError> {
        self.delete_one::<vehicle::Entity>(ctx, id)
            .await
            .map_err(|e| classify("Vehicle.Delete", e, "id", &id))
    }
}
