use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::parking_lot::{self, ListParkingLotReq, ListParkingLotRes};

use super::ops::mark_all_set;
use super::{classify, RepoError, Repository};
use crate::context::Ctx;

impl<C: ConnectionTrait> Repository<C> {
    pub async fn create_parking_lot(&self, ctx: &Ctx, lot: parking_lot::Model) -> Result<parking_lot::Model, RepoError> {
        let id = lot.id;
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(mark_all_set(parking_lot::ActiveModel::from(lot)).insert(scoped.conn()))
            .await
            .map_err(|e| classify("ParkingLot.Create", e, "id", &id))
    }

    pub async fn get_one_parking_lot(&self, ctx: &Ctx, id: Uuid) -> Result<parking_lot::Model, RepoError> {
        self.fetch_one::<parking_lot::Entity>(ctx, id)
            .await
            .map_err(|e| classify("ParkingLot.GetOne", e, "id", &id))
    }

    pub async fn get_list_parking_lot(&self, ctx: &Ctx, req: &ListParkingLotReq) -> Result<ListParkingLotRes, RepoError> {
        let mut select = parking_lot::Entity::find();
        if let Some(search) = req.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            select = select.filter(parking_lot::Column::Name.contains(search));
        }
        if let Some(company_id) = req.company_id {
            select = select.filter(parking_lot::Column::CompanyId.eq(company_id));
        }
        if let Some(active) = req.is_active {
            select = select.filter(parking_lot::Column::IsActive.eq(active));
        }
        self.fetch_page(ctx, select, &req.page_query())
            .await
            .map_err(|e| classify("ParkingLot.GetList", e, "page", &req.page))
    }

    pub async fn update_parking_lot(&self, ctx: &Ctx, lot: parking_lot::Model) -> Result<parking_lot::Model, RepoError> {
        let id = lot.id;
        let (scoped, _release) = self.scope(ctx);
        scoped
            .run(mark_all_set(parking_lot::ActiveModel::from(lot)).update(scoped.conn()))
            .await
            .map_err(|e| classify("ParkingLot.Update", e, "id", &id))
    }

    pub async fn delete_parking_lot(&self, ctx: &Ctx, id: Uuid) -> Result<(), RepoError> {
        self.delete_one::<parking_lot::Entity>(ctx, id)
            .await
            .map_err(|e| classify("ParkingLot.Delete", e, "id", &id))
    }
}
