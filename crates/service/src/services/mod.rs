//! Entity services: validation and multi-step flows on top of [`Repo`].

use std::sync::Arc;

use crate::repo::Repo;

mod block_service;
mod parking_lot_service;
mod parking_slot_service;
mod vehicle_service;

pub use block_service::BlockService;
pub use parking_lot_service::ParkingLotService;
pub use parking_slot_service::ParkingSlotService;
pub use vehicle_service::VehicleService;

/// Every service, sharing one repository.
#[derive(Clone)]
pub struct Services {
    pub parking_lots: Arc<ParkingLotService>,
    pub blocks: Arc<BlockService>,
    pub parking_slots: Arc<ParkingSlotService>,
    pub vehicles: Arc<VehicleService>,
}

impl Services {
    pub fn new(repo: Arc<Repo>) -> Self {
        Self {
            parking_lots: Arc::new(ParkingLotService::new(Arc::clone(&repo))),
            blocks: Arc::new(BlockService::new(Arc::clone(&repo))),
            parking_slots: Arc::new(ParkingSlotService::new(Arc::clone(&repo))),
            vehicles: Arc::new(VehicleService::new(repo)),
        }
    }
}

pub(crate) fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
