//! Partial-update merge.
//!
//! A request field overwrites the stored one only when it was explicitly
//! provided: `Some` and, for strings, non-empty; for ids, non-nil.

use uuid::Uuid;

use models::{block, parking_lot, parking_slot, vehicle};

/// Overlay the provided fields of `self` onto an existing entity.
/// Identity and timestamps are never touched.
pub trait ApplyUpdate<M> {
    fn apply_to(&self, target: &mut M);
}

fn merge_string(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        if !v.is_empty() {
            target.clone_from(v);
        }
    }
}

fn merge_copy<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

fn merge_uuid(target: &mut Uuid, value: Option<Uuid>) {
    if let Some(v) = value.filter(|v| !v.is_nil()) {
        *target = v;
    }
}

impl ApplyUpdate<parking_lot::Model> for parking_lot::ParkingLotReq {
    fn apply_to(&self, lot: &mut parking_lot::Model) {
        merge_string(&mut lot.name, &self.name);
        merge_string(&mut lot.description, &self.description);
        merge_string(&mut lot.address, &self.address);
        merge_string(&mut lot.start_time, &self.start_time);
        merge_string(&mut lot.end_time, &self.end_time);
        merge_string(&mut lot.lat, &self.lat);
        merge_string(&mut lot.long, &self.long);
        merge_copy(&mut lot.is_active, self.is_active);
        merge_uuid(&mut lot.company_id, self.company_id);
    }
}

impl ApplyUpdate<block::Model> for block::BlockReq {
    fn apply_to(&self, block: &mut block::Model) {
        merge_uuid(&mut block.parking_lot_id, self.parking_lot_id);
        merge_string(&mut block.code, &self.code);
        merge_string(&mut block.description, &self.description);
    }
}

impl ApplyUpdate<parking_slot::Model> for parking_slot::ParkingSlotReq {
    fn apply_to(&self, slot: &mut parking_slot::Model) {
        merge_uuid(&mut slot.block_id, self.block_id);
        merge_string(&mut slot.name, &self.name);
        merge_string(&mut slot.description, &self.description);
    }
}

impl ApplyUpdate<vehicle::Model> for vehicle::VehicleReq {
    fn apply_to(&self, v: &mut vehicle::Model) {
        if let Some(user_id) = self.user_id.filter(|id| !id.is_nil()) {
            v.user_id = Some(user_id);
        }
        if let Some(plate) = self.license_plate.as_deref().map(vehicle::normalize_plate).filter(|p| !p.is_empty()) {
            v.license_plate = plate;
        }
        merge_string(&mut v.vehicle_brand, &self.vehicle_brand);
        merge_string(&mut v.vehicle_color, &self.vehicle_color);
        merge_string(&mut v.vehicle_type, &self.vehicle_type);
    }
}
