//! Entities, request shapes and paging wire types for the parking domain.

pub mod errors;
pub mod db;
pub mod query;
pub mod user;
pub mod parking_lot;
pub mod block;
pub mod parking_slot;
pub mod vehicle;
