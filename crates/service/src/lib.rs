//! Transactional data-access layer and entity services for the parking backend.
//! - `context`: request-scoped cancellation and deadlines.
//! - `repo`: timeout-scoped store access, transactions, error classification.
//! - `pagination` / `merge`: list normalization and sparse updates.
//! - `services`: per-entity validation and multi-step flows.

pub mod context;
pub mod errors;
pub mod merge;
pub mod pagination;
pub mod repo;
pub mod services;
#[cfg(test)]
pub mod test_support;

pub use context::Ctx;
pub use errors::ServiceError;
pub use repo::{ErrorKind, Repo, RepoConfig, RepoError, TxRepo};
pub use services::Services;
