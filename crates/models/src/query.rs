//! Paging request/response shapes shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Raw paging input as received from the caller; normalized by the service layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: i64,
    pub page_size: i64,
    pub sort: Option<String>,
}

/// Derived paging metadata, recomputed on every list query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_rows: u64,
}

/// One page of rows plus its metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
