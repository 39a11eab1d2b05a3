//! Pagination utilities for the data-access layer
//!
//! Normalizes raw page/page-size/sort inputs and computes page metadata.
//! Bounds come from [`PaginationConfig`], built from the `[query]` config section.

use models::query::PageMeta;

/// Sort applied when the caller gives none.
pub const DEFAULT_SORT: &str = "created_at desc";

/// Page-size bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationConfig {
    /// used when the request asks for zero or a negative size
    pub default_page_size: u64,
    /// hard ceiling on rows per page
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self { Self { default_page_size: 30, max_page_size: 1000 } }
}

impl From<&configs::QueryConfig> for PaginationConfig {
    fn from(q: &configs::QueryConfig) -> Self {
        Self { default_page_size: q.default_page_size, max_page_size: q.max_page_size }
    }
}

impl PaginationConfig {
    /// Zero or negative falls back to the default size; anything above the ceiling is clamped.
    pub fn normalize_page_size(&self, page_size: i64) -> u64 {
        if page_size <= 0 {
            return self.default_page_size;
        }
        (page_size as u64).min(self.max_page_size)
    }

    /// Full set of normalized inputs for one list call: `(page, page_size, sort)`.
    pub fn normalize(&self, page: i64, page_size: i64, sort: Option<&str>) -> (u64, u64, String) {
        (normalize_page(page), self.normalize_page_size(page_size), normalize_sort(sort))
    }
}

/// 1-based; zero or negative becomes the first page.
pub fn normalize_page(page: i64) -> u64 {
    if page <= 0 { 1 } else { page as u64 }
}

/// Rows to skip for a normalized `page`.
pub fn offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

pub fn total_pages(total_rows: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    (total_rows as f64 / page_size as f64).ceil() as u64
}

pub fn normalize_sort(sort: Option<&str>) -> String {
    match sort.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_SORT.to_string(),
    }
}

pub fn page_meta(page: u64, page_size: u64, total_rows: u64) -> PageMeta {
    PageMeta { page, page_size, total_pages: total_pages(total_rows, page_size), total_rows }
}
