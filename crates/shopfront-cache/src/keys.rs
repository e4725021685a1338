//! Cache key builders for all Shopfront query caches.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the client uses.

use shopfront_core::types::StoreId;

/// Prefix applied to all Shopfront cache keys.
const PREFIX: &str = "shopfront";

// ── Sales keys ─────────────────────────────────────────────

/// Cache key for the full sales list of a store.
pub fn sales_list(store_id: &StoreId) -> String {
    format!("{PREFIX}:sales:{store_id}:list")
}

/// Cache key for the paginated sales listing of a store.
pub fn sales_paged(store_id: &StoreId) -> String {
    format!("{PREFIX}:sales:{store_id}:paged")
}

/// Cache key for the recent-sales strip of a store.
pub fn recent_sales(store_id: &StoreId) -> String {
    format!("{PREFIX}:sales:{store_id}:recent")
}

// ── Dashboard keys ─────────────────────────────────────────

/// Cache key for the aggregate dashboard metrics of a store.
pub fn dashboard_metrics(store_id: &StoreId) -> String {
    format!("{PREFIX}:dashboard:{store_id}:metrics")
}

// ── Catalog keys ───────────────────────────────────────────

/// Cache key for the product catalog of a store.
pub fn product_catalog(store_id: &StoreId) -> String {
    format!("{PREFIX}:products:{store_id}:list")
}
