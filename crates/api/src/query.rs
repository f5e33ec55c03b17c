//! Shared query parameter types for API handlers.

use serde::Deserialize;

use atelier_core::gallery::ModelFilter;
use atelier_core::types::SortOrder;
use atelier_db::models::history_entry::HistoryQuery;

/// Raw query parameters for `GET /history`.
///
/// Field names follow the external contract (`searchTerm`, `modelFilter`,
/// `sortOrder`); [`HistoryListParams::normalize`] resolves defaults and
/// sentinel values into a repository query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search_term: Option<String>,
    pub model_filter: Option<String>,
    pub sort_order: Option<String>,
}

/// Default page size for the history listing.
pub const DEFAULT_LIMIT: i64 = 12;

/// Maximum page size for the history listing.
pub const MAX_LIMIT: i64 = 100;

impl HistoryListParams {
    /// Resolve raw parameters into a normalized repository query.
    ///
    /// - `page` below 1 is clamped to 1; `limit` defaults to 12, capped
    ///   at 100.
    /// - An empty search term is no filter at all, not a zero-match filter.
    /// - The `"all"` model sentinel (and the empty string) mean no model
    ///   filter.
    /// - Anything but `"asc"` sorts descending.
    pub fn normalize(self) -> HistoryQuery {
        let search_term = self
            .search_term
            .filter(|term| !term.trim().is_empty());

        let model_id = self
            .model_filter
            .and_then(|raw| match ModelFilter::from_param(&raw) {
                ModelFilter::All => None,
                ModelFilter::Model(id) => Some(id),
            });

        let sort_order = self
            .sort_order
            .as_deref()
            .map(SortOrder::parse_lenient)
            .unwrap_or_default();

        HistoryQuery {
            page: self.page.unwrap_or(1).max(1),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            search_term,
            model_id,
            sort_order,
        }
    }
}
