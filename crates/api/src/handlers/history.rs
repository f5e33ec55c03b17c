//! Handlers for the `/history` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use atelier_core::error::CoreError;
use atelier_core::types::EntryId;
use atelier_db::models::history_entry::{
    CreateHistoryEntry, HistoryEntry, HistoryEntryRow, HistoryPage,
};
use atelier_db::repositories::HistoryRepo;

use crate::error::{AppError, AppResult};
use crate::query::HistoryListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `PUT /history/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFavoriteRequest {
    pub is_favorite: bool,
}

/// Response of `PUT /history/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: EntryId,
    pub is_favorite: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/history
///
/// Paginated, filtered listing. The page and its total count come from one
/// snapshot, so they always agree.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HistoryListParams>,
) -> AppResult<Json<HistoryPage>> {
    let query = params.normalize();

    let (rows, total_items) = HistoryRepo::list_page(&state.pool, &query).await?;
    let total_pages = (total_items + query.limit - 1) / query.limit;
    let data = into_client_entries(rows)?;

    Ok(Json(HistoryPage {
        data,
        total_pages,
        current_page: query.page,
        total_items,
    }))
}

/// POST /api/v1/history
///
/// Record a completed generation. Returns the created entry with 201.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateHistoryEntry>, JsonRejection>,
) -> AppResult<(StatusCode, Json<HistoryEntry>)> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let row = HistoryRepo::create(&state.pool, &input).await?;
    let entry = into_client_entry(row)?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/v1/history/{id}
///
/// Set the favorite flag. Writing the current value again is a no-op
/// success; a missing or deleted entry is 404.
pub async fn set_favorite(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
    payload: Result<Json<SetFavoriteRequest>, JsonRejection>,
) -> AppResult<Json<FavoriteResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let updated = HistoryRepo::set_favorite(&state.pool, id, input.is_favorite)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "History entry",
            id,
        })?;

    Ok(Json(FavoriteResponse {
        id: updated.id,
        is_favorite: updated.is_favorite,
    }))
}

/// DELETE /api/v1/history/{id}
///
/// Soft delete. Re-deleting an already-deleted entry succeeds; only a
/// wholly unknown id is 404.
pub async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = HistoryRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "History entry",
            id,
        }
        .into());
    }

    Ok(Json(MessageResponse {
        message: "History entry deleted",
    }))
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

/// A parameter column that fails to reassemble means the row was written
/// outside the repository; surface it as an internal fault.
fn into_client_entry(row: HistoryEntryRow) -> AppResult<HistoryEntry> {
    row.into_client()
        .map_err(|e| CoreError::Internal(format!("Corrupt parameter column: {e}")).into())
}

fn into_client_entries(rows: Vec<HistoryEntryRow>) -> AppResult<Vec<HistoryEntry>> {
    rows.into_iter().map(into_client_entry).collect()
}
