//! Repository for the `history_entries` table.
//!
//! Soft delete only: rows are flagged, never removed, and every read path
//! is restricted to `is_deleted = FALSE`. The paginated listing runs its
//! page and count queries against one snapshot so the two can never
//! disagree under concurrent writes.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::params::RESERVED_PARAM_KEYS;
use atelier_core::types::{EntryId, SortOrder};

use crate::models::history_entry::{CreateHistoryEntry, HistoryEntryRow, HistoryQuery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, model_id, model_name, created_at, image_url, image_content_type, \
     image_width, image_height, prompt, image_size, num_inference_steps, seed, \
     guidance_scale, num_images, output_format, enable_safety_checker, loras, \
     extra_params, is_favorite, is_deleted";

/// Filter predicate shared verbatim by the page query and the count query.
///
/// `$1` is the escaped `ILIKE` search pattern (or NULL for no search),
/// `$2` the exact model id (or NULL for no model filter).
const FILTER_PREDICATE: &str = "is_deleted = FALSE \
     AND ($1::TEXT IS NULL OR prompt ILIKE $1 OR model_name ILIKE $1) \
     AND ($2::TEXT IS NULL OR model_id = $2)";

/// Provides CRUD and listing operations for history entries.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Insert a new entry, returning the created row.
    ///
    /// The id is minted here (UUIDv7); extension keys shadowing a fixed
    /// column are dropped before the write.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHistoryEntry,
    ) -> Result<HistoryEntryRow, sqlx::Error> {
        let params = &input.parameters;

        let mut extra = params.extra.clone();
        extra.retain(|key, _| !RESERVED_PARAM_KEYS.contains(&key.as_str()));
        let extra = if extra.is_empty() { None } else { Some(Json(extra)) };

        let query = format!(
            "INSERT INTO history_entries (id, model_id, model_name, image_url, \
                 image_content_type, image_width, image_height, prompt, image_size, \
                 num_inference_steps, seed, guidance_scale, num_images, output_format, \
                 enable_safety_checker, loras, extra_params)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryEntryRow>(&query)
            .bind(Uuid::now_v7())
            .bind(&input.model_id)
            .bind(&input.model_name)
            .bind(&input.image.url)
            .bind(&input.image.content_type)
            .bind(input.image.width)
            .bind(input.image.height)
            .bind(&params.prompt)
            .bind(params.image_size.as_ref().map(Json))
            .bind(params.num_inference_steps)
            .bind(params.seed)
            .bind(params.guidance_scale)
            .bind(params.num_images)
            .bind(params.output_format.map(|f| f.as_str()))
            .bind(params.enable_safety_checker)
            .bind(params.loras.as_ref().map(Json))
            .bind(extra)
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted entry by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntryId,
    ) -> Result<Option<HistoryEntryRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM history_entries WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, HistoryEntryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one page of entries plus the total count under the same filter.
    ///
    /// Both queries share [`FILTER_PREDICATE`] and run inside a single
    /// REPEATABLE READ transaction, so the count always matches the page's
    /// filtered view. A page past the end yields an empty vec with the
    /// count still populated.
    pub async fn list_page(
        pool: &PgPool,
        query: &HistoryQuery,
    ) -> Result<(Vec<HistoryEntryRow>, i64), sqlx::Error> {
        let pattern = query.search_term.as_deref().map(like_pattern);
        let direction = match query.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };

        let page_sql = format!(
            "SELECT {COLUMNS} FROM history_entries WHERE {FILTER_PREDICATE} \
             ORDER BY created_at {direction}, id {direction} \
             LIMIT $3 OFFSET $4"
        );
        let count_sql = format!("SELECT COUNT(*) FROM history_entries WHERE {FILTER_PREDICATE}");

        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let rows = sqlx::query_as::<_, HistoryEntryRow>(&page_sql)
            .bind(&pattern)
            .bind(&query.model_id)
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(&mut *tx)
            .await?;

        let total: (i64,) = sqlx::query_as(&count_sql)
            .bind(&pattern)
            .bind(&query.model_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((rows, total.0))
    }

    /// Set the favorite flag on a non-deleted entry.
    ///
    /// Returns the updated row, or `None` when no non-deleted row has that
    /// id. Writing the current value again succeeds unchanged.
    pub async fn set_favorite(
        pool: &PgPool,
        id: EntryId,
        favorite: bool,
    ) -> Result<Option<HistoryEntryRow>, sqlx::Error> {
        let query = format!(
            "UPDATE history_entries SET is_favorite = $2 \
             WHERE id = $1 AND is_deleted = FALSE \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryEntryRow>(&query)
            .bind(id)
            .bind(favorite)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an entry. Returns `true` when the id exists.
    ///
    /// Matches on id alone, so deleting an already-deleted entry is an
    /// idempotent success rather than a not-found.
    pub async fn soft_delete(pool: &PgPool, id: EntryId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE history_entries SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build a `%...%` `ILIKE` pattern with LIKE metacharacters escaped, so a
/// search term containing `%`, `_`, or `\` matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!("%{escaped}%")
}
