//! Route definitions for the generation history.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// Routes mounted at `/history`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PUT    /{id}    -> set_favorite
/// DELETE /{id}    -> soft_delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(history::list).post(history::create))
        .route(
            "/{id}",
            put(history::set_favorite).delete(history::soft_delete),
        )
}
