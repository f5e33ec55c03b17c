pub mod generate;
pub mod health;
pub mod history;
pub mod pollinations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /history             list (GET), create (POST)
/// /history/{id}        favorite toggle (PUT), soft delete (DELETE)
/// /generate            proxy one generation (POST)
/// /pollinations        rewrite a prompt (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/history", history::router())
        .merge(generate::router())
        .merge(pollinations::router())
}
