//! Route definition for the generation proxy.

use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// POST /generate -> run one generation
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate::run))
}
