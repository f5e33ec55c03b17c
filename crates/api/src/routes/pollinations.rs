//! Route definition for the prompt-assist proxy.

use axum::routing::post;
use axum::Router;

use crate::handlers::pollinations;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// POST /pollinations -> rewrite a prompt
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/pollinations", post(pollinations::rewrite))
}
