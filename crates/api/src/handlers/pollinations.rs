//! Handler for the prompt-assist proxy.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use atelier_pollinations::PromptAction;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /pollinations`.
#[derive(Debug, Deserialize)]
pub struct PromptAssistRequest {
    pub text: Option<String>,
    pub action: Option<PromptAction>,
}

/// Response of `POST /pollinations`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptAssistResponse {
    pub modified_text: String,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/pollinations
///
/// Rewrite free text per the requested action. The upstream reply is
/// scrubbed of conversational noise before it is returned.
pub async fn rewrite(
    State(state): State<AppState>,
    payload: Result<Json<PromptAssistRequest>, JsonRejection>,
) -> AppResult<Json<PromptAssistResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let text = request
        .text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(missing_fields)?;
    let action = request.action.ok_or_else(missing_fields)?;

    let modified_text = state.pollinations.rewrite(text, action).await?;

    Ok(Json(PromptAssistResponse { modified_text }))
}

fn missing_fields() -> AppError {
    AppError::BadRequest("Missing text or action in request body".to_string())
}
