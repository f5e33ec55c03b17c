//! Handler for the generation proxy.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use atelier_core::error::CoreError;
use atelier_core::params::GenerationParameters;
use atelier_db::models::history_entry::CreateHistoryEntry;
use atelier_db::repositories::HistoryRepo;
use atelier_fal::GenerationOutput;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub model_id: Option<String>,
    /// Display name recorded in the history; falls back to `model_id`.
    pub model_name: Option<String>,
    /// Provider input, forwarded verbatim.
    pub input: Option<Value>,
}

/// Response of `POST /generate`: the provider's output envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub data: GenerationOutput,
    pub request_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/generate
///
/// Forward one generation to the external API and block on its single
/// response. Succeeds only when the provider returns at least one image.
pub async fn run(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let model_id = match &request.model_id {
        Some(id) if !id.trim().is_empty() => id.clone(),
        _ => return Err(AppError::BadRequest("model_id is required".to_string())),
    };
    let input = request
        .input
        .filter(Value::is_object)
        .ok_or_else(|| AppError::BadRequest("input payload is required".to_string()))?;

    let result = state.fal.run(&model_id, &input).await?;

    if result.output.images.is_empty() {
        return Err(CoreError::upstream_opaque(
            "No image generated or unexpected response from generation API",
        )
        .into());
    }

    record_history(
        &state,
        &model_id,
        request.model_name.as_deref(),
        &input,
        &result.output,
    )
    .await;

    Ok(Json(GenerateResponse {
        data: result.output,
        request_id: result.request_id,
    }))
}

/// Record a successful generation as a history entry.
///
/// Best effort: the caller already holds the generated image, so a
/// recording failure is logged rather than failing the response. Inputs
/// without a prompt are not recorded.
async fn record_history(
    state: &AppState,
    model_id: &str,
    model_name: Option<&str>,
    input: &Value,
    output: &GenerationOutput,
) {
    let parameters = match serde_json::from_value::<GenerationParameters>(input.clone()) {
        Ok(parameters) if !parameters.prompt.trim().is_empty() => parameters,
        _ => {
            tracing::debug!(model_id, "Generation input has no prompt, skipping history");
            return;
        }
    };
    let Some(image) = output.images.first() else {
        return;
    };

    let create = CreateHistoryEntry {
        model_id: model_id.to_string(),
        model_name: model_name.unwrap_or(model_id).to_string(),
        image: image.clone(),
        parameters,
    };

    if let Err(e) = HistoryRepo::create(&state.pool, &create).await {
        tracing::error!(error = %e, model_id, "Failed to record generation in history");
    }
}
