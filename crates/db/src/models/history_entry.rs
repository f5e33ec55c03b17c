//! History entry models and DTOs.
//!
//! Defines the database row struct for `history_entries`, the create DTO
//! accepted by the API, and the client-facing shapes (entry, page envelope)
//! with their external field naming.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use atelier_core::params::{ApiImage, GenerationParameters, ImageSize, LoraWeight, OutputFormat};
use atelier_core::types::{EntryId, SortOrder, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `history_entries` table.
///
/// Parameter columns are kept raw here; [`HistoryEntryRow::into_client`]
/// reassembles them into the flat client-facing parameter object.
#[derive(Debug, Clone, FromRow)]
pub struct HistoryEntryRow {
    pub id: EntryId,
    pub model_id: String,
    pub model_name: String,
    pub created_at: Timestamp,
    pub image_url: String,
    pub image_content_type: String,
    pub image_width: i32,
    pub image_height: i32,
    pub prompt: String,
    pub image_size: Option<Value>,
    pub num_inference_steps: Option<i32>,
    pub seed: Option<i64>,
    pub guidance_scale: Option<f64>,
    pub num_images: Option<i32>,
    pub output_format: Option<String>,
    pub enable_safety_checker: Option<bool>,
    pub loras: Option<Value>,
    pub extra_params: Option<Value>,
    pub is_favorite: bool,
    pub is_deleted: bool,
}

impl HistoryEntryRow {
    /// Reassemble the row into the client-facing entry.
    ///
    /// Fixed columns are authoritative: any extension key shadowing one is
    /// discarded (creation already strips them, so a collision here means a
    /// row written outside the repository).
    pub fn into_client(self) -> Result<HistoryEntry, serde_json::Error> {
        let image_size: Option<ImageSize> =
            self.image_size.map(serde_json::from_value).transpose()?;
        let output_format: Option<OutputFormat> = self
            .output_format
            .map(|s| serde_json::from_value(Value::String(s)))
            .transpose()?;
        let loras: Option<Vec<LoraWeight>> =
            self.loras.map(serde_json::from_value).transpose()?;
        let extra: Map<String, Value> = match self.extra_params {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let mut parameters = GenerationParameters {
            prompt: self.prompt,
            image_size,
            num_inference_steps: self.num_inference_steps,
            seed: self.seed,
            guidance_scale: self.guidance_scale,
            num_images: self.num_images,
            output_format,
            enable_safety_checker: self.enable_safety_checker,
            loras,
            extra,
        };
        parameters.strip_reserved_keys();

        Ok(HistoryEntry {
            id: self.id,
            model_id: self.model_id,
            model_name: self.model_name,
            timestamp: self.created_at,
            image: ApiImage {
                url: self.image_url,
                content_type: self.image_content_type,
                width: self.image_width,
                height: self.image_height,
            },
            parameters,
            is_favorite: self.is_favorite,
        })
    }
}

// ---------------------------------------------------------------------------
// Client-facing shapes
// ---------------------------------------------------------------------------

/// One history entry as returned to clients.
///
/// Entry-level keys are camelCase; the nested image and parameter objects
/// keep their provider-native snake_case keys.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: EntryId,
    pub model_id: String,
    pub model_name: String,
    pub timestamp: Timestamp,
    pub image: ApiImage,
    pub parameters: GenerationParameters,
    pub is_favorite: bool,
}

/// Paginated listing envelope for `GET /history`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub data: Vec<HistoryEntry>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total_items: i64,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for recording a completed generation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistoryEntry {
    #[validate(length(min = 1, message = "modelId must not be empty"))]
    pub model_id: String,
    #[validate(length(min = 1, message = "modelName must not be empty"))]
    pub model_name: String,
    pub image: ApiImage,
    #[validate(custom(function = "validate_parameters"))]
    pub parameters: GenerationParameters,
}

fn validate_parameters(parameters: &GenerationParameters) -> Result<(), ValidationError> {
    if parameters.prompt.trim().is_empty() {
        return Err(ValidationError::new("prompt_required")
            .with_message("parameters.prompt must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Listing query
// ---------------------------------------------------------------------------

/// Normalized listing parameters handed to the repository.
///
/// The API layer resolves defaults and sentinels before building this:
/// `search_term` and `model_id` are `None` when no filter applies.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
    pub search_term: Option<String>,
    pub model_id: Option<String>,
    pub sort_order: SortOrder,
}

impl HistoryQuery {
    /// First page with the given page size and no filters.
    pub fn first_page(limit: i64) -> Self {
        Self {
            page: 1,
            limit,
            search_term: None,
            model_id: None,
            sort_order: SortOrder::Desc,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}
