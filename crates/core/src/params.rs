//! Generation parameter model.
//!
//! A generation request carries a handful of well-known fields plus whatever
//! extra keys the caller's model accepts. The well-known fields are typed
//! here and persisted as fixed columns; everything else lives in an explicit
//! extension map ([`GenerationParameters::extra`]). A named field and an
//! extension key can never describe the same parameter: reserved keys are
//! stripped from the extension map before a row is written (see
//! [`strip_reserved_keys`]).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image descriptor returned by the generation API: all four fields are
/// required and immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiImage {
    pub url: String,
    pub content_type: String,
    pub width: i32,
    pub height: i32,
}

/// Requested output size: either a provider preset name (e.g.
/// `"landscape_16_9"`) or explicit pixel dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSize {
    Preset(String),
    Custom { width: u32, height: u32 },
}

/// Output encoding accepted by the generation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Lowercase wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
        }
    }
}

/// One LoRA weight reference: adapter path plus its blend scale. Order is
/// significant and preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoraWeight {
    pub path: String,
    pub scale: f64,
}

/// Parameter keys that have a fixed column and therefore must never appear
/// in the extension map.
pub const RESERVED_PARAM_KEYS: &[&str] = &[
    "prompt",
    "image_size",
    "num_inference_steps",
    "seed",
    "guidance_scale",
    "num_images",
    "output_format",
    "enable_safety_checker",
    "loras",
];

/// Full parameter set for one generation.
///
/// Serializes to a single flat object: named fields first, extension keys
/// flattened alongside them. On deserialization serde routes known keys into
/// the named fields, so the extension map only ever receives the leftovers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_inference_steps: Option<i32>,
    /// Stored as a wide integer; provider seeds exceed 2^32.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_images: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_safety_checker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loras: Option<Vec<LoraWeight>>,
    /// Caller-supplied keys with no fixed column.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerationParameters {
    /// Build a minimal parameter set with just a prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image_size: None,
            num_inference_steps: None,
            seed: None,
            guidance_scale: None,
            num_images: None,
            output_format: None,
            enable_safety_checker: None,
            loras: None,
            extra: Map::new(),
        }
    }

    /// Drop any extension keys that collide with a fixed column.
    ///
    /// Deserialization cannot produce such keys, but rows assembled by hand
    /// (or written by earlier schema revisions) could; stripping before
    /// every write keeps read-side merging unambiguous.
    pub fn strip_reserved_keys(&mut self) {
        self.extra
            .retain(|key, _| !RESERVED_PARAM_KEYS.contains(&key.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_keys_collect_into_extension_map() {
        let params: GenerationParameters = serde_json::from_value(json!({
            "prompt": "a red fox",
            "seed": 42,
            "custom_scheduler": "dpm++",
            "strength": 0.8,
        }))
        .unwrap();

        assert_eq!(params.prompt, "a red fox");
        assert_eq!(params.seed, Some(42));
        assert_eq!(params.extra["custom_scheduler"], json!("dpm++"));
        assert_eq!(params.extra["strength"], json!(0.8));
        assert!(!params.extra.contains_key("seed"));
    }

    #[test]
    fn serializes_to_one_flat_object() {
        let mut params = GenerationParameters::from_prompt("cat");
        params.num_inference_steps = Some(25);
        params
            .extra
            .insert("sampler".to_string(), json!("euler_a"));

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "prompt": "cat",
                "num_inference_steps": 25,
                "sampler": "euler_a",
            })
        );
    }

    #[test]
    fn strip_reserved_keys_removes_collisions_only() {
        let mut params = GenerationParameters::from_prompt("cat");
        params.extra.insert("seed".to_string(), json!(999));
        params.extra.insert("prompt".to_string(), json!("shadow"));
        params.extra.insert("sampler".to_string(), json!("euler_a"));

        params.strip_reserved_keys();

        assert!(!params.extra.contains_key("seed"));
        assert!(!params.extra.contains_key("prompt"));
        assert_eq!(params.extra["sampler"], json!("euler_a"));
    }

    #[test]
    fn image_size_accepts_preset_and_dimensions() {
        let preset: ImageSize = serde_json::from_value(json!("landscape_16_9")).unwrap();
        assert_eq!(preset, ImageSize::Preset("landscape_16_9".to_string()));

        let custom: ImageSize =
            serde_json::from_value(json!({"width": 1024, "height": 768})).unwrap();
        assert_eq!(
            custom,
            ImageSize::Custom {
                width: 1024,
                height: 768
            }
        );
    }

    #[test]
    fn loras_preserve_order() {
        let params: GenerationParameters = serde_json::from_value(json!({
            "prompt": "cat",
            "loras": [
                {"path": "style/a.safetensors", "scale": 1.0},
                {"path": "style/b.safetensors", "scale": 0.6},
            ],
        }))
        .unwrap();

        let loras = params.loras.unwrap();
        assert_eq!(loras[0].path, "style/a.safetensors");
        assert_eq!(loras[1].scale, 0.6);
    }
}
