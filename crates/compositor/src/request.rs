//! Wire types for the compositing endpoint.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use showroom_core::prompts::ProcessingParameters;

/// `POST {endpoint}` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeRequest {
    /// Source photo, base64 (standard alphabet, padded).
    pub image: String,
    pub background_template: String,
    pub prompt: String,
    pub parameters: ProcessingParameters,
}

impl CompositeRequest {
    /// Build a request with the default fixed parameters.
    pub fn new(
        source: &[u8],
        background_template: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            image: STANDARD.encode(source),
            background_template: background_template.into(),
            prompt: prompt.into(),
            parameters: ProcessingParameters::default(),
        }
    }
}

/// Response body. Only `processedImage` is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResponse {
    pub processed_image: Option<String>,
}

/// Decode a base64 payload, accepting an optional `data:<mime>;base64,`
/// prefix and surrounding whitespace.
pub fn decode_image(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let trimmed = payload.trim();
    let data = match trimmed.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };
    STANDARD.decode(data)
}
