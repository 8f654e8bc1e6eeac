//! Decoding of raw model output into [`ModelSuggestions`].
//!
//! The model sometimes wraps its JSON in markdown code fences; those are
//! stripped before decoding. Everything beneath the fences must be a JSON
//! object with the three string arrays. List lengths are not checked.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSuggestions {
    pub health_tips: Vec<String>,
    pub mental_wellness_suggestions: Vec<String>,
    pub product_categories: Vec<String>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("model returned an empty response")]
    Empty,
    #[error("model response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("model response does not match the expected shape: {0}")]
    Shape(String),
}

pub fn parse_model_output(raw: &str) -> Result<ModelSuggestions, ParseError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }

    let value: Value =
        serde_json::from_str(&cleaned).map_err(|error| ParseError::InvalidJson(error.to_string()))?;
    if !value.is_object() {
        return Err(ParseError::Shape("expected a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|error| ParseError::Shape(error.to_string()))
}

/// Removes every ```` ```json ```` and ```` ``` ```` marker and trims.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}
