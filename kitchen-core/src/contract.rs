//! Repair and validation of raw model output.
//!
//! Models are told to return bare JSON but often wrap it in a markdown code
//! fence anyway. [`strip_code_fences`] removes those markers, then
//! [`parse_model_output`] parses, decodes and validates the result into a
//! typed value or a tagged failure.

use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Why model output was rejected.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The cleaned text isn't JSON at all.
    #[error("model output is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The text is JSON but doesn't decode into the expected shape.
    #[error("model output has the wrong shape: {0}")]
    Shape(#[source] serde_json::Error),

    /// The decoded value fails a constraint.
    #[error("model output failed validation: {0}")]
    Invalid(#[from] ValidationErrors),
}

impl ContractError {
    /// Parse failures and schema failures are reported separately in logs.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, ContractError::Parse(_))
    }
}

/// Strip surrounding whitespace and a wrapping ```json / ``` fence.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Clean, parse, decode and validate model output.
pub fn parse_model_output<T>(raw: &str) -> Result<T, ContractError>
where
    T: DeserializeOwned + Validate,
{
    let cleaned = strip_code_fences(raw);
    let value: serde_json::Value = serde_json::from_str(cleaned).map_err(ContractError::Parse)?;
    let parsed: T = serde_json::from_value(value).map_err(ContractError::Shape)?;
    parsed.validate()?;
    Ok(parsed)
}
