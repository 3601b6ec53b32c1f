//! Request payload validation.
//!
//! Decoding and checking happen in two steps: serde turns the body into an
//! input struct (defaults applied), then [`Validate`] checks each field in
//! declaration order and stops at the first failure.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// First failing field of a request payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field: Option<String>,
}

impl ValidationError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    pub fn body(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

/// Per-field checks run after decoding. No cross-field rules live here.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Decode a JSON body and validate it.
pub fn parse_input<T>(bytes: &[u8]) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    let input: T = serde_json::from_slice(bytes).map_err(|e| ValidationError::body(e.to_string()))?;
    input.validate()?;
    Ok(input)
}

pub(crate) fn require_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::field(field, format!("{field} is required")));
    }
    Ok(())
}

/// JSON error body used by every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<ValidationError> for ErrorBody {
    fn from(e: ValidationError) -> Self {
        Self {
            message: e.message,
            field: e.field,
        }
    }
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}
