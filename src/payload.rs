// SPDX-License-Identifier: MPL-2.0
//! Generation payload text handling.

use crate::error::SourceError;

/// Why a payload text was rejected. Maps to a notification key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Nothing but whitespace.
    Empty,
    /// Not parseable as JSON.
    Invalid(String),
}

impl PayloadError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            PayloadError::Empty => "notification-input-empty",
            PayloadError::Invalid(_) => "notification-json-invalid",
        }
    }
}

impl From<PayloadError> for SourceError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Empty => SourceError::InvalidPayload("empty payload".to_string()),
            PayloadError::Invalid(msg) => SourceError::InvalidPayload(msg),
        }
    }
}

/// Parses payload text.
pub fn parse(text: &str) -> Result<serde_json::Value, PayloadError> {
    if text.trim().is_empty() {
        return Err(PayloadError::Empty);
    }
    serde_json::from_str(text).map_err(|err| PayloadError::Invalid(err.to_string()))
}

/// Pretty-prints payload text with two-space indentation.
pub fn format(text: &str) -> Result<String, PayloadError> {
    let value = parse(text)?;
    serde_json::to_string_pretty(&value).map_err(|err| PayloadError::Invalid(err.to_string()))
}
