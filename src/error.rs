// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Json(String),
    Source(SourceError),
}

/// Failures reported by a gallery data source (history, generation, payload).
/// Each variant maps to a localized notification key.
#[derive(Debug, Clone)]
pub enum SourceError {
    /// The server could not be reached or the request timed out.
    Unreachable(String),

    /// The server answered with a non-success status code.
    Status(u16),

    /// The response body could not be decoded.
    InvalidResponse(String),

    /// The generation payload is not valid JSON.
    InvalidPayload(String),

    /// The configured server URL cannot be parsed.
    InvalidUrl(String),
}

impl SourceError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SourceError::Unreachable(_) | SourceError::Status(_) | SourceError::InvalidUrl(_) => {
                "notification-server-error"
            }
            SourceError::InvalidResponse(_) => "notification-history-failed",
            SourceError::InvalidPayload(_) => "notification-json-invalid",
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unreachable(msg) => write!(f, "Server unreachable: {}", msg),
            SourceError::Status(code) => write!(f, "Server returned status {}", code),
            SourceError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            SourceError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            SourceError::InvalidUrl(msg) => write!(f, "Invalid server URL: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Json(e) => write!(f, "JSON Error: {}", e),
            Error::Source(e) => write!(f, "Source Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Error::Source(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            SourceError::Status(status.as_u16())
        } else if err.is_decode() {
            SourceError::InvalidResponse(err.to_string())
        } else {
            SourceError::Unreachable(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
