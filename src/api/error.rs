//! API Error Types
//!
//! Failures of the air-quality backend as seen from the client side, and the
//! user-facing message each one surfaces as.

use thiserror::Error;

/// Message shown when the server gave no usable explanation
pub const GENERIC_FETCH_MESSAGE: &str = "Failed to fetch AQI data";

/// Message shown when the backend could not be reached at all
pub const NETWORK_MESSAGE: &str = "Network error";

/// Errors returned by an [`AirQualityApi`](super::AirQualityApi) implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx HTTP status, with the server's `error` field when present
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// 2xx response carrying `success: false`
    #[error("Request rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),

    /// Body was not the JSON shape we expect
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text to put in front of the user for a failed reading fetch.
    ///
    /// Prefers the server-provided message; otherwise a generic one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(msg), ..
            }
            | ApiError::Rejected(Some(msg))
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            ApiError::Transport(_) => NETWORK_MESSAGE.to_string(),
            _ => GENERIC_FETCH_MESSAGE.to_string(),
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
