//! Backend API-specific error types.

/// Errors that can occur during backend API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error (status {status}){}", reason(.details))]
    Status { status: u16, details: Option<String> },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Configured base URL is not usable
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Landmark not found
    #[error("Landmark not found: {info_id}")]
    LandmarkNotFound { info_id: i64 },

    /// Landmark type not found
    #[error("Landmark type not found: {type_id}")]
    LandmarkTypeNotFound { type_id: i64 },
}

fn reason(details: &Option<String>) -> String {
    details
        .as_ref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

impl ApiError {
    /// Return the `details` reason the backend attached to a failed write.
    ///
    pub fn details(&self) -> Option<&str> {
        match self {
            ApiError::Status { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    /// Whether no usable response arrived (connection, timeout, bad body).
    ///
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ApiError::HttpRequest(_) | ApiError::Deserialization(_) | ApiError::InvalidUrl { .. }
        )
    }
}
