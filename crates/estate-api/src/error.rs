//! Error types for content API access.

/// Message used when an error response carries no `message` field.
pub(crate) const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Error from content API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, undecodable body).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// The API answered with an error status.
    #[error("API error {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, or a generic message.
        message: String,
    },
}

impl ApiError {
    /// HTTP status of an error response, if the API answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) => None,
        }
    }

    /// Check if the API reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Build a status error from a raw response body.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_owned());
        Self::Status { status, message }
    }
}
