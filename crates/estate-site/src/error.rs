use estate_api::ApiError;

/// Error returned when a page cannot be produced.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The requested record does not exist upstream.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A form submission failed validation.
    #[error("Invalid submission: {}", .0.join("; "))]
    Invalid(Vec<String>),
    /// The content API failed.
    #[error("Content API error: {0}")]
    Api(#[source] ApiError),
}

impl SiteError {
    /// Map an API error, turning upstream 404s into [`SiteError::NotFound`].
    pub(crate) fn from_api(error: ApiError, what: impl Into<String>) -> Self {
        if error.is_not_found() {
            Self::NotFound(what.into())
        } else {
            Self::Api(error)
        }
    }
}

impl From<ApiError> for SiteError {
    fn from(error: ApiError) -> Self {
        Self::from_api(error, "resource")
    }
}
