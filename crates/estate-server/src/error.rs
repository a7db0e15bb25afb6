//! Server error responses.

use std::fmt::Write;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use estate_api::ApiError;
use estate_shortcode::escape_html;
use estate_site::SiteError;

/// Error returned by request handlers, rendered as an HTML error page.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Nothing to serve at this address.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A submitted form was rejected.
    #[error("Invalid submission")]
    Invalid(Vec<String>),
    /// The content API failed.
    #[error("Content API error: {0}")]
    Upstream(#[source] ApiError),
    /// The blocking render task failed.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SiteError> for ServerError {
    fn from(error: SiteError) -> Self {
        match error {
            SiteError::NotFound(what) => Self::NotFound(what),
            SiteError::Invalid(errors) => Self::Invalid(errors),
            SiteError::Api(e) => Self::Upstream(e),
        }
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> String {
        let (title, detail) = match self {
            Self::NotFound(_) => (
                "Page not found",
                "The page you are looking for does not exist.",
            ),
            Self::Invalid(_) => (
                "Please check the form",
                "Some required fields are missing or invalid.",
            ),
            Self::Upstream(_) => (
                "Service unavailable",
                "We could not load this page right now. Please try again later.",
            ),
            Self::Internal(_) => ("Something went wrong", "Please try again later."),
        };

        let mut out = String::with_capacity(512);
        write!(
            out,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<link rel=\"stylesheet\" href=\"/static/site.css\">\n\
             </head>\n<body>\n<main class=\"error-page\"><h1>{title}</h1><p>{detail}</p>"
        )
        .unwrap();
        if let Self::Invalid(errors) = self {
            out.push_str("<ul>");
            for error in errors {
                write!(out, "<li>{}</li>", escape_html(error)).unwrap();
            }
            out.push_str("</ul>");
        }
        out.push_str("<a href=\"/\">Back to home</a></main>\n</body>\n</html>\n");
        out
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Upstream(e) => tracing::error!(error = %e, "Content API request failed"),
            Self::Internal(e) => tracing::error!(error = %e, "Request failed"),
            Self::NotFound(what) => tracing::debug!(%what, "Not found"),
            Self::Invalid(errors) => tracing::debug!(?errors, "Form rejected"),
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            self.body(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ServerError::from(SiteError::NotFound("page 'x'".to_owned()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = ServerError::from(SiteError::Invalid(vec!["Name is required".to_owned()]));
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let upstream = ServerError::from(SiteError::Api(ApiError::Status {
            status: 500,
            message: "down".to_owned(),
        }));
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_invalid_body_lists_errors() {
        let body = ServerError::Invalid(vec!["Email is <required>".to_owned()]).body();
        assert!(body.contains("<li>Email is &lt;required&gt;</li>"));
    }

    #[test]
    fn test_upstream_body_hides_details() {
        let body = ServerError::Upstream(ApiError::Status {
            status: 500,
            message: "secret stack trace".to_owned(),
        })
        .body();
        assert!(!body.contains("secret"));
        assert!(body.contains("Service unavailable"));
    }
}
