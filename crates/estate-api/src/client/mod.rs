//! Content API client.
//!
//! Blocking HTTP client for the real-estate REST API. Every endpoint answers
//! JSON; error statuses are turned into [`ApiError::Status`].

mod forms;
mod listings;
mod pages;
mod site;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::ApiError;
use crate::query::{QueryPairs, encode_query};
use crate::types::ApiResponse;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Content API client.
pub struct ApiClient {
    agent: Agent,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8192/api`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a client with a custom request timeout.
    #[must_use]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// API base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path` with optional query parameters.
    fn url(&self, path: &str, query: &QueryPairs) -> String {
        if query.is_empty() {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}{path}?{}", self.base_url, encode_query(query))
        }
    }

    /// GET a JSON document.
    fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryPairs) -> Result<T, ApiError> {
        let url = self.url(path, query);
        debug!(%url, "GET");

        let response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader.read_to_string().unwrap_or_default();
            debug!(%url, status, "API error response");
            return Err(ApiError::from_body(status, &error_body));
        }

        Ok(body_reader.read_json()?)
    }

    /// GET a `{ "data": ... }` envelope and unwrap it.
    fn get_data<T: DeserializeOwned>(&self, path: &str, query: &QueryPairs) -> Result<T, ApiError> {
        let response: ApiResponse<T> = self.get(path, query)?;
        Ok(response.data)
    }

    /// POST a JSON body.
    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path, &QueryPairs::new());
        debug!(%url, "POST");

        let response = self
            .agent
            .post(&url)
            .header("Accept", "application/json")
            .send_json(body)?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader.read_to_string().unwrap_or_default();
            return Err(ApiError::from_body(status, &error_body));
        }

        Ok(body_reader.read_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContactForm, Submission};

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8192/api/");
        assert_eq!(client.base_url(), "http://localhost:8192/api");
    }

    #[test]
    fn test_url_with_query() {
        let client = ApiClient::new("http://cms.test/api");
        assert_eq!(
            client.url("/properties", &vec![("type", "sale".to_owned())]),
            "http://cms.test/api/properties?type=sale"
        );
        assert_eq!(client.url("/menu", &QueryPairs::new()), "http://cms.test/api/menu");
    }

    #[test]
    fn test_unreachable_server_is_http_error() {
        let client = ApiClient::with_timeout("http://127.0.0.1:9/api", Duration::from_secs(2));
        let err = client.get::<serde_json::Value>("/menu", &QueryPairs::new()).unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_blog_post_and_form_submit_are_distinct_calls() {
        let client = ApiClient::with_timeout("http://127.0.0.1:9/api", Duration::from_secs(2));
        let submission = Submission::Contact(ContactForm {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            message: "Hello".to_owned(),
            ..ContactForm::default()
        });
        assert!(matches!(client.submit(&submission), Err(ApiError::Http(_))));
        assert!(matches!(client.post("market-update"), Err(ApiError::Http(_))));
    }
}
