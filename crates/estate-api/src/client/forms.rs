//! Form submissions.

use tracing::info;

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{FormReply, FormReplyBody, Submission};

impl ApiClient {
    /// Post a form to its endpoint.
    pub fn submit(&self, submission: &Submission) -> Result<FormReply, ApiError> {
        let path = submission.kind().path();
        let body: FormReplyBody = self.post_json(path, &submission.to_json())?;
        info!(endpoint = path, "Form submitted");
        Ok(body.into())
    }
}
