//! Form submission handlers.
//!
//! Forms arrive URL-encoded, are validated and forwarded to the content API,
//! and answered with a confirmation page. Rejected forms get a 422 page.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use estate_api::{ContactForm, GeneralInquiry, Mandate, PropertyInquiry, Submission};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle POST /contact.
pub(crate) async fn contact(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Result<Response, ServerError> {
    submit(state, Submission::Contact(form)).await
}

/// Handle POST /property-inquiry.
pub(crate) async fn property_inquiry(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PropertyInquiry>,
) -> Result<Response, ServerError> {
    submit(state, Submission::PropertyInquiry(form)).await
}

/// Handle POST /inquiry.
pub(crate) async fn inquiry(
    State(state): State<Arc<AppState>>,
    Form(form): Form<GeneralInquiry>,
) -> Result<Response, ServerError> {
    submit(state, Submission::Inquiry(form)).await
}

/// Handle POST /mandate.
pub(crate) async fn mandate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<Mandate>,
) -> Result<Response, ServerError> {
    submit(state, Submission::Mandate(form)).await
}

async fn submit(state: Arc<AppState>, submission: Submission) -> Result<Response, ServerError> {
    let endpoint = submission.kind().path();
    let page =
        tokio::task::spawn_blocking(move || state.site.submit(&submission)).await??;
    tracing::info!(endpoint, "Form accepted");

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Html(page.html),
    )
        .into_response())
}
