//! Page handlers.
//!
//! Every page is rendered on a blocking thread and served with an `ETag`
//! derived from the application version and the HTML.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use estate_site::{RenderedPage, Site, SiteError};
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::state::AppState;

type Params = Query<Vec<(String, String)>>;

/// Handle GET /.
pub(crate) async fn home(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    render(state, headers, "/".to_owned(), |site| Ok(site.home())).await
}

/// Handle GET /properties.
pub(crate) async fn properties(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    render(state, headers, "/properties".to_owned(), move |site| {
        site.properties(&params)
    })
    .await
}

/// Handle GET /properties/{id}.
pub(crate) async fn property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let route = format!("/properties/{id}");
    let id = parse_id(&id, &route)?;
    render(state, headers, route, move |site| site.property(id)).await
}

/// Handle GET /agents.
pub(crate) async fn agents(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    render(state, headers, "/agents".to_owned(), move |site| {
        site.agents(&params)
    })
    .await
}

/// Handle GET /agents/{id}.
pub(crate) async fn agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let route = format!("/agents/{id}");
    let id = parse_id(&id, &route)?;
    render(state, headers, route, move |site| site.agent(id)).await
}

/// Handle GET /blog.
pub(crate) async fn blog(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    render(state, headers, "/blog".to_owned(), move |site| {
        site.blog(&params)
    })
    .await
}

/// Handle GET /blog/{slug}.
pub(crate) async fn post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let route = format!("/blog/{slug}");
    render(state, headers, route, move |site| site.post(&slug)).await
}

/// Handle GET /{slug}.
pub(crate) async fn page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let route = format!("/{slug}");
    render(state, headers, route, move |site| site.page(&slug)).await
}

/// Handle GET on a form endpoint by serving the CMS page with that slug.
pub(crate) async fn form_page(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let route = uri.path().to_owned();
    let slug = route.trim_start_matches('/').to_owned();
    render(state, headers, route, move |site| site.page(&slug)).await
}

/// Fallback for unmatched paths.
pub(crate) async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound(uri.path().to_owned())
}

fn parse_id(raw: &str, route: &str) -> Result<u64, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::NotFound(route.to_owned()))
}

/// Render on a blocking thread and build the response.
async fn render<F>(
    state: Arc<AppState>,
    headers: HeaderMap,
    route: String,
    build: F,
) -> Result<Response, ServerError>
where
    F: FnOnce(&Site) -> Result<RenderedPage, SiteError> + Send + 'static,
{
    let task_state = Arc::clone(&state);
    let page = tokio::task::spawn_blocking(move || build(&task_state.site)).await??;

    if state.verbose {
        for warning in &page.warnings {
            tracing::warn!(path = %route, warning = %warning, "Page render warning");
        }
    }

    let etag = compute_etag(&state.version, &page.html);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Html(page.html),
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars).
pub(crate) fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
