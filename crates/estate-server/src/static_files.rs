//! Embedded static assets.

use std::sync::Arc;

use axum::Router;
use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::state::AppState;

/// Assets compiled into the binary: name, content type, body.
const ASSETS: [(&str, &str, &str); 2] = [
    ("site.css", "text/css; charset=utf-8", include_str!("../assets/site.css")),
    ("placeholder.svg", "image/svg+xml", include_str!("../assets/placeholder.svg")),
];

/// Router serving `/static/{file}`.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new().route("/static/{file}", get(serve_asset))
}

async fn serve_asset(Path(file): Path<String>) -> Response {
    match ASSETS.iter().find(|(name, _, _)| *name == file) {
        Some((_, mime, body)) => (
            [
                (header::CONTENT_TYPE, *mime),
                (header::CACHE_CONTROL, "public, max-age=86400"),
            ],
            *body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
