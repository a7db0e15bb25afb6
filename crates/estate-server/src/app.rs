//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use estate_api::ContentSource;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::static_files;
use crate::{ServerConfig, app_state};

/// Create the application router over a content source.
pub fn create_router(source: Arc<dyn ContentSource>, config: &ServerConfig) -> Router {
    let state = app_state(source, config);

    let page_routes = Router::new()
        .route("/", get(handlers::pages::home))
        .route("/properties", get(handlers::pages::properties))
        .route("/properties/{id}", get(handlers::pages::property))
        .route("/agents", get(handlers::pages::agents))
        .route("/agents/{id}", get(handlers::pages::agent))
        .route("/blog", get(handlers::pages::blog))
        .route("/blog/{slug}", get(handlers::pages::post))
        .route("/{slug}", get(handlers::pages::page));

    // GET on a form path still serves the CMS page of that slug.
    let form_routes = Router::new()
        .route(
            "/contact",
            get(handlers::pages::form_page).post(handlers::forms::contact),
        )
        .route(
            "/property-inquiry",
            get(handlers::pages::form_page).post(handlers::forms::property_inquiry),
        )
        .route(
            "/inquiry",
            get(handlers::pages::form_page).post(handlers::forms::inquiry),
        )
        .route(
            "/mandate",
            get(handlers::pages::form_page).post(handlers::forms::mandate),
        );

    Router::new()
        .merge(page_routes)
        .merge(form_routes)
        .route("/healthz", get(handlers::health::healthz))
        .merge(static_files::static_router())
        .fallback(handlers::pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use estate_api::{MockSource, Page, Property};
    use tower::ServiceExt;

    use super::*;

    fn router(source: MockSource) -> Router {
        let config = ServerConfig {
            version: "1.0.0".to_owned(),
            ..ServerConfig::default()
        };
        create_router(Arc::new(source), &config)
    }

    fn source() -> MockSource {
        let mut about = Page::new("about", "About Us");
        about.content = r#"<p>Family run.</p>[button text="Call us" url="tel:+351123"]"#.to_owned();
        MockSource::new()
            .with_page(about)
            .with_property(Property::new(7, "Harbour Loft"))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_cms_page() {
        let response = get(router(source()), "/about").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ETAG));
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");

        let html = body_text(response).await;
        assert!(html.contains("<p>Family run.</p>"));
        assert!(html.contains(r#"href="tel:+351123""#));
    }

    #[tokio::test]
    async fn test_if_none_match_returns_not_modified() {
        let app = router(source());
        let first = get(app.clone(), "/properties/7").await;
        let etag = first.headers()[header::ETAG].clone();

        let second = app
            .oneshot(
                Request::builder()
                    .uri("/properties/7")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_missing_records_are_404() {
        for uri in ["/missing", "/properties/99", "/properties/abc", "/blog/nope", "/a/b/c"] {
            let response = get(router(source()), uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_is_502() {
        let response = get(router(source().with_failure("properties", 500)), "/properties").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.contains("Service unavailable"));
    }

    #[tokio::test]
    async fn test_contact_form() {
        let body = serde_urlencoded::to_string([
            ("name", "Ana"),
            ("email", "ana@example.com"),
            ("message", "Is it still available?"),
            ("property_id", "7"),
        ])
        .unwrap();
        let response = router(source())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/property-inquiry")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Message sent"));
    }

    #[tokio::test]
    async fn test_invalid_form_is_422() {
        let response = router(source())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/contact")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("name=&email=nope&message="))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Name is required"));
    }

    #[tokio::test]
    async fn test_static_and_health() {
        let css = get(router(source()), "/static/site.css").await;
        assert_eq!(css.status(), StatusCode::OK);
        assert_eq!(css.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");

        let health = get(router(source()), "/healthz").await;
        assert_eq!(health.status(), StatusCode::OK);
        assert!(body_text(health).await.contains(r#""version":"1.0.0""#));
    }
}
