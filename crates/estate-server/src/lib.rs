//! HTTP server for the estate site.
//!
//! Serves server-rendered HTML pages built by `estate-site` from the content
//! API, accepts form posts, and ships a small set of static assets.
//!
//! # Quick Start
//!
//! ```no_run
//! use estate_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig {
//!         port: 3000,
//!         api_url: "http://localhost:8192/api".to_owned(),
//!         ..ServerConfig::default()
//!     };
//!     run_server(config).await
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (estate-server)
//!                        │
//!                        ├─► page handlers ──spawn_blocking──► Site (estate-site)
//!                        │                                        │
//!                        │                                        └─► ApiClient ──HTTP──► content API
//!                        │
//!                        ├─► form handlers ──► Site::submit
//!                        │
//!                        └─► /static assets (embedded)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use estate_api::{ApiClient, ContentSource};
use estate_site::{Site, SiteConfig};
use state::AppState;

pub use app::create_router;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content API base URL.
    pub api_url: String,
    /// Content API request timeout.
    pub api_timeout: Duration,
    /// Site presentation settings.
    pub site: SiteConfig,
    /// Log page warnings.
    pub verbose: bool,
    /// Application version (part of every `ETag`).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            api_url: "http://localhost:8192/api".to_owned(),
            api_timeout: Duration::from_secs(30),
            site: SiteConfig::default(),
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::with_timeout(&config.api_url, config.api_timeout);
    let source: Arc<dyn ContentSource> = Arc::new(client);
    let app = create_router(source, &config);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, api = %config.api_url, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the loaded configuration file.
#[must_use]
pub fn server_config_from_config(
    config: &estate_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    let site = &config.site;
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        api_url: config.api.base_url.clone(),
        api_timeout: config.api.timeout(),
        site: SiteConfig {
            name: site.name.clone(),
            per_page: site.per_page,
            featured_limit: site.featured_limit,
            latest_posts: site.latest_posts,
            similar_limit: site.similar_limit,
            placeholder_image: site.placeholder_image.clone(),
        },
        verbose,
        version,
    }
}

fn app_state(source: Arc<dyn ContentSource>, config: &ServerConfig) -> Arc<AppState> {
    Arc::new(AppState {
        site: Site::new(source, config.site.clone()),
        verbose: config.verbose,
        version: config.version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let mut config = estate_config::Config::default();
        config.server.port = 8080;
        config.api.base_url = "https://cms.example.com/api".to_owned();
        config.api.timeout_secs = 5;
        config.site.name = "Coastline".to_owned();

        let server = server_config_from_config(&config, "1.2.3".to_owned(), true);
        assert_eq!(server.port, 8080);
        assert_eq!(server.api_url, "https://cms.example.com/api");
        assert_eq!(server.api_timeout, Duration::from_secs(5));
        assert_eq!(server.site.name, "Coastline");
        assert_eq!(server.version, "1.2.3");
        assert!(server.verbose);
    }
}
