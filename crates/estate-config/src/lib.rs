//! Configuration management for the estate site.
//!
//! Parses `estate.toml` configuration files with serde and discovers them in
//! the current directory or its parents. CLI settings are applied during load
//! via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//!
//! Expanded fields:
//! - `server.host`
//! - `api.base_url`
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "${ESTATE_HOST:-127.0.0.1}"
//! port = 3000
//!
//! [api]
//! base_url = "https://cms.example.com/api"
//! timeout_secs = 15
//!
//! [site]
//! name = "Coastline Realty"
//! per_page = 12
//! ```

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "estate.toml";

/// Largest accepted `site.per_page`.
const MAX_PER_PAGE: u32 = 100;

/// CLI settings that override configuration file values.
///
/// Only `Some` fields override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content API base URL.
    pub api_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Content API configuration.
    pub api: ApiConfig,
    /// Site presentation configuration.
    pub site: SiteConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Content API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST API base URL, e.g. `http://localhost:8192/api`.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8192/api".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Site presentation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name shown in titles and the header.
    pub name: String,
    /// Listing page size.
    pub per_page: u32,
    /// Featured properties on the home page.
    pub featured_limit: u32,
    /// Latest posts on the home page.
    pub latest_posts: u32,
    /// Similar properties on a property page.
    pub similar_limit: u32,
    /// Image shown when a property has none.
    pub placeholder_image: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Real Estate".to_owned(),
            per_page: 12,
            featured_limit: 6,
            latest_posts: 3,
            similar_limit: 4,
            placeholder_image: "/static/placeholder.svg".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g. "`api.base_url`").
        field: String,
        /// Error message (e.g. "${`CMS_URL`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `estate.toml` in the current directory and parents, falling back to
    /// defaults. CLI settings take precedence over file values and the result
    /// is validated.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(api_url) = &settings.api_url {
            self.api.base_url.clone_from(api_url);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".to_owned()));
        }

        require_non_empty(&self.api.base_url, "api.base_url")?;
        require_http_url(&self.api.base_url, "api.base_url")?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        if !(1..=MAX_PER_PAGE).contains(&self.site.per_page) {
            return Err(ConfigError::Validation(format!(
                "site.per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.api.base_url = expand::expand_env(&self.api.base_url, "api.base_url")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.api.base_url, "http://localhost:8192/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.site.per_page, 12);
        assert_eq!(config.site.featured_limit, 6);
        assert_eq!(config.site.latest_posts, 3);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.site.name, "Real Estate");
    }

    #[test]
    fn test_parse_all_sections() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 8080

[api]
base_url = "https://cms.example.com/api"
timeout_secs = 5

[site]
name = "Coastline Realty"
per_page = 24
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.api.base_url, "https://cms.example.com/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.site.name, "Coastline Realty");
        assert_eq!(config.site.per_page, 24);
        assert_eq!(config.site.featured_limit, 6);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estate.toml");
        std::fs::write(&path, "[server]\nport = 4000\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estate.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estate.toml");
        std::fs::write(&path, "[api]\nbase_url = \"ftp://cms\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estate.toml");
        std::fs::write(&path, "[server]\nhost = \"10.0.0.1\"\nport = 4000\n").unwrap();

        let settings = CliSettings {
            port: Some(9000),
            api_url: Some("https://api.test/api".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.api.base_url, "https://api.test/api");
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estate.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            api_url: Some("not-a-url".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("ESTATE_TEST_CMS", "cms.internal");
        }

        let toml = r#"
[server]
host = "${ESTATE_TEST_BIND:-0.0.0.0}"

[api]
base_url = "http://${ESTATE_TEST_CMS}/api"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.api.base_url, "http://cms.internal/api");

        unsafe {
            std::env::remove_var("ESTATE_TEST_CMS");
        }
    }

    #[test]
    fn test_validate_default_passes() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.server.host = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_validate_port_zero() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_timeout_zero() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_per_page_bounds() {
        let mut config = Config::default();
        config.site.per_page = 0;
        assert!(config.validate().is_err());
        config.site.per_page = 101;
        assert!(config.validate().is_err());
        config.site.per_page = 100;
        config.validate().unwrap();
    }
}
