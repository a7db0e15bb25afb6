//! CLI error types.

use estate_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid page document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Server(String),
}
