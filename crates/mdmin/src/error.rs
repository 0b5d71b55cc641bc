//! CLI error types.

use mdmin_config::ConfigError;
use mdmin_page::PageError;
use mdmin_renderer::RewriteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Rewrite(#[from] RewriteError),

    #[error("{0}")]
    Page(#[from] PageError),

    #[error("{0}")]
    Validation(String),
}
