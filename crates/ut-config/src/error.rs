//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// No bug tracker API key is configured and the token file is unreadable.
    #[error(
        "Put bugzilla API key into {} (or set UNDERTAKER_BUGZILLA__API_KEY)",
        .path.display()
    )]
    MissingCredentials { path: PathBuf },

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
