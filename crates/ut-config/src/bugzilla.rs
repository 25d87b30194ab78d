//! Bug tracker configuration and API key resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_url() -> String {
    "https://bugs.gentoo.org".into()
}

fn default_token_file() -> String {
    "~/.bugz_token".into()
}

fn default_product() -> String {
    "Gentoo Developers/Staff".into()
}

fn default_component() -> String {
    "Retirement".into()
}

fn default_open_statuses() -> Vec<String> {
    vec!["UNCONFIRMED".into(), "CONFIRMED".into(), "IN_PROGRESS".into()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BugzillaConfig {
    /// Base URL of the Bugzilla instance, without trailing slash.
    #[serde(default = "default_url")]
    pub url: String,

    /// API key. When empty the key is read from `token_file`.
    #[serde(default)]
    pub api_key: String,

    /// File holding the API key; `~/` expands to the home directory.
    #[serde(default = "default_token_file")]
    pub token_file: String,

    /// Product retirement tickets are filed under.
    #[serde(default = "default_product")]
    pub product: String,

    /// Component retirement tickets are filed under.
    #[serde(default = "default_component")]
    pub component: String,

    /// Statuses counted as an open retirement ticket.
    #[serde(default = "default_open_statuses")]
    pub open_statuses: Vec<String>,
}

impl Default for BugzillaConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
            token_file: default_token_file(),
            product: default_product(),
            component: default_component(),
            open_statuses: default_open_statuses(),
        }
    }
}

impl BugzillaConfig {
    /// Resolve the API key: the configured value, else the token file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if no key is configured and
    /// the token file is missing, unreadable or empty.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        let configured = self.api_key.trim();
        if !configured.is_empty() {
            return Ok(configured.to_string());
        }

        let path = self.token_path();
        read_token(&path).ok_or(ConfigError::MissingCredentials { path })
    }

    /// Token file path with `~/` expanded.
    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        expand_home(&self.token_file)
    }
}

fn read_token(path: &Path) -> Option<String> {
    let token = std::fs::read_to_string(path).ok()?;
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Expand a leading `~/` to the user's home directory.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
