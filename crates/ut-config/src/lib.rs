//! # ut-config
//!
//! Layered configuration loading for undertaker using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`UNDERTAKER_*` prefix, `__` as separator)
//! 2. Project-level `.undertaker/config.toml`
//! 3. User-level `~/.config/undertaker/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `UNDERTAKER_BUGZILLA__API_KEY` -> `bugzilla.api_key`,
//! `UNDERTAKER_MAIL__SSH_HOST` -> `mail.ssh_host`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ut_config::UndertakerConfig;
//!
//! let config = UndertakerConfig::load_with_dotenv().expect("config");
//! let api_key = config.bugzilla.api_key().expect("credentials");
//! ```

mod activity;
mod bugzilla;
mod directory;
mod error;
mod mail;
mod repository;

pub use activity::ActivityConfig;
pub use bugzilla::{BugzillaConfig, expand_home};
pub use directory::DirectoryConfig;
pub use error::ConfigError;
pub use mail::MailConfig;
pub use repository::RepositoryConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UndertakerConfig {
    #[serde(default)]
    pub bugzilla: BugzillaConfig,
    #[serde(default)]
    pub activity: ActivityConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub repository: RepositoryConfig,
}

impl UndertakerConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type, [`ConfigError::InvalidValue`] if a value
    /// fails [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that every command relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.bugzilla.url;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(invalid("bugzilla.url", "must be an http(s) URL"));
        }
        if self.mail.domain.trim().is_empty() {
            return Err(invalid("mail.domain", "must not be empty"));
        }
        if self.repository.domain.trim().is_empty() {
            return Err(invalid("repository.domain", "must not be empty"));
        }
        Ok(())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".undertaker/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("UNDERTAKER_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("undertaker").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = UndertakerConfig::default();
        assert_eq!(config.bugzilla.component, "Retirement");
        assert_eq!(config.activity.min_inactivity_days, 120);
        assert_eq!(config.repository.proxy_maint_email, "proxy-maint@gentoo.org");
    }

    #[test]
    fn serialized_defaults_extract_back() {
        let config: UndertakerConfig =
            Figment::from(Serialized::defaults(UndertakerConfig::default()))
                .extract()
                .expect("should extract defaults");
        assert_eq!(config.directory.base_dn, "ou=devs,dc=gentoo,dc=org");
        assert_eq!(config.mail.retirement_alias, "retirement@gentoo.org");
    }

    #[test]
    fn validate_rejects_non_http_tracker_url() {
        let mut config = UndertakerConfig::default();
        assert!(config.validate().is_ok());

        config.bugzilla.url = "bugs.gentoo.org".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "bugzilla.url"));
    }

    #[test]
    fn validate_rejects_empty_domains() {
        let mut config = UndertakerConfig::default();
        config.repository.domain = " ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "repository.domain"
        ));
    }
}
