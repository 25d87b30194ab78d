//! Package repository (ownership records) configuration.

use serde::{Deserialize, Serialize};

fn default_domain() -> String {
    "gentoo.org".into()
}

fn default_proxy_maint_email() -> String {
    "proxy-maint@gentoo.org".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryConfig {
    /// Maintainer addresses outside this domain are proxied maintainers.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Address of the proxy-maintenance project entry.
    #[serde(default = "default_proxy_maint_email")]
    pub proxy_maint_email: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            proxy_maint_email: default_proxy_maint_email(),
        }
    }
}
