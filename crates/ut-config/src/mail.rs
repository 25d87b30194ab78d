//! Notification mail configuration.

use serde::{Deserialize, Serialize};

fn default_ssh_host() -> String {
    "dev.gentoo.org".into()
}

fn default_domain() -> String {
    "gentoo.org".into()
}

fn default_retirement_alias() -> String {
    "retirement@gentoo.org".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Host to ssh into for `sendmail`.
    #[serde(default = "default_ssh_host")]
    pub ssh_host: String,

    /// Organizational mail domain; developers are `<username>@<domain>`.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Retirement process alias, always CC'd and used as Reply-To.
    #[serde(default = "default_retirement_alias")]
    pub retirement_alias: String,

    /// Signature name. Empty means the invoking user's GECOS name.
    #[serde(default)]
    pub signature: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            ssh_host: default_ssh_host(),
            domain: default_domain(),
            retirement_alias: default_retirement_alias(),
            signature: String::new(),
        }
    }
}
