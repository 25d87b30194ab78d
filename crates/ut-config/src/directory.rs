//! Directory service (LDAP over ssh) configuration.

use serde::{Deserialize, Serialize};

fn default_ssh_host() -> String {
    "dev.gentoo.org".into()
}

fn default_base_dn() -> String {
    "ou=devs,dc=gentoo,dc=org".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Host to ssh into for `ldapsearch`.
    #[serde(default = "default_ssh_host")]
    pub ssh_host: String,

    /// Base DN developer entries live under.
    #[serde(default = "default_base_dn")]
    pub base_dn: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            ssh_host: default_ssh_host(),
            base_dn: default_base_dn(),
        }
    }
}

impl DirectoryConfig {
    /// Expected DN of a developer entry.
    #[must_use]
    pub fn developer_dn(&self, username: &str) -> String {
        format!("uid={username},{}", self.base_dn)
    }
}
