//! Commit-activity feed configuration.

use serde::{Deserialize, Serialize};

fn default_feed_url() -> String {
    "https://qa-reports.gentoo.org/output/active-devs.json".into()
}

/// Default inactivity threshold in days.
const fn default_min_inactivity_days() -> u32 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivityConfig {
    /// URL of the JSON activity feed.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Minimum inactivity to complain about, in days.
    #[serde(default = "default_min_inactivity_days")]
    pub min_inactivity_days: u32,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            min_inactivity_days: default_min_inactivity_days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ActivityConfig::default();
        assert!(config.feed_url.ends_with("/active-devs.json"));
        assert_eq!(config.min_inactivity_days, 120);
    }
}
