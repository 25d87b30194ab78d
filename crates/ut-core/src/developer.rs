//! Developer records as read from the directory service.

use serde::Serialize;

use crate::errors::CoreError;

/// Account status a developer must have to be notified.
pub const ACTIVE_STATUS: &str = "active";

/// A developer's directory entry. Read-only from this tooling's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeveloperRecord {
    pub username: String,
    pub full_name: String,
    pub first_name: String,
    /// Other known addresses, in directory order.
    pub emails: Vec<String>,
    pub status: String,
    /// Retirement ticket linked in the directory.
    pub dev_bug: Option<u64>,
}

impl DeveloperRecord {
    /// Organizational address of the developer.
    #[must_use]
    pub fn primary_address(&self, domain: &str) -> String {
        format!("{}@{domain}", self.username)
    }

    /// Ticket to update: an explicit override wins over the directory link.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingTicketId`] if neither is available.
    pub fn ticket_id(&self, override_id: Option<u64>) -> Result<u64, CoreError> {
        override_id.or(self.dev_bug).ok_or(CoreError::MissingTicketId)
    }
}
