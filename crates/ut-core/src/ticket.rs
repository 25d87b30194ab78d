//! Retirement tickets and the updates the notification sender applies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::whiteboard::Whiteboard;

/// Bug tracker status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Unconfirmed,
    Confirmed,
    InProgress,
    Resolved,
    Verified,
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    /// Statuses a retirement ticket can have while the process is running.
    pub const OPEN: [Self; 3] = [Self::Unconfirmed, Self::Confirmed, Self::InProgress];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unconfirmed => "UNCONFIRMED",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Verified => "VERIFIED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A retirement ticket as read from the bug tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub product: String,
    pub component: String,
    pub status: TicketStatus,
    pub whiteboard: String,
    pub summary: String,
    pub alias: Vec<String>,
    pub url: String,
}

impl Ticket {
    #[must_use]
    pub fn parsed_whiteboard(&self) -> Whiteboard {
        Whiteboard::parse(&self.whiteboard)
    }

    /// The developer alias of this ticket. `None` when the ticket carries no
    /// alias.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AmbiguousAlias`] if more than one alias is set.
    pub fn single_alias(&self) -> Result<Option<&str>, CoreError> {
        match self.alias.as_slice() {
            [] => Ok(None),
            [alias] => Ok(Some(alias.as_str())),
            aliases => Err(CoreError::AmbiguousAlias {
                ticket: self.id,
                aliases: aliases.to_vec(),
            }),
        }
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:<6} {:<11} - {}", self.id, self.status, self.summary)
    }
}

/// Ticket fields carried by a rendered notification mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketFields {
    pub comment: String,
    pub title: String,
    pub whiteboard: String,
}

/// Comment body of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateComment {
    pub body: String,
}

/// Field changes sent to the bug tracker. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<UpdateComment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whiteboard: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reset_assigned_to: bool,
}

impl TicketUpdate {
    /// Update applied after a notification mail went out: move the ticket
    /// into the retirement component, reopen it if it was resolved, record
    /// the mail fields and hand it back to the default assignee.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::WrongProduct`] if the ticket is not filed under
    /// the retirement product.
    pub fn retirement_notice(
        ticket: &Ticket,
        product: &str,
        component: &str,
        fields: TicketFields,
    ) -> Result<Self, CoreError> {
        if ticket.product != product {
            return Err(CoreError::WrongProduct {
                ticket: ticket.id,
                expected: product.to_string(),
                found: ticket.product.clone(),
            });
        }

        Ok(Self {
            component: (ticket.component != component).then(|| component.to_string()),
            status: (ticket.status == TicketStatus::Resolved).then_some(TicketStatus::Confirmed),
            comment: Some(UpdateComment {
                body: fields.comment,
            }),
            summary: Some(fields.title),
            whiteboard: Some(fields.whiteboard),
            reset_assigned_to: true,
        })
    }
}
