//! Cross-cutting error types for undertaker.
//!
//! Domain-specific errors (e.g., `ClientError`, `DirectoryError`) are defined
//! in their respective crates. Everything converges into `anyhow` in `ut-cli`.

use thiserror::Error;

/// Errors raised by the core domain logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A retirement ticket carries more than one alias.
    #[error("bug {ticket} has {} aliases, expected exactly one: {aliases:?}", .aliases.len())]
    AmbiguousAlias { ticket: u64, aliases: Vec<String> },

    /// An activity feed timestamp is out of the representable range.
    #[error("invalid commit timestamp {timestamp} for developer '{developer}'")]
    InvalidTimestamp { developer: String, timestamp: i64 },

    /// Neither the directory nor the command line named a ticket.
    #[error("Please set gentooDevBug in LDAP or pass --dev-bug!")]
    MissingTicketId,

    /// A ticket belongs to a product other than the retirement product.
    #[error("bug {ticket} belongs to product '{found}', expected '{expected}'")]
    WrongProduct {
        ticket: u64,
        expected: String,
        found: String,
    },
}
