//! # ut-clients
//!
//! HTTP clients for the services the retirement tooling reads and updates:
//! - the Bugzilla REST API (ticket search, lookup and update)
//! - the static commit-activity JSON feed

pub mod activity;
pub mod bugzilla;

mod error;
mod http;

pub use activity::fetch_activity;
pub use bugzilla::{BugzillaClient, TicketQuery};
pub use error::ClientError;
