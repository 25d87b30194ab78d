//! # ut-core
//!
//! Core types and pure logic for the undertaker retirement tooling.
//!
//! This crate provides the pieces shared by every undertaker command:
//! - Retirement ticket and developer record types
//! - The whiteboard parser (tagged phase markers instead of ad-hoc matching)
//! - The deadline calculator for the follow-up mail schedule
//! - Commit-activity records and the inactivity filter
//! - The [`process::CommandRunner`] seam used for ssh, gpg and linters
//! - Cross-cutting error types

pub mod activity;
pub mod deadline;
pub mod developer;
pub mod errors;
pub mod process;
pub mod ticket;
pub mod whiteboard;

pub use errors::CoreError;
