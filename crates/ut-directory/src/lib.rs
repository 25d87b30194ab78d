//! # ut-directory
//!
//! Reads developer records from the directory service. The directory is not
//! reachable directly; lookups run `ldapsearch` on a remote host over ssh
//! through a [`ut_core::process::CommandRunner`], and the LDIF-style output
//! is parsed and validated here.

mod error;
pub mod ldif;
pub mod lookup;

pub use error::DirectoryError;
pub use lookup::{LOOKUP_ATTRIBUTES, lookup_developer};
