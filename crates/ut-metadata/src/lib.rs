//! # ut-metadata
//!
//! Takes a departing developer out of the package ownership records
//! (`<category>/<package>/metadata.xml`) of a repository checkout.
//!
//! - [`record`] edits a single record
//! - [`tree`] walks the checkout and rewrites changed records
//! - [`lint`] runs pkgcheck over the touched packages

mod error;
pub mod lint;
pub mod record;
pub mod tree;

pub use error::MetadataError;
pub use lint::run_linter;
pub use record::{ReassignPolicy, Reassigned, reassign_record};
pub use tree::{ReassignReport, find_records, reassign_tree};
