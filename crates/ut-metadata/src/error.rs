use std::path::PathBuf;

use thiserror::Error;
use ut_core::process::ProcessError;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("repository walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("pkgcheck failed: {0}")]
    Lint(#[from] ProcessError),
}
