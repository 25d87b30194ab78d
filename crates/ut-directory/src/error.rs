use thiserror::Error;
use ut_core::process::ProcessError;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("ldapsearch failed: {0}")]
    Process(#[from] ProcessError),

    #[error("ldapsearch output is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("malformed ldapsearch line: '{0}'")]
    MalformedLine(String),

    #[error("attribute '{attribute}' has invalid base64 value: {reason}")]
    InvalidBase64 { attribute: String, reason: String },

    #[error("no directory entry for '{0}'")]
    NotFound(String),

    #[error("unexpected dn '{found}', expected '{expected}'")]
    UnexpectedDn { expected: String, found: String },

    #[error("developer '{username}' is not active (gentooStatus: {status:?})")]
    InactiveAccount {
        username: String,
        status: Vec<String>,
    },

    #[error("expected {expected} '{attribute}' value(s), found {found}")]
    AttributeCount {
        attribute: String,
        expected: &'static str,
        found: usize,
    },

    #[error("gentooDevBug '{0}' is not a bug number")]
    InvalidDevBug(String),
}
