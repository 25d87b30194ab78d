use thiserror::Error;
use ut_core::process::ProcessError;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::RenderError>),

    #[error("malformed mail header line: '{0}'")]
    MalformedHeader(String),

    #[error("rendered mail lacks the '{0}' header")]
    MissingHeader(&'static str),

    #[error("invalid mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("{0}")]
    Process(#[from] ProcessError),

    #[error("signed mail is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl From<handlebars::RenderError> for MailError {
    fn from(error: handlebars::RenderError) -> Self {
        Self::Template(Box::new(error))
    }
}
