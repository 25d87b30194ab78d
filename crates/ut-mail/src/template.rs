//! Mail template rendering.
//!
//! Templates are Handlebars documents producing a complete mail: headers,
//! a blank line, then the body. Output is plain text, so HTML escaping is
//! disabled.

use chrono::NaiveDate;
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::MailError;

/// Values available to a mail template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateContext {
    pub devname: String,
    pub firstname: String,
    pub fullname: String,
    pub today: NaiveDate,
    pub lastcommit: Option<NaiveDate>,
    pub signature: String,
}

/// Render `template` with `context`.
///
/// # Errors
///
/// Returns [`MailError::Template`] if the template does not parse or a
/// helper fails.
pub fn render_template(template: &str, context: &TemplateContext) -> Result<String, MailError> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    Ok(registry.render_template(template, context)?)
}
