//! # ut-mail
//!
//! Builds and delivers retirement notices:
//!
//! 1. [`template::render_template`] fills a Handlebars template
//! 2. [`MailMessage::parse`] splits the result into headers and body
//! 3. [`notice::take_ticket_fields`] pulls out the `Bug-*` headers meant for
//!    the ticket, [`notice::address`] sets the recipients
//! 4. [`sign::sign`] clear-signs the body with gpg
//! 5. [`relay::send`] pipes the message to `sendmail` over ssh

mod error;
pub mod message;
pub mod notice;
pub mod relay;
pub mod sign;
pub mod template;

pub use error::MailError;
pub use message::MailMessage;
pub use notice::{Recipients, address, take_ticket_fields};
pub use relay::send;
pub use sign::sign;
pub use template::{TemplateContext, render_template};
