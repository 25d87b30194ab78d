//! Turning a rendered template into a deliverable retirement notice.

use lettre::Address;
use lettre::message::{Mailbox, Mailboxes};
use ut_core::developer::DeveloperRecord;
use ut_core::ticket::TicketFields;

use crate::error::MailError;
use crate::message::MailMessage;

pub const BUG_COMMENT: &str = "Bug-Comment";
pub const BUG_TITLE: &str = "Bug-Title";
pub const BUG_WHITEBOARD: &str = "Bug-Whiteboard";

const CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// Strip the ticket update headers from `message` and return their values.
///
/// # Errors
///
/// Returns [`MailError::MissingHeader`] naming the first header the template
/// did not produce. The message is left untouched in that case.
pub fn take_ticket_fields(message: &mut MailMessage) -> Result<TicketFields, MailError> {
    for name in [BUG_COMMENT, BUG_TITLE, BUG_WHITEBOARD] {
        if message.header(name).is_none() {
            return Err(MailError::MissingHeader(name));
        }
    }

    Ok(TicketFields {
        comment: message.remove(BUG_COMMENT).unwrap_or_default(),
        title: message.remove(BUG_TITLE).unwrap_or_default(),
        whiteboard: message.remove(BUG_WHITEBOARD).unwrap_or_default(),
    })
}

/// Who a notice goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipients {
    pub to: Mailbox,
    pub cc: Mailboxes,
    pub reply_to: Mailbox,
}

impl Recipients {
    /// The developer at their organizational address, CC'ing their other
    /// known addresses and the retirement alias.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::InvalidAddress`] if any address does not parse.
    pub fn for_developer(
        record: &DeveloperRecord,
        domain: &str,
        retirement_alias: &str,
    ) -> Result<Self, MailError> {
        let primary = record.primary_address(domain);
        let to = Mailbox::new(Some(record.full_name.clone()), parse_address(&primary)?);
        let reply_to = Mailbox::new(None, parse_address(retirement_alias)?);

        let mut seen: Vec<&str> = vec![primary.as_str()];
        let mut cc = Mailboxes::new();
        for email in record.emails.iter().map(String::as_str).chain([retirement_alias]) {
            if seen.iter().any(|known| known.eq_ignore_ascii_case(email)) {
                continue;
            }
            seen.push(email);
            cc.push(Mailbox::new(None, parse_address(email)?));
        }

        Ok(Self { to, cc, reply_to })
    }

    /// Write the addressing headers onto `message`.
    pub fn apply(&self, message: &mut MailMessage) {
        message.set("Content-Type", CONTENT_TYPE);
        message.set_mailboxes("To", self.to.clone().into());
        message.set_mailboxes("Cc", self.cc.clone());
        message.set_mailboxes("Reply-To", self.reply_to.clone().into());
    }
}

/// Address `message` to the developer in `record`.
///
/// # Errors
///
/// See [`Recipients::for_developer`].
pub fn address(
    message: &mut MailMessage,
    record: &DeveloperRecord,
    domain: &str,
    retirement_alias: &str,
) -> Result<(), MailError> {
    Recipients::for_developer(record, domain, retirement_alias)?.apply(message);
    Ok(())
}

fn parse_address(address: &str) -> Result<Address, MailError> {
    address
        .trim()
        .parse()
        .map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}
