//! Minimal RFC 822 style message model.
//!
//! Just enough to read the headers a template produced, edit them, and
//! write the message back out for `sendmail -t`. Header names compare
//! case-insensitively; order is preserved. Values are kept decoded and only
//! encoded (RFC 2047) when the message is rendered.

use std::fmt;

use lettre::message::Mailboxes;
use lettre::message::header::{self, Header, HeaderName, HeaderValue, Headers};

use crate::error::MailError;

/// Headers rendered from a mailbox list rather than as free text.
const ADDRESS_HEADERS: [&str; 4] = ["From", "To", "Cc", "Reply-To"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailMessage {
    headers: Vec<(String, String)>,
    mailboxes: Vec<(String, Mailboxes)>,
    pub body: String,
}

impl MailMessage {
    /// Parse rendered template output.
    ///
    /// Folded header lines (starting with whitespace) are joined to the
    /// previous header value with a newline. Everything after the first
    /// empty line is the body.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::MalformedHeader`] for a header line without a
    /// valid ASCII name, or a continuation line before any header.
    pub fn parse(text: &str) -> Result<Self, MailError> {
        let mut headers: Vec<(String, String)> = Vec::new();
        let mut offset = 0;

        for raw in text.split_inclusive('\n') {
            offset += raw.len();
            let line = raw.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                return Ok(Self {
                    headers,
                    mailboxes: Vec::new(),
                    body: text[offset..].to_string(),
                });
            }

            if line.starts_with([' ', '\t']) {
                let (_, value) = headers
                    .last_mut()
                    .ok_or_else(|| MailError::MalformedHeader(line.to_string()))?;
                value.push('\n');
                value.push_str(line.trim_start());
                continue;
            }

            let (name, value) = line
                .split_once(':')
                .filter(|(name, _)| HeaderName::new_from_ascii(name.to_string()).is_ok())
                .ok_or_else(|| MailError::MalformedHeader(line.to_string()))?;
            headers.push((name.to_string(), value.trim().to_string()));
        }

        Ok(Self {
            headers,
            mailboxes: Vec::new(),
            body: String::new(),
        })
    }

    /// First value of header `name`.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Set header `name`, replacing any existing occurrences in place.
    /// `name` must be a valid ASCII header name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.mailboxes.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        let value = value.into();
        match self.headers.iter().position(|(key, _)| key.eq_ignore_ascii_case(name)) {
            Some(index) => {
                self.headers[index] = (name.to_string(), value);
                let mut seen = 0;
                self.headers.retain(|(key, _)| {
                    if key.eq_ignore_ascii_case(name) {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Set an address header from a mailbox list.
    pub fn set_mailboxes(&mut self, name: &str, mailboxes: Mailboxes) {
        self.set(name, mailboxes.to_string());
        self.mailboxes.push((name.to_string(), mailboxes));
    }

    /// Remove every occurrence of header `name`, returning the first value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let first = self.header(name).map(str::to_string);
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.mailboxes.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        first
    }

    /// Wire form of the message: headers, an empty line, the body.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Headers as lettre encodes them: non-ASCII text becomes encoded
    /// words, long values are folded.
    fn wire_headers(&self) -> Headers {
        let mut wire = Headers::new();
        for (name, value) in &self.headers {
            let mailboxes = self
                .mailboxes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, mailboxes)| mailboxes.clone())
                .or_else(|| value.parse::<Mailboxes>().ok());
            if let Some(encoded) = mailboxes.and_then(|mailboxes| address_header(name, mailboxes)) {
                wire.insert_raw(encoded);
                continue;
            }
            if let Ok(header_name) = HeaderName::new_from_ascii(name.clone()) {
                wire.insert_raw(HeaderValue::new(header_name, value.replace('\n', " ")));
            }
        }
        wire
    }
}

fn address_header(name: &str, mailboxes: Mailboxes) -> Option<HeaderValue> {
    let name = ADDRESS_HEADERS
        .into_iter()
        .find(|known| known.eq_ignore_ascii_case(name))?;
    let encoded = match name {
        "From" => header::From::from(mailboxes).display(),
        "To" => header::To::from(mailboxes).display(),
        "Cc" => header::Cc::from(mailboxes).display(),
        _ => header::ReplyTo::from(mailboxes).display(),
    };
    Some(encoded)
}

impl fmt::Display for MailMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // sendmail gets local line endings; the signed body already has them.
        f.write_str(&self.wire_headers().to_string().replace("\r\n", "\n"))?;
        writeln!(f)?;
        f.write_str(&self.body)
    }
}
