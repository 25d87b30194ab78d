//! Parser for the `ldapsearch -LLL` output format.
//!
//! Only the subset ldapsearch emits for a single entry is handled: `key: value`
//! and `key:: base64` lines, folded continuation lines (a leading single
//! space) and `#` comments. Blank lines separate entries; attributes of all
//! entries are merged, as only one entry is ever requested.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::DirectoryError;

/// Attributes of a directory entry, multi-valued in directory order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub dn: Option<String>,
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl Entry {
    /// All values of `attribute`, empty when absent.
    #[must_use]
    pub fn values(&self, attribute: &str) -> &[String] {
        self.attributes.get(attribute).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dn.is_none() && self.attributes.is_empty()
    }
}

/// Parse ldapsearch output into a single merged entry.
///
/// # Errors
///
/// Returns [`DirectoryError::MalformedLine`] for a line without a `:`
/// separator and [`DirectoryError::InvalidBase64`] if a `::` value does not
/// decode to UTF-8 text.
pub fn parse(output: &str) -> Result<Entry, DirectoryError> {
    let mut entry = Entry::default();

    for line in unfold(output) {
        let (key, value) = parse_line(&line)?;
        if key == "dn" {
            entry.dn = Some(value);
        } else {
            entry.attributes.entry(key).or_default().push(value);
        }
    }

    Ok(entry)
}

/// Join folded lines and drop blanks and comments.
fn unfold(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in output.lines() {
        if let Some(rest) = raw.strip_prefix(' ') {
            if let Some(last) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        lines.push(raw.to_string());
    }
    lines
}

fn parse_line(line: &str) -> Result<(String, String), DirectoryError> {
    let (key, rest) = line
        .split_once(':')
        .ok_or_else(|| DirectoryError::MalformedLine(line.to_string()))?;
    if key.is_empty() {
        return Err(DirectoryError::MalformedLine(line.to_string()));
    }

    let value = match rest.strip_prefix(':') {
        Some(encoded) => decode(key, encoded.trim_start())?,
        None => rest.strip_prefix(' ').unwrap_or(rest).to_string(),
    };
    Ok((key.to_string(), value))
}

fn decode(attribute: &str, encoded: &str) -> Result<String, DirectoryError> {
    let invalid = |reason: String| DirectoryError::InvalidBase64 {
        attribute: attribute.to_string(),
        reason,
    };
    let bytes = STANDARD.decode(encoded).map_err(|e| invalid(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| invalid(e.to_string()))
}
