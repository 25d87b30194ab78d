//! Maintainer removal within a single `metadata.xml`.
//!
//! The document is parsed with roxmltree only to locate nodes; edits are
//! applied to the original text by byte range so that everything not
//! touched keeps its formatting.

use std::ops::Range;

use roxmltree::{Document, Node, ParsingOptions};

/// Comment left behind when the last maintainer goes.
pub const MAINTAINER_NEEDED: &str = "<!-- maintainer-needed -->";

/// Declaration every rewritten record starts with.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Domain rules for deciding who is a proxied maintainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignPolicy {
    /// Addresses in this domain belong to developers; others are proxied.
    pub domain: String,
    /// The proxy-maintenance project entry sponsoring proxied maintainers.
    pub proxy_maint_email: String,
}

impl ReassignPolicy {
    #[must_use]
    pub fn new(domain: &str, proxy_maint_email: &str) -> Self {
        Self {
            domain: domain.to_string(),
            proxy_maint_email: proxy_maint_email.to_string(),
        }
    }

    fn is_developer(&self, email: &str) -> bool {
        email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain == self.domain)
    }
}

/// A record after the departing maintainer was taken out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassigned {
    pub text: String,
    /// No maintainer is left.
    pub up_for_grabs: bool,
}

/// Remove `departing` from the record `text`.
///
/// Returns `None` when `departing` does not maintain the package. Proxy
/// maintenance entries are dropped too when no proxied maintainer other
/// than `departing` remains. A sole remaining maintainer is replaced by
/// [`MAINTAINER_NEEDED`].
///
/// # Errors
///
/// Returns the parser error if `text` is not well-formed XML.
pub fn reassign_record(
    text: &str,
    departing: &str,
    policy: &ReassignPolicy,
) -> Result<Option<Reassigned>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)?;

    let maintainers: Vec<(Node<'_, '_>, Option<&str>)> = doc
        .root_element()
        .children()
        .filter(|node| node.has_tag_name("maintainer"))
        .map(|node| (node, maintainer_email(node)))
        .collect();

    let Some(leaving) = maintainers
        .iter()
        .find(|(_, email)| *email == Some(departing))
        .map(|(node, _)| *node)
    else {
        return Ok(None);
    };

    let other_proxied = maintainers.iter().any(|(_, email)| {
        email.is_some_and(|email| email != departing && !policy.is_developer(email))
    });

    let mut edits: Vec<(Range<usize>, &str)> = Vec::new();
    let mut remaining = maintainers.len();
    if !other_proxied {
        for (node, email) in &maintainers {
            if *node != leaving && *email == Some(policy.proxy_maint_email.as_str()) {
                edits.push((removal_range(text, *node), ""));
                remaining -= 1;
            }
        }
    }

    let up_for_grabs = remaining == 1;
    if up_for_grabs {
        edits.push((leaving.range(), MAINTAINER_NEEDED));
    } else {
        edits.push((removal_range(text, leaving), ""));
    }

    edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
    let mut edited = text.to_string();
    for (range, replacement) in edits {
        edited.replace_range(range, replacement);
    }

    Ok(Some(Reassigned {
        text: with_declaration(&edited),
        up_for_grabs,
    }))
}

fn maintainer_email<'a>(maintainer: Node<'a, '_>) -> Option<&'a str> {
    maintainer
        .children()
        .find(|child| child.has_tag_name("email"))
        .and_then(|email| email.text())
        .map(str::trim)
}

/// The element plus the whitespace before it, so the next sibling inherits
/// the removed element's indentation.
fn removal_range(text: &str, node: Node<'_, '_>) -> Range<usize> {
    let range = node.range();
    text[..range.start].trim_end().len()..range.end
}

fn with_declaration(document: &str) -> String {
    let document = document.strip_prefix('\u{feff}').unwrap_or(document);
    let rest = if document.starts_with("<?xml") {
        document.find("?>").map_or(document, |end| &document[end + 2..])
    } else {
        document
    };
    format!("{XML_DECLARATION}\n{}", rest.trim_start())
}
