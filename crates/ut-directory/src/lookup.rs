//! Developer lookup via `ldapsearch` on a remote host.

use ut_core::developer::{ACTIVE_STATUS, DeveloperRecord};
use ut_core::process::{CommandRunner, Invocation};

use crate::error::DirectoryError;
use crate::ldif::{self, Entry};

/// Attributes requested for every developer lookup.
pub const LOOKUP_ATTRIBUTES: [&str; 5] = ["cn", "givenName", "email", "gentooStatus", "gentooDevBug"];

/// The `ssh <host> ldapsearch ...` command for `username`.
#[must_use]
pub fn lookup_invocation(host: &str, username: &str) -> Invocation {
    Invocation::new("ssh")
        .arg(host)
        .args(["ldapsearch", "-Z", "-LLL"])
        .arg(format!("uid={username}"))
        .args(LOOKUP_ATTRIBUTES)
}

/// Look up and validate the directory record of `username`.
///
/// # Errors
///
/// Returns [`DirectoryError`] if the remote command fails, its output does
/// not parse, the entry has an unexpected dn, or the record fails
/// validation (see [`validate`]).
pub fn lookup_developer(
    runner: &dyn CommandRunner,
    host: &str,
    base_dn: &str,
    username: &str,
) -> Result<DeveloperRecord, DirectoryError> {
    let stdout = runner.run(&lookup_invocation(host, username))?;
    let entry = ldif::parse(&String::from_utf8(stdout)?)?;
    tracing::debug!(username, attributes = entry.attributes.len(), "directory entry read");

    let expected = format!("uid={username},{base_dn}");
    match entry.dn.as_deref() {
        None => return Err(DirectoryError::NotFound(username.to_string())),
        Some(dn) if dn != expected => {
            return Err(DirectoryError::UnexpectedDn {
                expected,
                found: dn.to_string(),
            });
        }
        Some(_) => {}
    }

    validate(username, &entry)
}

/// Check a raw entry and turn it into a [`DeveloperRecord`].
///
/// The account must be `active`, carry exactly one `cn` and one
/// `givenName`, and at most one `gentooDevBug`.
///
/// # Errors
///
/// Returns [`DirectoryError::InactiveAccount`],
/// [`DirectoryError::AttributeCount`] or [`DirectoryError::InvalidDevBug`].
pub fn validate(username: &str, entry: &Entry) -> Result<DeveloperRecord, DirectoryError> {
    let status = entry.values("gentooStatus");
    if status != [ACTIVE_STATUS] {
        return Err(DirectoryError::InactiveAccount {
            username: username.to_string(),
            status: status.to_vec(),
        });
    }

    let full_name = exactly_one(entry, "cn")?;
    let first_name = exactly_one(entry, "givenName")?;

    let dev_bug = match entry.values("gentooDevBug") {
        [] => None,
        [value] => Some(
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| DirectoryError::InvalidDevBug(value.clone()))?,
        ),
        values => {
            return Err(DirectoryError::AttributeCount {
                attribute: "gentooDevBug".into(),
                expected: "at most one",
                found: values.len(),
            });
        }
    };

    Ok(DeveloperRecord {
        username: username.to_string(),
        full_name,
        first_name,
        emails: entry.values("email").to_vec(),
        status: ACTIVE_STATUS.to_string(),
        dev_bug,
    })
}

fn exactly_one(entry: &Entry, attribute: &str) -> Result<String, DirectoryError> {
    match entry.values(attribute) {
        [value] => Ok(value.clone()),
        values => Err(DirectoryError::AttributeCount {
            attribute: attribute.to_string(),
            expected: "exactly one",
            found: values.len(),
        }),
    }
}
