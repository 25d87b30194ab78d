//! OpenPGP clear-signing of the mail body.

use ut_core::process::{CommandRunner, Invocation};

use crate::error::MailError;
use crate::message::MailMessage;

/// Replace the body of `message` with its `gpg --clearsign` output.
///
/// # Errors
///
/// Returns [`MailError::Process`] if gpg fails (no key, cancelled
/// passphrase prompt) and [`MailError::Encoding`] if its output is not text.
pub fn sign(runner: &dyn CommandRunner, message: &mut MailMessage) -> Result<(), MailError> {
    let invocation = Invocation::new("gpg")
        .arg("--clearsign")
        .stdin(message.body.as_bytes());
    let signed = runner.run(&invocation)?;
    message.body = String::from_utf8(signed)?;
    Ok(())
}
