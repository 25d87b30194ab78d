//! Delivery through `sendmail` on a remote host.

use ut_core::process::{CommandRunner, Invocation};

use crate::error::MailError;
use crate::message::MailMessage;

/// The `ssh <host> sendmail -i -t` command delivering `message`.
#[must_use]
pub fn send_invocation(host: &str, message: &MailMessage) -> Invocation {
    Invocation::new("ssh")
        .arg(host)
        .args(["sendmail", "-i", "-t"])
        .stdin(message.render())
        .inherit_stdout()
}

/// Hand `message` to the relay on `host`. Recipients come from its headers.
///
/// # Errors
///
/// Returns [`MailError::Process`] if ssh or sendmail fails.
pub fn send(runner: &dyn CommandRunner, host: &str, message: &MailMessage) -> Result<(), MailError> {
    runner.run(&send_invocation(host, message))?;
    tracing::info!(host, to = message.header("To").unwrap_or_default(), "mail handed to relay");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ut_core::process::ScriptedRunner;

    #[test]
    fn message_is_piped_to_remote_sendmail() {
        let runner = ScriptedRunner::new();
        let message = MailMessage::parse("To: a@b.org\n\nhello\n").unwrap();

        send(&runner, "dev.gentoo.org", &message).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to_string(), "ssh dev.gentoo.org sendmail -i -t");
        assert_eq!(calls[0].stdin.as_deref(), Some(b"To: a@b.org\n\nhello\n".as_slice()));
        assert!(!calls[0].capture_stdout);
    }

    #[test]
    fn relay_failure_is_reported() {
        let runner = ScriptedRunner::new().fail(75);
        let message = MailMessage::parse("To: a@b.org\n\nhello\n").unwrap();
        let err = send(&runner, "h", &message).unwrap_err();
        assert!(err.to_string().contains("status 75"));
    }
}
