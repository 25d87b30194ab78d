use anyhow::Context;
use serde::Serialize;
use ut_config::UndertakerConfig;
use ut_core::developer::DeveloperRecord;
use ut_core::process::{CommandRunner, SystemRunner};
use ut_core::ticket::{TicketFields, TicketUpdate};
use ut_directory::lookup_developer;
use ut_mail::{MailMessage, TemplateContext, address, render_template, send, sign, take_ticket_fields};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SendMailArgs;
use crate::commands::shared::{bugzilla_client, invoking_user_name, local_today};
use crate::output::output;
use crate::progress::{Progress, interactive_step};

/// What was (or, with `--dry-run`, would be) sent and applied.
#[derive(Debug, Serialize)]
struct MailPlan {
    dry_run: bool,
    ticket_id: u64,
    message: String,
    update: TicketUpdate,
}

impl MailPlan {
    fn text(&self) -> Vec<String> {
        if !self.dry_run {
            return Vec::new();
        }
        vec![
            self.message.clone(),
            format!("Bug {} update:", self.ticket_id),
            serde_json::to_string_pretty(&self.update).unwrap_or_default(),
        ]
    }
}

/// Handle `undertaker send-mail`.
pub async fn handle(
    args: &SendMailArgs,
    config: &UndertakerConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let template = std::fs::read_to_string(&args.template)
        .with_context(|| format!("failed to read template {}", args.template.display()))?;
    let client = bugzilla_client(config)?;
    let signature = resolve_signature(args.signature.as_deref(), config)?;
    let runner = SystemRunner;

    let record = look_up(&runner, args.ldap_ssh_host.as_deref(), config, &args.dev)?;
    let ticket_id = record.ticket_id(args.dev_bug)?;

    let context = TemplateContext {
        devname: args.dev.clone(),
        firstname: record.first_name.clone(),
        fullname: record.full_name.clone(),
        today: local_today(),
        lastcommit: args.lastcommit,
        signature,
    };
    let (mut message, fields) = compose(&template, &context)?;

    let progress = Progress::spinner("Checking the dev bug");
    let ticket = match client.ticket(ticket_id).await {
        Ok(ticket) => {
            progress.finish_clear();
            ticket
        }
        Err(error) => {
            progress.finish_err("Checking the dev bug ... failed");
            return Err(error).with_context(|| format!("failed to fetch bug {ticket_id}"));
        }
    };
    let update = TicketUpdate::retirement_notice(
        &ticket,
        &config.bugzilla.product,
        &config.bugzilla.component,
        fields,
    )?;
    address(
        &mut message,
        &record,
        &config.mail.domain,
        &config.mail.retirement_alias,
    )?;

    if !args.dry_run {
        let relay_host = args
            .sendmail_ssh_host
            .as_deref()
            .unwrap_or(&config.mail.ssh_host);
        deliver(&runner, relay_host, &mut message)?;

        let progress = Progress::spinner("Updating Bugzilla");
        if let Err(error) = client.update(ticket_id, &update).await {
            progress.finish_err("Updating Bugzilla ... failed");
            return Err(error).with_context(|| {
                format!("mail was sent but bug {ticket_id} could not be updated")
            });
        }
        progress.finish_ok("Updating Bugzilla ... done");
        tracing::info!(ticket_id, developer = %record.username, "retirement mail sent");
    }

    let plan = MailPlan {
        dry_run: args.dry_run,
        ticket_id,
        message: message.render(),
        update,
    };
    output(&plan, flags.format, MailPlan::text)
}

/// Signature for the mail: the flag, then configuration, then the
/// invoking user's full name.
fn resolve_signature(flag: Option<&str>, config: &UndertakerConfig) -> anyhow::Result<String> {
    if let Some(signature) = flag {
        return Ok(signature.to_string());
    }
    let configured = config.mail.signature.trim();
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }
    invoking_user_name()
        .context("cannot determine your name; pass --signature or set mail.signature")
}

/// Directory record of `dev`, read over ssh from `host` or the configured
/// directory host.
fn look_up(
    runner: &dyn CommandRunner,
    host: Option<&str>,
    config: &UndertakerConfig,
    dev: &str,
) -> anyhow::Result<DeveloperRecord> {
    let host = host.unwrap_or(&config.directory.ssh_host);
    interactive_step("Getting developer info from LDAP", || {
        lookup_developer(runner, host, &config.directory.base_dn, dev)
    })
    .with_context(|| format!("failed to look up developer '{dev}'"))
}

/// Render the template into a message and split off the ticket fields.
fn compose(
    template: &str,
    context: &TemplateContext,
) -> anyhow::Result<(MailMessage, TicketFields)> {
    let rendered = render_template(template, context).context("failed to render mail template")?;
    let mut message = MailMessage::parse(&rendered)?;
    let fields = take_ticket_fields(&mut message)?;
    Ok((message, fields))
}

/// Sign and hand the message to the relay.
fn deliver(
    runner: &dyn CommandRunner,
    relay_host: &str,
    message: &mut MailMessage,
) -> anyhow::Result<()> {
    interactive_step("Signing the mail", || sign(runner, message))?;
    interactive_step("Sending the mail", || send(runner, relay_host, message))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use ut_config::UndertakerConfig;
    use ut_core::process::ScriptedRunner;
    use ut_mail::{MailMessage, TemplateContext};

    use super::{compose, deliver, look_up, resolve_signature};

    const JDOE: &str = "dn: uid=jdoe,ou=devs,dc=gentoo,dc=org\n\
                        cn: Jane Doe\n\
                        givenName: Jane\n\
                        email: jdoe@gentoo.org\n\
                        gentooStatus: active\n\n";

    const TEMPLATE: &str = "Subject: Hello {{firstname}}\n\
                            Bug-Comment: Mail sent on {{today}}.\n\
                            Bug-Title: Retire: {{fullname}} ({{devname}})\n\
                            Bug-Whiteboard: second-mail-sent: {{today}}\n\
                            \n\
                            Dear {{firstname}},\n{{signature}}\n";

    fn context() -> TemplateContext {
        TemplateContext {
            devname: "jdoe".into(),
            firstname: "Jane".into(),
            fullname: "Jane Doe".into(),
            today: NaiveDate::from_ymd_opt(2021, 7, 20).unwrap(),
            lastcommit: None,
            signature: "Sam".into(),
        }
    }

    #[test]
    fn compose_splits_ticket_fields() {
        let (message, fields) = compose(TEMPLATE, &context()).unwrap();
        assert_eq!(fields.comment, "Mail sent on 2021-07-20.");
        assert_eq!(fields.title, "Retire: Jane Doe (jdoe)");
        assert_eq!(fields.whiteboard, "second-mail-sent: 2021-07-20");
        assert_eq!(message.header("Subject"), Some("Hello Jane"));
        assert_eq!(message.body, "Dear Jane,\nSam\n");
    }

    #[test]
    fn compose_requires_ticket_headers() {
        let err = compose("Subject: x\n\nbody\n", &context()).unwrap_err();
        assert!(err.to_string().contains("Bug-Comment"), "{err:#}");
    }

    #[test]
    fn deliver_signs_before_sending() {
        let runner = ScriptedRunner::new().respond("SIGNED\n");
        let mut message = MailMessage::parse("To: jdoe@gentoo.org\n\nbody\n").unwrap();

        deliver(&runner, "relay.example.org", &mut message).unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].to_string(), "gpg --clearsign");
        assert_eq!(calls[1].to_string(), "ssh relay.example.org sendmail -i -t");
        assert_eq!(
            calls[1].stdin.as_deref(),
            Some(b"To: jdoe@gentoo.org\n\nSIGNED\n".as_slice())
        );
    }

    #[test]
    fn lookup_uses_configured_directory_host() {
        let runner = ScriptedRunner::new().respond(JDOE);
        let record = look_up(&runner, None, &UndertakerConfig::default(), "jdoe").unwrap();

        assert_eq!(record.full_name, "Jane Doe");
        assert_eq!(record.dev_bug, None);
        assert!(
            runner.calls()[0]
                .to_string()
                .starts_with("ssh dev.gentoo.org ldapsearch -Z -LLL uid=jdoe")
        );
    }

    #[test]
    fn lookup_host_flag_wins() {
        let runner = ScriptedRunner::new().respond(JDOE);
        look_up(&runner, Some("ldap.example.org"), &UndertakerConfig::default(), "jdoe").unwrap();
        assert_eq!(runner.calls()[0].args[0], "ldap.example.org");
    }

    #[test]
    fn failed_lookup_names_the_developer() {
        let runner = ScriptedRunner::new().fail(255);
        let err = look_up(&runner, None, &UndertakerConfig::default(), "jdoe").unwrap_err();
        assert!(err.to_string().contains("'jdoe'"), "{err:#}");
    }

    #[test]
    fn failed_signing_sends_nothing() {
        let runner = ScriptedRunner::new().fail(2);
        let mut message = MailMessage::parse("To: jdoe@gentoo.org\n\nbody\n").unwrap();
        assert!(deliver(&runner, "relay", &mut message).is_err());
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn signature_precedence() {
        let mut config = UndertakerConfig::default();
        config.mail.signature = "Configured Name".into();
        assert_eq!(resolve_signature(Some("Flag Name"), &config).unwrap(), "Flag Name");
        assert_eq!(resolve_signature(None, &config).unwrap(), "Configured Name");
    }
}
