use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `undertaker` binary.
#[derive(Debug, Parser)]
#[command(name = "undertaker", version, about = "Developer retirement tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress and non-error logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["undertaker", "--format", "json", "scan-bugs", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::ScanBugs(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["undertaker", "--format", "table", "scan-bugs"]).is_err());
    }

    #[test]
    fn inactive_defaults() {
        let cli = Cli::try_parse_from(["undertaker", "inactive"]).expect("cli should parse");
        let Commands::Inactive(args) = cli.command else {
            panic!("expected inactive");
        };
        assert_eq!(args.min_inactivity, None);
        assert!(!args.include_open);

        let cli = Cli::try_parse_from(["undertaker", "inactive", "--min-inactivity", "365", "--include-open"])
            .expect("cli should parse");
        let Commands::Inactive(args) = cli.command else {
            panic!("expected inactive");
        };
        assert_eq!(args.min_inactivity, Some(365));
        assert!(args.include_open);
    }

    #[test]
    fn reassign_requires_path_and_email() {
        assert!(Cli::try_parse_from(["undertaker", "reassign", "-p", "/repo"]).is_err());

        let cli = Cli::try_parse_from(["undertaker", "reassign", "-p", "/repo", "-e", "jdoe@gentoo.org", "--repoman"])
            .expect("cli should parse");
        let Commands::Reassign(args) = cli.command else {
            panic!("expected reassign");
        };
        assert_eq!(args.email, "jdoe@gentoo.org");
        assert!(args.pkgcheck);
    }

    #[test]
    fn scan_modes_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["undertaker", "scan-bugs", "--commit-access", "--reassign"]).is_err());
        assert!(Cli::try_parse_from(["undertaker", "scan-bugs", "--all", "--reassign", "--legacy-schedule"]).is_ok());
    }

    #[test]
    fn send_mail_positionals() {
        let cli = Cli::try_parse_from([
            "undertaker",
            "send-mail",
            "templates/first-mail.hbs",
            "jdoe",
            "2020-11-02",
            "--dev-bug",
            "700001",
            "--dry-run",
        ])
        .expect("cli should parse");
        let Commands::SendMail(args) = cli.command else {
            panic!("expected send-mail");
        };
        assert_eq!(args.dev, "jdoe");
        assert_eq!(args.lastcommit, NaiveDate::from_ymd_opt(2020, 11, 2));
        assert_eq!(args.dev_bug, Some(700_001));
        assert!(args.dry_run);
        assert!(args.signature.is_none());
    }

    #[test]
    fn send_mail_rejects_bad_date() {
        assert!(Cli::try_parse_from(["undertaker", "send-mail", "t", "jdoe", "02/11/2020"]).is_err());
    }
}
