use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Report developers without recent commits.
    Inactive(InactiveArgs),
    /// Remove a departing maintainer from package metadata.
    Reassign(ReassignArgs),
    /// List retirement bugs whose next step is due.
    #[command(name = "scan-bugs")]
    ScanBugs(ScanBugsArgs),
    /// Send a signed retirement mail and update the dev bug.
    #[command(name = "send-mail")]
    SendMail(SendMailArgs),
}

/// Arguments for `undertaker inactive`.
#[derive(Clone, Debug, Args)]
pub struct InactiveArgs {
    /// Minimum inactivity to complain about, in days.
    #[arg(long, value_name = "DAYS")]
    pub min_inactivity: Option<u32>,
    /// Include developers for whom retirement bugs are open.
    #[arg(long)]
    pub include_open: bool,
}

/// Arguments for `undertaker reassign`.
#[derive(Clone, Debug, Args)]
pub struct ReassignArgs {
    /// Path to the repository checkout.
    #[arg(short, long)]
    pub path: PathBuf,
    /// Email of the maintainer being retired.
    #[arg(short, long)]
    pub email: String,
    /// Run pkgcheck over the modified packages.
    #[arg(long, visible_alias = "repoman")]
    pub pkgcheck: bool,
}

/// Arguments for `undertaker scan-bugs`.
#[derive(Clone, Debug, Args)]
pub struct ScanBugsArgs {
    /// Also print bugs whose deadline has not passed yet.
    #[arg(long)]
    pub all: bool,
    /// Use the two-week commit-access deadlines.
    #[arg(long, conflicts_with = "reassign")]
    pub commit_access: bool,
    /// Use the four-week package-reassignment deadlines.
    #[arg(long)]
    pub reassign: bool,
    /// Use the older three-mail schedule (4/1/1 months).
    #[arg(long)]
    pub legacy_schedule: bool,
}

/// Arguments for `undertaker send-mail`.
#[derive(Clone, Debug, Args)]
pub struct SendMailArgs {
    /// Mail template file.
    pub template: PathBuf,
    /// Developer username.
    pub dev: String,
    /// Last commit (yyyy-mm-dd).
    #[arg(value_parser = parse_date)]
    pub lastcommit: Option<NaiveDate>,
    /// Dev bug number (needed if not in LDAP).
    #[arg(long)]
    pub dev_bug: Option<u64>,
    /// Host to SSH for LDAP information.
    #[arg(long)]
    pub ldap_ssh_host: Option<String>,
    /// Host to SSH for sendmail.
    #[arg(long)]
    pub sendmail_ssh_host: Option<String>,
    /// Your signature.
    #[arg(long)]
    pub signature: Option<String>,
    /// Print the mail and bug update without signing, sending or updating.
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|error| format!("expected yyyy-mm-dd: {error}"))
}
