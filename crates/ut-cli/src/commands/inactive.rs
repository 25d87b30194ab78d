use anyhow::Context;
use chrono::{Duration, Utc};
use serde::Serialize;
use ut_clients::{BugzillaClient, fetch_activity};
use ut_config::UndertakerConfig;
use ut_core::activity::{InactiveDeveloper, exclude_open_tickets, inactive_candidates, render_report};
use ut_core::ticket::Ticket;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InactiveArgs;
use crate::commands::shared::{bugzilla_client, open_retirement_query};
use crate::output::output;

#[derive(Debug, Serialize)]
struct InactiveReport<'a> {
    min_inactivity_days: u32,
    unaliased_tickets: Vec<&'a Ticket>,
    developers: Vec<InactiveDeveloper>,
}

/// Handle `undertaker inactive`.
pub async fn handle(
    args: &InactiveArgs,
    config: &UndertakerConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let min_inactivity_days = args
        .min_inactivity
        .unwrap_or(config.activity.min_inactivity_days);

    let client = open_ticket_client(args.include_open, config)?;

    let feed = fetch_activity(&config.activity.feed_url)
        .await
        .with_context(|| format!("failed to fetch activity feed {}", config.activity.feed_url))?;
    let cutoff = Utc::now() - Duration::days(i64::from(min_inactivity_days));
    let mut developers = inactive_candidates(&feed, cutoff)?;
    tracing::debug!(feed = feed.len(), inactive = developers.len(), "activity feed filtered");

    let tickets = match &client {
        Some(client) => client
            .search(&open_retirement_query(config))
            .await
            .context("failed to query open retirement bugs")?,
        None => Vec::new(),
    };
    let unaliased_tickets = exclude_open_tickets(&mut developers, &tickets)?;

    let report = InactiveReport {
        min_inactivity_days,
        unaliased_tickets,
        developers,
    };
    output(&report, flags.format, text_lines)
}

/// Client for the open-ticket query, or `None` when developers with open
/// tickets are reported anyway. Credentials are resolved here so a missing
/// key fails before any network traffic.
fn open_ticket_client(
    include_open: bool,
    config: &UndertakerConfig,
) -> anyhow::Result<Option<BugzillaClient>> {
    if include_open {
        return Ok(None);
    }
    bugzilla_client(config).map(Some)
}

fn text_lines(report: &InactiveReport<'_>) -> Vec<String> {
    report
        .unaliased_tickets
        .iter()
        .map(|ticket| format!("{ticket}\n  Bug not aliased to nickname"))
        .chain(render_report(&report.developers))
        .collect()
}
