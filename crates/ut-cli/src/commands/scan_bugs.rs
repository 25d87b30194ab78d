use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use ut_config::UndertakerConfig;
use ut_core::deadline::{Deadline, DeadlineMode, Schedule, Urgency, next_deadline};
use ut_core::ticket::Ticket;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScanBugsArgs;
use crate::commands::shared::{bugzilla_client, local_today, open_retirement_query};
use crate::output::output;

/// What the scan has to say about one ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum Finding {
    Due { urgency: Urgency, due: NaiveDate },
    UnknownWhiteboard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ScanItem {
    #[serde(flatten)]
    finding: Finding,
    ticket: Ticket,
}

impl ScanItem {
    fn text(&self) -> String {
        let whiteboard = &self.ticket.whiteboard;
        match self.finding {
            Finding::Due {
                urgency: Urgency::Overdue,
                due,
            } => format!("{}\n  Status: {whiteboard}; pending since: {due}", self.ticket),
            Finding::Due {
                urgency: Urgency::Pending,
                due,
            } => format!("{}\n  Status: {whiteboard}; due on: {due}", self.ticket),
            Finding::UnknownWhiteboard => format!("{}\n  Unknown whiteboard: {whiteboard}", self.ticket),
        }
    }
}

/// Handle `undertaker scan-bugs`.
pub async fn handle(
    args: &ScanBugsArgs,
    config: &UndertakerConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = bugzilla_client(config)?;
    let tickets = client
        .search(&open_retirement_query(config))
        .await
        .context("failed to query open retirement bugs")?;

    let schedule = if args.legacy_schedule {
        Schedule::legacy()
    } else {
        Schedule::current()
    };
    let today = local_today();
    let items = scan(tickets, mode(args), &schedule, today, args.all);

    output(&items, flags.format, |items| items.iter().map(ScanItem::text).collect())
}

const fn mode(args: &ScanBugsArgs) -> DeadlineMode {
    if args.commit_access {
        DeadlineMode::CommitAccess
    } else if args.reassign {
        DeadlineMode::PackageReassignment
    } else {
        DeadlineMode::MailSchedule
    }
}

/// Classify tickets in tracker order. Pending items are kept only with
/// `include_pending`; tickets with nothing to chase are dropped.
fn scan(
    tickets: Vec<Ticket>,
    mode: DeadlineMode,
    schedule: &Schedule,
    today: NaiveDate,
    include_pending: bool,
) -> Vec<ScanItem> {
    tickets
        .into_iter()
        .filter_map(|ticket| {
            let finding = match next_deadline(&ticket.parsed_whiteboard(), mode, schedule) {
                Deadline::Terminal => return None,
                Deadline::Unrecognized => {
                    tracing::debug!(id = ticket.id, whiteboard = %ticket.whiteboard, "unrecognized whiteboard");
                    Finding::UnknownWhiteboard
                }
                deadline => {
                    let (due, urgency) = deadline.urgency(today)?;
                    if urgency == Urgency::Pending && !include_pending {
                        return None;
                    }
                    Finding::Due { urgency, due }
                }
            };
            Some(ScanItem { finding, ticket })
        })
        .collect()
}
