//! Next-action deadline for a retirement ticket.
//!
//! Mail phases wait a number of whole months. A "month" here is the actual
//! length of the month the running date is in, so 2021-01-15 plus one month
//! is 2021-02-15 but 2021-01-31 plus one month is 2021-03-03.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::whiteboard::{MailPhase, Whiteboard};

/// Grace period after a mail when only commit access is being suspended.
pub const COMMIT_ACCESS_GRACE_DAYS: u64 = 14;
/// Grace period after a mail when packages are being reassigned.
pub const PACKAGE_REASSIGNMENT_GRACE_DAYS: u64 = 28;
/// Grace period after retirement was requested.
pub const RETIREMENT_GRACE_DAYS: u64 = 14;

/// Which follow-up track the scan is computing deadlines for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeadlineMode {
    /// Regular month-based mail schedule.
    #[default]
    MailSchedule,
    /// Commit-access suspension: every mail phase waits two weeks.
    CommitAccess,
    /// Package reassignment: every mail phase waits four weeks.
    PackageReassignment,
}

/// Months to wait after each mail phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    months: BTreeMap<MailPhase, u32>,
}

impl Schedule {
    /// Current four-mail schedule.
    #[must_use]
    pub fn current() -> Self {
        Self::from_pairs(&[
            (MailPhase::First, 6),
            (MailPhase::Second, 3),
            (MailPhase::Third, 2),
            (MailPhase::Fourth, 1),
        ])
    }

    /// Older three-mail schedule. Has no fourth phase.
    #[must_use]
    pub fn legacy() -> Self {
        Self::from_pairs(&[
            (MailPhase::First, 4),
            (MailPhase::Second, 1),
            (MailPhase::Third, 1),
        ])
    }

    #[must_use]
    pub fn from_pairs(pairs: &[(MailPhase, u32)]) -> Self {
        Self {
            months: pairs.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn months_for(&self, phase: MailPhase) -> Option<u32> {
        self.months.get(&phase).copied()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::current()
    }
}

/// Result of the deadline calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Next action is due on this date.
    Due(NaiveDate),
    /// Ticket is with infra; nothing to chase.
    Terminal,
    /// Whiteboard did not match a marker the schedule knows about.
    Unrecognized,
}

/// How a due date relates to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Due today or earlier.
    Overdue,
    /// Due in the future.
    Pending,
}

impl Deadline {
    /// Classify a due deadline against `today`. Terminal and unrecognized
    /// deadlines have no urgency.
    #[must_use]
    pub fn urgency(self, today: NaiveDate) -> Option<(NaiveDate, Urgency)> {
        match self {
            Self::Due(date) if today >= date => Some((date, Urgency::Overdue)),
            Self::Due(date) => Some((date, Urgency::Pending)),
            Self::Terminal | Self::Unrecognized => None,
        }
    }
}

/// Compute the next deadline for a parsed whiteboard.
#[must_use]
pub fn next_deadline(whiteboard: &Whiteboard, mode: DeadlineMode, schedule: &Schedule) -> Deadline {
    match whiteboard {
        Whiteboard::Infra(_) => Deadline::Terminal,
        Whiteboard::MailSent { phase, date } => {
            let Some(months) = schedule.months_for(*phase) else {
                return Deadline::Unrecognized;
            };
            Deadline::Due(match mode {
                DeadlineMode::CommitAccess => *date + Days::new(COMMIT_ACCESS_GRACE_DAYS),
                DeadlineMode::PackageReassignment => {
                    *date + Days::new(PACKAGE_REASSIGNMENT_GRACE_DAYS)
                }
                DeadlineMode::MailSchedule => add_month_lengths(*date, months),
            })
        }
        Whiteboard::RetirementRequested { date } => {
            Deadline::Due(*date + Days::new(RETIREMENT_GRACE_DAYS))
        }
        Whiteboard::Unrecognized(_) => Deadline::Unrecognized,
    }
}

/// Advance `date` by `months`, each step adding the day count of the month
/// the running date currently falls in.
#[must_use]
pub fn add_month_lengths(date: NaiveDate, months: u32) -> NaiveDate {
    (0..months).fold(date, |current, _| {
        current + Days::new(u64::from(days_in_month(current.year(), current.month())))
    })
}

/// Number of days in the given month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .zip(NaiveDate::from_ymd_opt(next_year, next_month, 1))
        .and_then(|(start, end)| u32::try_from((end - start).num_days()).ok())
        .unwrap_or(30)
}
