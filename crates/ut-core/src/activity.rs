//! Commit-activity records and the inactivity filter.
//!
//! The activity feed is a JSON array of
//! `[developer, [[commit_count, earliest_ts, latest_ts], ...]]` where the
//! first range is the newest one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ticket::Ticket;

/// One commit range of a developer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRange {
    pub commits: u64,
    pub earliest: i64,
    pub latest: i64,
}

/// Feed entry for a single developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperActivity {
    pub developer: String,
    pub ranges: Vec<ActivityRange>,
}

impl DeveloperActivity {
    /// The newest commit range, if the developer has any.
    #[must_use]
    pub fn newest(&self) -> Option<&ActivityRange> {
        self.ranges.first()
    }
}

/// A developer whose newest commit predates the inactivity cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InactiveDeveloper {
    pub developer: String,
    pub commits: u64,
    pub first_commit: NaiveDate,
    pub last_commit: NaiveDate,
    #[serde(skip)]
    last_commit_ts: i64,
}

/// Developers whose newest commit is older than `cutoff`, sorted by the
/// newest commit ascending.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if a newest range carries a
/// timestamp chrono cannot represent.
pub fn inactive_candidates(
    feed: &[DeveloperActivity],
    cutoff: DateTime<Utc>,
) -> Result<Vec<InactiveDeveloper>, CoreError> {
    let mut candidates: Vec<InactiveDeveloper> = Vec::new();

    for entry in feed {
        let Some(range) = entry.newest() else {
            tracing::warn!(developer = %entry.developer, "activity feed entry has no commit ranges");
            continue;
        };
        if utc_moment(&entry.developer, range.latest)? >= cutoff {
            continue;
        }

        let candidate = InactiveDeveloper {
            developer: entry.developer.clone(),
            commits: range.commits,
            first_commit: utc_date(&entry.developer, range.earliest)?,
            last_commit: utc_date(&entry.developer, range.latest)?,
            last_commit_ts: range.latest,
        };
        // Later feed entries win for duplicate names.
        candidates.retain(|existing| existing.developer != candidate.developer);
        candidates.push(candidate);
    }

    candidates.sort_by_key(|candidate| candidate.last_commit_ts);
    Ok(candidates)
}

/// Drop candidates that already have an open ticket aliased to their
/// username. Returns the tickets that carry no alias at all so the caller can
/// report them.
///
/// # Errors
///
/// Returns [`CoreError::AmbiguousAlias`] if a ticket carries more than one
/// alias.
pub fn exclude_open_tickets<'a>(
    candidates: &mut Vec<InactiveDeveloper>,
    tickets: &'a [Ticket],
) -> Result<Vec<&'a Ticket>, CoreError> {
    let mut unaliased = Vec::new();
    for ticket in tickets {
        match ticket.single_alias()? {
            Some(alias) => candidates.retain(|candidate| candidate.developer != alias),
            None => unaliased.push(ticket),
        }
    }
    Ok(unaliased)
}

/// Render the report lines, the name column aligned to the longest username.
#[must_use]
pub fn render_report(candidates: &[InactiveDeveloper]) -> Vec<String> {
    let width = candidates
        .iter()
        .map(|candidate| candidate.developer.chars().count())
        .max()
        .unwrap_or(0);

    candidates
        .iter()
        .map(|candidate| {
            format!(
                "{:width$}: last commit {}, {:>3} commits since {}",
                candidate.developer, candidate.last_commit, candidate.commits, candidate.first_commit,
            )
        })
        .collect()
}

fn utc_moment(developer: &str, timestamp: i64) -> Result<DateTime<Utc>, CoreError> {
    DateTime::from_timestamp(timestamp, 0).ok_or_else(|| CoreError::InvalidTimestamp {
        developer: developer.to_string(),
        timestamp,
    })
}

fn utc_date(developer: &str, timestamp: i64) -> Result<NaiveDate, CoreError> {
    utc_moment(developer, timestamp).map(|moment| moment.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::TicketStatus;
    use pretty_assertions::assert_eq;

    // 2021-01-01T00:00:00Z
    const JAN_2021: i64 = 1_609_459_200;
    const DAY: i64 = 86_400;

    const FEED: &str = r#"[
        ["alice", [[12, 1577836800, 1609459200], [3, 1500000000, 1510000000]]],
        ["bob", [[250, 1546300800, 1640995200]]],
        ["carol", [[1, 1590000000, 1590000000]]],
        ["dave", []]
    ]"#;

    fn feed() -> Vec<DeveloperActivity> {
        serde_json::from_str(FEED).expect("feed fixture parses")
    }

    fn cutoff() -> DateTime<Utc> {
        DateTime::from_timestamp(JAN_2021 + 10 * DAY, 0).unwrap()
    }

    fn ticket(id: u64, alias: &[&str]) -> Ticket {
        Ticket {
            id,
            product: "Gentoo Developers/Staff".into(),
            component: "Retirement".into(),
            status: TicketStatus::Confirmed,
            whiteboard: String::new(),
            summary: format!("Retire dev {id}"),
            alias: alias.iter().map(ToString::to_string).collect(),
            url: format!("https://bugs.example.org/show_bug.cgi?id={id}"),
        }
    }

    #[test]
    fn feed_deserializes_from_nested_arrays() {
        let feed = feed();
        assert_eq!(feed.len(), 4);
        assert_eq!(feed[0].developer, "alice");
        assert_eq!(
            feed[0].newest(),
            Some(&ActivityRange {
                commits: 12,
                earliest: 1_577_836_800,
                latest: JAN_2021,
            })
        );
        assert!(feed[3].newest().is_none());
    }

    #[test]
    fn stale_developers_are_sorted_by_last_commit() {
        let candidates = inactive_candidates(&feed(), cutoff()).unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.developer.as_str()).collect();
        assert_eq!(names, vec!["carol", "alice"]);
        assert_eq!(candidates[1].commits, 12);
        assert_eq!(
            candidates[1].last_commit,
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
        );
        assert_eq!(
            candidates[1].first_commit,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    #[test]
    fn cutoff_keeps_sub_second_precision() {
        let cutoff = DateTime::from_timestamp(JAN_2021, 500_000_000).unwrap();
        let feed = vec![
            DeveloperActivity {
                developer: "just-before".into(),
                ranges: vec![ActivityRange {
                    commits: 1,
                    earliest: 0,
                    latest: JAN_2021,
                }],
            },
            DeveloperActivity {
                developer: "just-after".into(),
                ranges: vec![ActivityRange {
                    commits: 1,
                    earliest: 0,
                    latest: JAN_2021 + 1,
                }],
            },
        ];

        let candidates = inactive_candidates(&feed, cutoff).unwrap();
        let names: Vec<&str> = candidates.iter().map(|c| c.developer.as_str()).collect();
        assert_eq!(names, vec!["just-before"]);
    }

    #[test]
    fn developer_with_open_ticket_is_excluded() {
        let mut candidates = inactive_candidates(&feed(), cutoff()).unwrap();
        let tickets = vec![ticket(1, &["alice"]), ticket(2, &[])];

        let unaliased = exclude_open_tickets(&mut candidates, &tickets).unwrap();

        let names: Vec<&str> = candidates.iter().map(|c| c.developer.as_str()).collect();
        assert_eq!(names, vec!["carol"]);
        assert_eq!(unaliased.len(), 1);
        assert_eq!(unaliased[0].id, 2);
    }

    #[test]
    fn ticket_with_two_aliases_aborts() {
        let mut candidates = inactive_candidates(&feed(), cutoff()).unwrap();
        let tickets = vec![ticket(7, &["alice", "alice2"])];
        let err = exclude_open_tickets(&mut candidates, &tickets).unwrap_err();
        assert!(matches!(err, CoreError::AmbiguousAlias { ticket: 7, .. }));
    }

    #[test]
    fn report_aligns_names_to_longest() {
        let candidates = inactive_candidates(&feed(), cutoff()).unwrap();
        let lines = render_report(&candidates);
        assert_eq!(
            lines,
            vec![
                "carol: last commit 2020-05-20,   1 commits since 2020-05-20".to_string(),
                "alice: last commit 2021-01-01,  12 commits since 2020-01-01".to_string(),
            ]
        );
    }

    #[test]
    fn report_pads_shorter_names() {
        let feed = vec![
            DeveloperActivity {
                developer: "al".into(),
                ranges: vec![ActivityRange {
                    commits: 1000,
                    earliest: 0,
                    latest: DAY,
                }],
            },
            DeveloperActivity {
                developer: "bartholomew".into(),
                ranges: vec![ActivityRange {
                    commits: 5,
                    earliest: 0,
                    latest: 2 * DAY,
                }],
            },
        ];
        let lines = render_report(&inactive_candidates(&feed, cutoff()).unwrap());
        assert_eq!(
            lines[0],
            "al         : last commit 1970-01-02, 1000 commits since 1970-01-01"
        );
        assert!(lines[1].starts_with("bartholomew: last commit 1970-01-03,   5 commits"));
    }

    #[test]
    fn empty_candidate_set_renders_nothing() {
        assert!(render_report(&[]).is_empty());
    }
}
