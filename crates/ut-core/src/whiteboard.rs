//! Retirement whiteboard parsing.
//!
//! The ticket whiteboard is a free-text field overloaded to carry the current
//! notification phase and the date it was entered:
//!
//! ```text
//! first-mail-sent: 2021-01-15        mail phase (also `first-email-sent`)
//! retirement-requested: 2021-09-01   final request to infra
//! infra-retire: ...                  handed over to infra
//! infra-done: ...                    finished
//! ```
//!
//! Anything else is [`Whiteboard::Unrecognized`] and must be reported, never
//! guessed at.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Follow-up mail phase recorded on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailPhase {
    First,
    Second,
    Third,
    Fourth,
}

impl MailPhase {
    pub const ALL: [Self; 4] = [Self::First, Self::Second, Self::Third, Self::Fourth];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.as_str() == word)
    }
}

impl fmt::Display for MailPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker left once the ticket has been handed over to infra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfraMarker {
    Retire,
    Done,
}

/// Parsed form of a ticket whiteboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Whiteboard {
    /// `infra-retire: ` or `infra-done: `; nothing left for us to chase.
    Infra(InfraMarker),
    /// `<phase>-mail-sent: <date>`
    MailSent { phase: MailPhase, date: NaiveDate },
    /// `retirement-requested: <date>`
    RetirementRequested { date: NaiveDate },
    /// Free text that matches no known marker.
    Unrecognized(String),
}

impl Whiteboard {
    /// Parse a whiteboard string. Only the leading marker is significant;
    /// trailing notes after the date are ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        if let Some(marker) = parse_infra(text) {
            return Self::Infra(marker);
        }
        if let Some((phase, date)) = parse_mail_sent(text) {
            return Self::MailSent { phase, date };
        }
        if let Some(date) = text
            .strip_prefix("retirement-requested: ")
            .and_then(parse_leading_date)
        {
            return Self::RetirementRequested { date };
        }
        Self::Unrecognized(text.to_string())
    }

    /// Date recorded with the marker, if any.
    #[must_use]
    pub const fn recorded_date(&self) -> Option<NaiveDate> {
        match self {
            Self::MailSent { date, .. } | Self::RetirementRequested { date } => Some(*date),
            Self::Infra(_) | Self::Unrecognized(_) => None,
        }
    }
}

fn parse_infra(text: &str) -> Option<InfraMarker> {
    let rest = text.strip_prefix("infra-")?;
    if rest.starts_with("retire: ") {
        Some(InfraMarker::Retire)
    } else if rest.starts_with("done: ") {
        Some(InfraMarker::Done)
    } else {
        None
    }
}

fn parse_mail_sent(text: &str) -> Option<(MailPhase, NaiveDate)> {
    let (word, rest) = text.split_once('-')?;
    let phase = MailPhase::from_word(word)?;
    let rest = rest
        .strip_prefix("mail-sent: ")
        .or_else(|| rest.strip_prefix("email-sent: "))?;
    Some((phase, parse_leading_date(rest)?))
}

/// Parse a strict `YYYY-MM-DD` date at the start of `text`.
fn parse_leading_date(text: &str) -> Option<NaiveDate> {
    let candidate = text.get(..10)?;
    let shape_ok = candidate.bytes().enumerate().all(|(index, byte)| match index {
        4 | 7 => byte == b'-',
        _ => byte.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(candidate, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("first-mail-sent: 2021-01-15", MailPhase::First)]
    #[case("second-mail-sent: 2021-01-15", MailPhase::Second)]
    #[case("third-email-sent: 2021-01-15", MailPhase::Third)]
    #[case("fourth-mail-sent: 2021-01-15; no reply", MailPhase::Fourth)]
    fn parses_mail_phases(#[case] text: &str, #[case] phase: MailPhase) {
        assert_eq!(
            Whiteboard::parse(text),
            Whiteboard::MailSent {
                phase,
                date: date(2021, 1, 15)
            }
        );
    }

    #[rstest]
    #[case("infra-retire: 2021-03-01", InfraMarker::Retire)]
    #[case("infra-done: whatever", InfraMarker::Done)]
    fn parses_infra_markers(#[case] text: &str, #[case] marker: InfraMarker) {
        assert_eq!(Whiteboard::parse(text), Whiteboard::Infra(marker));
    }

    #[test]
    fn parses_retirement_request() {
        assert_eq!(
            Whiteboard::parse("retirement-requested: 2022-02-28"),
            Whiteboard::RetirementRequested {
                date: date(2022, 2, 28)
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("waiting for reply")]
    #[case("fifth-mail-sent: 2021-01-15")]
    #[case("first-mail-sent: 2021-1-15")]
    #[case("first-mail-sent: 2021-02-30")]
    #[case("first-mail-sent:2021-01-15")]
    #[case("infra-retire:")]
    #[case(" first-mail-sent: 2021-01-15")]
    fn unknown_text_is_unrecognized(#[case] text: &str) {
        assert_eq!(
            Whiteboard::parse(text),
            Whiteboard::Unrecognized(text.to_string())
        );
    }

    #[test]
    fn recorded_date_only_for_dated_markers() {
        assert_eq!(
            Whiteboard::parse("second-mail-sent: 2020-05-01").recorded_date(),
            Some(date(2020, 5, 1))
        );
        assert_eq!(Whiteboard::parse("infra-done: x").recorded_date(), None);
        assert_eq!(Whiteboard::parse("???").recorded_date(), None);
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        assert!(matches!(
            Whiteboard::parse("first-mail-sent: żółć-żółć"),
            Whiteboard::Unrecognized(_)
        ));
    }
}
