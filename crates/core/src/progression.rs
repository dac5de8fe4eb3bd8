//! Single-topic practice timelines.
//!
//! A focus is a free-text song title or technique name. Matching is a
//! case-insensitive substring test, so "blackbird" also picks up
//! "Blackbird (fingerstyle)".

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::PracticeRecord;

/// Everything the journal holds about one focus.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressionSummary {
    pub total_sessions: usize,
    pub total_minutes: u64,
    /// Matching records, most recent first.
    pub sessions: Vec<PracticeRecord>,
}

impl ProgressionSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// True if `focus` occurs, ignoring case, in any song or technique of `record`.
#[must_use]
pub fn matches_focus(record: &PracticeRecord, focus: &str) -> bool {
    contains_needle(record, &focus.to_lowercase())
}

fn contains_needle(record: &PracticeRecord, needle: &str) -> bool {
    record
        .songs()
        .iter()
        .map(String::as_str)
        .chain(record.techniques())
        .any(|entry| entry.to_lowercase().contains(needle))
}

/// Build the timeline for `focus`.
///
/// An empty focus means nothing is selected and yields an empty summary.
/// Records sharing a date keep their input order.
#[must_use]
pub fn summarize(focus: &str, records: &[PracticeRecord]) -> ProgressionSummary {
    if focus.is_empty() {
        return ProgressionSummary::default();
    }

    let needle = focus.to_lowercase();
    let mut sessions: Vec<PracticeRecord> = records
        .iter()
        .filter(|r| contains_needle(r, &needle))
        .cloned()
        .collect();
    sessions.sort_by(|a, b| b.date().cmp(&a.date()));

    let total_minutes = sessions
        .iter()
        .map(|r| match r {
            PracticeRecord::Practice(s) => u64::from(s.duration_minutes()),
            PracticeRecord::Drill(_) => 0,
        })
        .sum();

    ProgressionSummary {
        total_sessions: sessions.len(),
        total_minutes,
        sessions,
    }
}

/// Focus values to offer: repertoire titles plus every non-empty technique
/// logged in a practice session, deduplicated and sorted.
#[must_use]
pub fn distinct_focus_options<'a, I>(repertoire_titles: I, records: &[PracticeRecord]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut options: BTreeSet<String> = repertoire_titles.into_iter().map(str::to_string).collect();

    for record in records {
        match record {
            PracticeRecord::Practice(s) => options.extend(
                s.techniques()
                    .iter()
                    .filter(|t| !t.is_empty())
                    .cloned(),
            ),
            PracticeRecord::Drill(_) => {}
        }
    }

    options.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CagedShape, DrillKind, DrillScore, DrillSession, PracticeSession};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn practice(day: &str, minutes: u32, songs: &[&str], techniques: &[&str]) -> PracticeRecord {
        PracticeSession::from_persisted(
            date(day),
            minutes,
            songs.iter().map(|s| (*s).to_string()).collect(),
            techniques.iter().map(|s| (*s).to_string()).collect(),
            String::new(),
        )
        .into()
    }

    fn drill(day: &str) -> PracticeRecord {
        DrillSession {
            date: date(day),
            kind: DrillKind::Caged,
            shapes: vec![CagedShape::C, CagedShape::A],
            score: DrillScore::new(55),
            time_seconds: 30,
            notes: String::new(),
        }
        .into()
    }

    fn journal() -> Vec<PracticeRecord> {
        vec![
            practice("2024-01-01", 60, &["Blackbird"], &[]),
            practice("2024-01-02", 30, &["Wonderwall"], &["strumming"]),
        ]
    }

    #[test]
    fn empty_focus_yields_empty_summary() {
        assert_eq!(summarize("", &journal()), ProgressionSummary::default());
    }

    #[test]
    fn filters_by_song() {
        let records = journal();
        let summary = summarize("blackbird", &records);

        assert_eq!(summary.total_sessions, 1);
        assert_eq!(summary.total_minutes, 60);
        assert_eq!(summary.sessions, vec![records[0].clone()]);
    }

    #[test]
    fn matching_ignores_case() {
        let records = journal();
        assert_eq!(summarize("BLACKBIRD", &records), summarize("blackbird", &records));
    }

    #[test]
    fn matches_partial_titles_and_techniques() {
        let records = vec![
            practice("2024-02-01", 20, &["Blackbird (fingerstyle)"], &[]),
            practice("2024-02-02", 15, &[], &["Fingerstyle patterns"]),
            practice("2024-02-03", 10, &["Wonderwall"], &["strumming"]),
        ];

        let summary = summarize("fingerstyle", &records);
        assert_eq!(summary.total_sessions, 2);
        assert_eq!(summary.total_minutes, 35);
        assert!(matches_focus(&records[0], "BLACKBIRD"));
        assert!(!matches_focus(&records[2], "blackbird"));
    }

    #[test]
    fn sorts_most_recent_first() {
        let records = vec![
            practice("2024-01-01", 10, &["Blackbird"], &[]),
            practice("2024-03-01", 10, &["Blackbird"], &[]),
            practice("2024-02-01", 10, &["Blackbird"], &[]),
        ];

        let dates: Vec<_> = summarize("Blackbird", &records)
            .sessions
            .iter()
            .map(PracticeRecord::date)
            .collect();
        assert_eq!(dates, vec![date("2024-03-01"), date("2024-02-01"), date("2024-01-01")]);
    }

    #[test]
    fn same_day_keeps_input_order() {
        let records = vec![
            practice("2024-01-01", 10, &["Blackbird"], &["a"]),
            practice("2024-01-05", 10, &["Blackbird"], &["b"]),
            practice("2024-01-01", 10, &["Blackbird"], &["c"]),
        ];

        let order: Vec<String> = summarize("blackbird", &records)
            .sessions
            .iter()
            .map(|r| r.techniques().collect::<String>())
            .collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn drills_count_as_sessions_without_minutes() {
        let records = vec![
            drill("2024-04-02"),
            practice("2024-04-01", 25, &[], &["CAGED arpeggios"]),
            drill("2024-04-03"),
        ];

        let summary = summarize("caged", &records);
        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.total_minutes, 25);
        assert_eq!(summary.sessions[0].date(), date("2024-04-03"));
    }

    #[test]
    fn summarize_is_idempotent() {
        let records = journal();
        assert_eq!(summarize("wonder", &records), summarize("wonder", &records));
    }

    #[test]
    fn focus_options_are_sorted_and_deduplicated() {
        let records = vec![
            practice("2024-01-01", 10, &["Blackbird"], &["legato", ""]),
            practice("2024-01-02", 10, &[], &["bends", "legato"]),
            drill("2024-01-03"),
        ];

        let options = distinct_focus_options(["Wonderwall", "Blackbird", "Blackbird"], &records);
        assert_eq!(options, vec!["Blackbird", "Wonderwall", "bends", "legato"]);
    }

    #[test]
    fn focus_options_empty_journal() {
        assert!(distinct_focus_options(std::iter::empty::<&str>(), &[]).is_empty());
    }
}
