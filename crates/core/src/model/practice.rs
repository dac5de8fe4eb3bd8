use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{CagedShape, DrillKind, DrillScore};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("practice duration must be > 0 minutes")]
    ZeroDuration,
}

//
// ─── PRACTICE SESSION ──────────────────────────────────────────────────────────
//

/// A free-form practice block: what was played, for how long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSession {
    date: NaiveDate,
    duration_minutes: u32,
    songs: Vec<String>,
    techniques: Vec<String>,
    notes: String,
}

impl PracticeSession {
    /// Create a session from user input.
    ///
    /// Song and technique entries are trimmed; blank entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::ZeroDuration` if `duration_minutes` is 0.
    pub fn new(
        date: NaiveDate,
        duration_minutes: u32,
        songs: Vec<String>,
        techniques: Vec<String>,
        notes: impl Into<String>,
    ) -> Result<Self, PracticeError> {
        if duration_minutes == 0 {
            return Err(PracticeError::ZeroDuration);
        }
        Ok(Self {
            date,
            duration_minutes,
            songs: clean_entries(songs),
            techniques: clean_entries(techniques),
            notes: notes.into(),
        })
    }

    /// Rehydrate a stored session as-is.
    #[must_use]
    pub fn from_persisted(
        date: NaiveDate,
        duration_minutes: u32,
        songs: Vec<String>,
        techniques: Vec<String>,
        notes: String,
    ) -> Self {
        Self {
            date,
            duration_minutes,
            songs,
            techniques,
            notes,
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn songs(&self) -> &[String] {
        &self.songs
    }

    #[must_use]
    pub fn techniques(&self) -> &[String] {
        &self.techniques
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

fn clean_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

//
// ─── DRILL SESSION ─────────────────────────────────────────────────────────────
//

/// A scored drill run as stored in the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillSession {
    pub date: NaiveDate,
    pub kind: DrillKind,
    pub shapes: Vec<CagedShape>,
    pub score: DrillScore,
    pub time_seconds: u32,
    pub notes: String,
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// Anything that shows up on the practice timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PracticeRecord {
    Practice(PracticeSession),
    Drill(DrillSession),
}

impl PracticeRecord {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            PracticeRecord::Practice(s) => s.date(),
            PracticeRecord::Drill(d) => d.date,
        }
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        match self {
            PracticeRecord::Practice(s) => s.notes(),
            PracticeRecord::Drill(d) => &d.notes,
        }
    }

    /// Song titles this record mentions. Drills never mention songs.
    #[must_use]
    pub fn songs(&self) -> &[String] {
        match self {
            PracticeRecord::Practice(s) => s.songs(),
            PracticeRecord::Drill(_) => &[],
        }
    }

    /// Techniques this record covers; a drill covers exactly its own kind.
    pub fn techniques(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            PracticeRecord::Practice(s) => Box::new(s.techniques().iter().map(String::as_str)),
            PracticeRecord::Drill(d) => Box::new(std::iter::once(d.kind.display_name())),
        }
    }

    /// Minutes practiced; `None` for drills, which carry no duration.
    #[must_use]
    pub fn duration_minutes(&self) -> Option<u32> {
        match self {
            PracticeRecord::Practice(s) => Some(s.duration_minutes()),
            PracticeRecord::Drill(_) => None,
        }
    }
}

impl From<PracticeSession> for PracticeRecord {
    fn from(value: PracticeSession) -> Self {
        PracticeRecord::Practice(value)
    }
}

impl From<DrillSession> for PracticeRecord {
    fn from(value: DrillSession) -> Self {
        PracticeRecord::Drill(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn new_trims_and_drops_blank_entries() {
        let session = PracticeSession::new(
            day(1),
            30,
            vec!["  Blackbird ".into(), "   ".into()],
            vec![String::new(), "alternate picking".into()],
            "",
        )
        .unwrap();

        assert_eq!(session.songs(), ["Blackbird"]);
        assert_eq!(session.techniques(), ["alternate picking"]);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = PracticeSession::new(day(1), 0, vec![], vec![], "").unwrap_err();
        assert_eq!(err, PracticeError::ZeroDuration);
    }

    #[test]
    fn drill_record_exposes_kind_as_technique() {
        let record = PracticeRecord::from(DrillSession {
            date: day(2),
            kind: DrillKind::Caged,
            shapes: vec![CagedShape::C],
            score: DrillScore::new(40),
            time_seconds: 12,
            notes: String::new(),
        });

        assert_eq!(record.techniques().collect::<Vec<_>>(), vec!["CAGED"]);
        assert!(record.songs().is_empty());
        assert_eq!(record.duration_minutes(), None);
        assert_eq!(record.date(), day(2));
    }
}
