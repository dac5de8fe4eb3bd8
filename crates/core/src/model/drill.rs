use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::CagedShape;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DrillError {
    #[error("accuracy must be between 1 and 5, got {0}")]
    AccuracyOutOfRange(u8),

    #[error("unknown CAGED shape: {0:?}")]
    UnknownShape(String),

    #[error("unknown drill kind: {0:?}")]
    UnknownKind(String),

    #[error("target time must be > 0 seconds")]
    InvalidTargetTime,
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// Lowest and highest self-rated accuracy.
pub const MIN_ACCURACY: u8 = 1;
pub const MAX_ACCURACY: u8 = 5;

/// One completed CAGED drill: which shapes were played, how cleanly, how fast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillAttempt {
    shapes: Vec<CagedShape>,
    accuracy: u8,
    time_seconds: u32,
}

impl DrillAttempt {
    /// Build an attempt from fresh user input.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::AccuracyOutOfRange` if `accuracy` is outside `1..=5`.
    pub fn new(
        shapes: Vec<CagedShape>,
        accuracy: u8,
        time_seconds: u32,
    ) -> Result<Self, DrillError> {
        if !(MIN_ACCURACY..=MAX_ACCURACY).contains(&accuracy) {
            return Err(DrillError::AccuracyOutOfRange(accuracy));
        }
        Ok(Self::from_persisted(shapes, accuracy, time_seconds))
    }

    /// Rehydrate an attempt without validation.
    ///
    /// Historical rows may carry out-of-range ratings; scoring stays total over them.
    #[must_use]
    pub fn from_persisted(shapes: Vec<CagedShape>, accuracy: u8, time_seconds: u32) -> Self {
        Self {
            shapes,
            accuracy,
            time_seconds,
        }
    }

    /// Shapes in the order they were attempted, duplicates included.
    #[must_use]
    pub fn shapes(&self) -> &[CagedShape] {
        &self.shapes
    }

    #[must_use]
    pub fn distinct_shapes(&self) -> BTreeSet<CagedShape> {
        self.shapes.iter().copied().collect()
    }

    #[must_use]
    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    #[must_use]
    pub fn time_seconds(&self) -> u32 {
        self.time_seconds
    }
}

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Normalized drill score in `0..=100`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DrillScore(u8);

impl DrillScore {
    pub const MAX: DrillScore = DrillScore(100);

    /// Clamps into `0..=100`.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DrillScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// Which drill tool produced a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrillKind {
    Caged,
    NoteFinder,
}

impl DrillKind {
    /// Stable storage tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DrillKind::Caged => "caged",
            DrillKind::NoteFinder => "note_finder",
        }
    }

    /// Human-facing name; doubles as the drill's searchable technique.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            DrillKind::Caged => "CAGED",
            DrillKind::NoteFinder => "Note Finder",
        }
    }
}

impl FromStr for DrillKind {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caged" => Ok(DrillKind::Caged),
            "note_finder" => Ok(DrillKind::NoteFinder),
            other => Err(DrillError::UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_accuracy() {
        assert!(DrillAttempt::new(vec![], 1, 0).is_ok());
        assert!(DrillAttempt::new(vec![], 5, 0).is_ok());
        assert_eq!(
            DrillAttempt::new(vec![], 0, 10).unwrap_err(),
            DrillError::AccuracyOutOfRange(0)
        );
        assert_eq!(
            DrillAttempt::new(vec![], 6, 10).unwrap_err(),
            DrillError::AccuracyOutOfRange(6)
        );
    }

    #[test]
    fn from_persisted_keeps_out_of_range_rating() {
        let attempt = DrillAttempt::from_persisted(vec![CagedShape::C], 9, 30);
        assert_eq!(attempt.accuracy(), 9);
    }

    #[test]
    fn distinct_shapes_drops_repeats() {
        let attempt = DrillAttempt::new(
            vec![CagedShape::C, CagedShape::C, CagedShape::A, CagedShape::C],
            3,
            30,
        )
        .unwrap();
        assert_eq!(attempt.shapes().len(), 4);
        assert_eq!(attempt.distinct_shapes().len(), 2);
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(DrillScore::new(250).value(), 100);
        assert_eq!(DrillScore::new(42).value(), 42);
    }

    #[test]
    fn drill_kind_tags_round_trip() {
        for kind in [DrillKind::Caged, DrillKind::NoteFinder] {
            assert_eq!(kind.as_str().parse::<DrillKind>().unwrap(), kind);
        }
        assert!(matches!(
            "scales".parse::<DrillKind>(),
            Err(DrillError::UnknownKind(_))
        ));
    }
}
