//! CAGED drill scoring.
//!
//! A drill attempt is scored from three components, each normalized to `0.0..=1.0`:
//!
//! * shape coverage: distinct shapes played out of the five CAGED shapes
//! * accuracy: the 1-5 self rating remapped linearly
//! * speed: target time over elapsed time, capped at 1
//!
//! Coverage and accuracy carry 40% each, speed 20%.

use serde::{Deserialize, Serialize};

use crate::model::{CagedShape, DrillAttempt, DrillError, DrillScore};

/// Seconds a player should need to run through all five shapes.
pub const DEFAULT_TARGET_SECONDS: u32 = 20;

const SHAPE_WEIGHT: f64 = 0.4;
const ACCURACY_WEIGHT: f64 = 0.4;
const SPEED_WEIGHT: f64 = 0.2;

//
// ─── BREAKDOWN ─────────────────────────────────────────────────────────────────
//

/// The weighted components behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub shape_coverage: f64,
    pub accuracy_score: f64,
    pub speed_score: f64,
    pub raw: f64,
}

impl ScoreBreakdown {
    /// Final `0..=100` score.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn score(&self) -> DrillScore {
        // Out-of-range persisted ratings can push `raw` outside [0, 1].
        let value = (self.raw * 100.0).round().clamp(0.0, 100.0);
        DrillScore::new(value as u8)
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Stateless scorer for CAGED drill attempts.
///
/// # Examples
///
/// ```
/// # use journal_core::ScoreEngine;
/// # use journal_core::model::{CagedShape, DrillAttempt};
/// let engine = ScoreEngine::new();
/// let attempt = DrillAttempt::new(CagedShape::ALL.to_vec(), 5, 20)?;
/// assert_eq!(engine.compute_score(&attempt).value(), 100);
/// # Ok::<(), journal_core::model::DrillError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEngine {
    target_seconds: u32,
}

impl ScoreEngine {
    /// Engine with the standard 20 second target.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target_seconds: DEFAULT_TARGET_SECONDS,
        }
    }

    /// Engine with a custom target time.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::InvalidTargetTime` if `target_seconds` is 0.
    pub fn with_target_time(target_seconds: u32) -> Result<Self, DrillError> {
        if target_seconds == 0 {
            return Err(DrillError::InvalidTargetTime);
        }
        Ok(Self { target_seconds })
    }

    #[must_use]
    pub fn target_seconds(&self) -> u32 {
        self.target_seconds
    }

    #[must_use]
    pub fn breakdown(&self, attempt: &DrillAttempt) -> ScoreBreakdown {
        #[allow(clippy::cast_precision_loss)]
        let shape_coverage = (attempt.distinct_shapes().len() as f64
            / CagedShape::ALL.len() as f64)
            .min(1.0);

        let accuracy_score = (f64::from(attempt.accuracy()) - 1.0) / 4.0;

        let speed_score = if attempt.time_seconds() > 0 {
            (f64::from(self.target_seconds) / f64::from(attempt.time_seconds())).min(1.0)
        } else {
            0.0
        };

        let raw = shape_coverage * SHAPE_WEIGHT
            + accuracy_score * ACCURACY_WEIGHT
            + speed_score * SPEED_WEIGHT;

        ScoreBreakdown {
            shape_coverage,
            accuracy_score,
            speed_score,
            raw,
        }
    }

    #[must_use]
    pub fn compute_score(&self, attempt: &DrillAttempt) -> DrillScore {
        self.breakdown(attempt).score()
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

//
// ─── SEVERITY ──────────────────────────────────────────────────────────────────
//

/// Coarse band a score falls into; callers color-code on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    High,
    Medium,
    Low,
    Critical,
}

impl SeverityBand {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SeverityBand::High => "high",
            SeverityBand::Medium => "medium",
            SeverityBand::Low => "low",
            SeverityBand::Critical => "critical",
        }
    }
}

/// Bands are inclusive on their lower bound: 80, 60 and 40.
#[must_use]
pub fn score_severity_band(score: DrillScore) -> SeverityBand {
    match score.value() {
        80.. => SeverityBand::High,
        60..=79 => SeverityBand::Medium,
        40..=59 => SeverityBand::Low,
        _ => SeverityBand::Critical,
    }
}
