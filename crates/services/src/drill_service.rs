use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use journal_core::ScoreEngine;
use journal_core::labels::{accuracy_label, format_duration};
use journal_core::model::{DrillAttempt, DrillKind, DrillScore, DrillSession, RecordId};
use journal_core::scoring::{ScoreBreakdown, SeverityBand, score_severity_band};
use storage::repository::PracticeLogRepository;

use crate::Clock;
use crate::error::DrillServiceError;

/// Everything a drill screen shows once an attempt is finished.
///
/// Presentation-agnostic apart from the fixed accuracy/time labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrillReport {
    /// Set when the attempt was saved to the journal.
    pub record_id: Option<RecordId>,
    pub score: DrillScore,
    pub band: SeverityBand,
    pub breakdown: ScoreBreakdown,
    pub accuracy_label: &'static str,
    pub elapsed: String,
}

/// Scores CAGED drill attempts and files them in the journal.
#[derive(Clone)]
pub struct DrillService {
    clock: Clock,
    engine: ScoreEngine,
    records: Arc<dyn PracticeLogRepository>,
}

impl DrillService {
    #[must_use]
    pub fn new(clock: Clock, engine: ScoreEngine, records: Arc<dyn PracticeLogRepository>) -> Self {
        Self {
            clock,
            engine,
            records,
        }
    }

    #[must_use]
    pub fn engine(&self) -> ScoreEngine {
        self.engine
    }

    /// Score an attempt without saving it.
    #[must_use]
    pub fn preview(&self, attempt: &DrillAttempt) -> DrillReport {
        let breakdown = self.engine.breakdown(attempt);
        let score = breakdown.score();
        DrillReport {
            record_id: None,
            score,
            band: score_severity_band(score),
            breakdown,
            accuracy_label: accuracy_label(attempt.accuracy()),
            elapsed: format_duration(u64::from(attempt.time_seconds())),
        }
    }

    /// Score an attempt and store it as a CAGED drill dated today.
    ///
    /// # Errors
    ///
    /// Returns `DrillServiceError::Storage` if persistence fails.
    pub async fn record_caged(
        &self,
        attempt: &DrillAttempt,
        notes: impl Into<String>,
    ) -> Result<DrillReport, DrillServiceError> {
        let mut report = self.preview(attempt);
        let session = DrillSession {
            date: self.clock.today(),
            kind: DrillKind::Caged,
            shapes: attempt.shapes().to_vec(),
            score: report.score,
            time_seconds: attempt.time_seconds(),
            notes: notes.into(),
        };

        let id = self.records.append_record(&session.into()).await?;
        info!(
            record_id = %id,
            score = report.score.value(),
            band = report.band.as_str(),
            "recorded CAGED drill"
        );
        report.record_id = Some(id);
        Ok(report)
    }
}
