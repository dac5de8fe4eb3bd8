use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use journal_core::model::{PracticeRecord, PracticeSession, RecordId};
use journal_core::progression::{ProgressionSummary, distinct_focus_options, summarize};
use storage::repository::{PracticeLogRepository, PracticeRecordRow, RepertoireRepository};

use crate::Clock;
use crate::error::JournalError;

/// User input for a practice session. `date` defaults to today.
#[derive(Debug, Clone, Default)]
pub struct NewPracticeSession {
    pub date: Option<NaiveDate>,
    pub duration_minutes: u32,
    pub songs: Vec<String>,
    pub techniques: Vec<String>,
    pub notes: String,
}

/// Journal facade: logs sessions and builds focus timelines from a fresh snapshot.
///
/// Nothing is cached between calls; every read goes back to the repositories.
#[derive(Clone)]
pub struct JournalService {
    clock: Clock,
    records: Arc<dyn PracticeLogRepository>,
    repertoire: Arc<dyn RepertoireRepository>,
}

impl JournalService {
    #[must_use]
    pub fn new(
        clock: Clock,
        records: Arc<dyn PracticeLogRepository>,
        repertoire: Arc<dyn RepertoireRepository>,
    ) -> Self {
        Self {
            clock,
            records,
            repertoire,
        }
    }

    /// Validate and persist a practice session.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Practice` for validation failures.
    /// Returns `JournalError::Storage` if persistence fails.
    pub async fn log_practice(&self, input: NewPracticeSession) -> Result<RecordId, JournalError> {
        let date = input.date.unwrap_or_else(|| self.clock.today());
        let session = PracticeSession::new(
            date,
            input.duration_minutes,
            input.songs,
            input.techniques,
            input.notes,
        )?;
        let id = self.records.append_record(&session.into()).await?;
        info!(record_id = %id, %date, minutes = input.duration_minutes, "logged practice session");
        Ok(id)
    }

    /// All journal entries in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Storage` if repository access fails.
    pub async fn records(&self) -> Result<Vec<PracticeRecordRow>, JournalError> {
        Ok(self.records.list_records().await?)
    }

    /// # Errors
    ///
    /// Returns `JournalError::Storage` if the entry does not exist or deletion fails.
    pub async fn delete_record(&self, id: RecordId) -> Result<(), JournalError> {
        self.records.delete_record(id).await?;
        info!(record_id = %id, "deleted journal entry");
        Ok(())
    }

    async fn snapshot(&self) -> Result<Vec<PracticeRecord>, JournalError> {
        let rows = self.records.list_records().await?;
        debug!(count = rows.len(), "loaded journal snapshot");
        Ok(rows.into_iter().map(|row| row.record).collect())
    }

    /// Timeline for one song or technique. An empty focus yields an empty summary.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Storage` if repository access fails.
    pub async fn progression(&self, focus: &str) -> Result<ProgressionSummary, JournalError> {
        if focus.is_empty() {
            return Ok(ProgressionSummary::default());
        }
        let records = self.snapshot().await?;
        let summary = summarize(focus, &records);
        debug!(
            focus,
            sessions = summary.total_sessions,
            minutes = summary.total_minutes,
            "built progression summary"
        );
        Ok(summary)
    }

    /// Selectable focus values: repertoire titles and logged techniques.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Storage` if repository access fails.
    pub async fn focus_options(&self) -> Result<Vec<String>, JournalError> {
        let songs = self.repertoire.list_items().await?;
        let records = self.snapshot().await?;
        Ok(distinct_focus_options(
            songs.iter().map(|row| row.item.title.as_str()),
            &records,
        ))
    }
}
