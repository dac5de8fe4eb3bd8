use std::sync::Arc;

use journal_core::ScoreEngine;
use storage::repository::Storage;

use crate::Clock;
use crate::drill_service::DrillService;
use crate::error::AppServicesError;
use crate::journal_service::JournalService;
use crate::repertoire_service::RepertoireService;

/// Assembles the app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    journal: Arc<JournalService>,
    drills: Arc<DrillService>,
    repertoire: Arc<RepertoireService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, engine: ScoreEngine) -> Self {
        let journal = Arc::new(JournalService::new(
            clock,
            Arc::clone(&storage.records),
            Arc::clone(&storage.repertoire),
        ));
        let drills = Arc::new(DrillService::new(
            clock,
            engine,
            Arc::clone(&storage.records),
        ));
        let repertoire = Arc::new(RepertoireService::new(
            clock,
            Arc::clone(&storage.repertoire),
        ));

        Self {
            journal,
            drills,
            repertoire,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        engine: ScoreEngine,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, clock, engine))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(&Storage::in_memory(), clock, ScoreEngine::new())
    }

    #[must_use]
    pub fn journal(&self) -> Arc<JournalService> {
        Arc::clone(&self.journal)
    }

    #[must_use]
    pub fn drills(&self) -> Arc<DrillService> {
        Arc::clone(&self.drills)
    }

    #[must_use]
    pub fn repertoire(&self) -> Arc<RepertoireService> {
        Arc::clone(&self.repertoire)
    }
}
