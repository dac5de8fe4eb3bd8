//! Shared error types for the services crate.

use thiserror::Error;

use journal_core::model::{DrillError, PracticeError, RepertoireError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `JournalService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JournalError {
    #[error(transparent)]
    Practice(#[from] PracticeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DrillService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DrillServiceError {
    #[error(transparent)]
    Drill(#[from] DrillError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RepertoireService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepertoireServiceError {
    #[error("a song titled {0:?} is already in the repertoire")]
    DuplicateTitle(String),
    #[error(transparent)]
    Repertoire(#[from] RepertoireError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
