use thiserror::Error;

use crate::model::{DrillError, PracticeError, RepertoireError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Drill(#[from] DrillError),
    #[error(transparent)]
    Practice(#[from] PracticeError),
    #[error(transparent)]
    Repertoire(#[from] RepertoireError),
}
