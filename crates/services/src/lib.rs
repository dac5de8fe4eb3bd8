#![forbid(unsafe_code)]

pub mod app_services;
pub mod drill_service;
pub mod error;
pub mod journal_service;
pub mod repertoire_service;

pub use journal_core::Clock;

pub use app_services::AppServices;
pub use drill_service::{DrillReport, DrillService};
pub use error::{AppServicesError, DrillServiceError, JournalError, RepertoireServiceError};
pub use journal_service::{JournalService, NewPracticeSession};
pub use repertoire_service::RepertoireService;
