#![forbid(unsafe_code)]

pub mod error;
pub mod labels;
pub mod model;
pub mod progression;
pub mod scoring;
pub mod time;

pub use error::Error;
pub use progression::{ProgressionSummary, distinct_focus_options, matches_focus, summarize};
pub use scoring::ScoreEngine;
pub use time::Clock;
