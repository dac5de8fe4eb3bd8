mod caged;
mod drill;
mod ids;
mod practice;
mod repertoire;

pub use caged::{CagedShape, join_shapes, parse_shape_list};
pub use drill::{DrillAttempt, DrillError, DrillKind, DrillScore, MAX_ACCURACY, MIN_ACCURACY};
pub use ids::{ParseIdError, RecordId, RepertoireId};
pub use practice::{DrillSession, PracticeError, PracticeRecord, PracticeSession};
pub use repertoire::{RepertoireError, RepertoireItem, RepertoireStatus, SongTitle};
