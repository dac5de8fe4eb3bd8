use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::DrillError;

/// One of the five chord shapes of the CAGED system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CagedShape {
    C,
    A,
    G,
    E,
    D,
}

impl CagedShape {
    /// The full vocabulary, in CAGED order.
    pub const ALL: [CagedShape; 5] = [
        CagedShape::C,
        CagedShape::A,
        CagedShape::G,
        CagedShape::E,
        CagedShape::D,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CagedShape::C => "C",
            CagedShape::A => "A",
            CagedShape::G => "G",
            CagedShape::E => "E",
            CagedShape::D => "D",
        }
    }
}

impl fmt::Display for CagedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CagedShape {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(CagedShape::C),
            "A" => Ok(CagedShape::A),
            "G" => Ok(CagedShape::G),
            "E" => Ok(CagedShape::E),
            "D" => Ok(CagedShape::D),
            _ => Err(DrillError::UnknownShape(s.trim().to_string())),
        }
    }
}

/// Parse a comma separated shape list such as `"C, A,g"`.
///
/// Empty fragments are skipped, so `""` yields an empty list.
///
/// # Errors
///
/// Returns `DrillError::UnknownShape` for the first fragment outside the vocabulary.
pub fn parse_shape_list(raw: &str) -> Result<Vec<CagedShape>, DrillError> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Render shapes back into the comma separated form accepted by `parse_shape_list`.
#[must_use]
pub fn join_shapes(shapes: &[CagedShape]) -> String {
    shapes
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
