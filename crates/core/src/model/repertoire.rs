use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RepertoireError {
    #[error("song title cannot be empty")]
    EmptyTitle,

    #[error("unknown repertoire status: {0:?}")]
    UnknownStatus(String),
}

/// Validated song title (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SongTitle(String);

impl SongTitle {
    /// # Errors
    ///
    /// Returns `RepertoireError::EmptyTitle` if the title is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, RepertoireError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RepertoireError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SongTitle {
    type Error = RepertoireError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SongTitle> for String {
    fn from(value: SongTitle) -> Self {
        value.0
    }
}

impl fmt::Display for SongTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How far along a song is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepertoireStatus {
    #[default]
    Learning,
    Polishing,
    Mastered,
}

impl RepertoireStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RepertoireStatus::Learning => "learning",
            RepertoireStatus::Polishing => "polishing",
            RepertoireStatus::Mastered => "mastered",
        }
    }
}

impl FromStr for RepertoireStatus {
    type Err = RepertoireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "learning" => Ok(RepertoireStatus::Learning),
            "polishing" => Ok(RepertoireStatus::Polishing),
            "mastered" => Ok(RepertoireStatus::Mastered),
            _ => Err(RepertoireError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for RepertoireStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A song the player is working on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepertoireItem {
    pub title: SongTitle,
    pub artist: Option<String>,
    pub status: RepertoireStatus,
    pub added_on: NaiveDate,
}

impl RepertoireItem {
    /// New song in the `Learning` state. A blank artist is stored as `None`.
    #[must_use]
    pub fn new(title: SongTitle, artist: Option<String>, added_on: NaiveDate) -> Self {
        let artist = artist
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        Self {
            title,
            artist,
            status: RepertoireStatus::default(),
            added_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed_and_required() {
        assert_eq!(SongTitle::new("  Wonderwall ").unwrap().as_str(), "Wonderwall");
        assert_eq!(SongTitle::new("   ").unwrap_err(), RepertoireError::EmptyTitle);
    }

    #[test]
    fn status_parses_any_case() {
        assert_eq!(
            "Mastered".parse::<RepertoireStatus>().unwrap(),
            RepertoireStatus::Mastered
        );
        assert!("done".parse::<RepertoireStatus>().is_err());
    }

    #[test]
    fn blank_artist_becomes_none() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let item = RepertoireItem::new(SongTitle::new("Blackbird").unwrap(), Some(" ".into()), date);
        assert_eq!(item.artist, None);
        assert_eq!(item.status, RepertoireStatus::Learning);
    }
}
