use std::sync::Arc;

use tracing::{info, warn};

use journal_core::model::{RepertoireId, RepertoireItem, RepertoireStatus, SongTitle};
use storage::repository::{RepertoireRepository, RepertoireRow, StorageError};

use crate::Clock;
use crate::error::RepertoireServiceError;

/// Songs the player is learning.
#[derive(Clone)]
pub struct RepertoireService {
    clock: Clock,
    songs: Arc<dyn RepertoireRepository>,
}

impl RepertoireService {
    #[must_use]
    pub fn new(clock: Clock, songs: Arc<dyn RepertoireRepository>) -> Self {
        Self { clock, songs }
    }

    /// Add a song in the `Learning` state.
    ///
    /// # Errors
    ///
    /// Returns `RepertoireServiceError::Repertoire` if the title is blank.
    /// Returns `RepertoireServiceError::DuplicateTitle` if the song already exists.
    /// Returns `RepertoireServiceError::Storage` if persistence fails.
    pub async fn add_song(
        &self,
        title: &str,
        artist: Option<String>,
    ) -> Result<RepertoireId, RepertoireServiceError> {
        let title = SongTitle::new(title)?;
        let item = RepertoireItem::new(title, artist, self.clock.today());

        match self.songs.append_item(&item).await {
            Ok(id) => {
                info!(repertoire_id = %id, title = %item.title, "added song to repertoire");
                Ok(id)
            }
            Err(StorageError::Conflict) => {
                warn!(title = %item.title, "song already in repertoire");
                Err(RepertoireServiceError::DuplicateTitle(item.title.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// # Errors
    ///
    /// Returns `RepertoireServiceError::Storage` if the song is missing or the update fails.
    pub async fn set_status(
        &self,
        id: RepertoireId,
        status: RepertoireStatus,
    ) -> Result<(), RepertoireServiceError> {
        self.songs.set_status(id, status).await?;
        info!(repertoire_id = %id, status = status.as_str(), "updated song status");
        Ok(())
    }

    /// Songs ordered by title.
    ///
    /// # Errors
    ///
    /// Returns `RepertoireServiceError::Storage` if repository access fails.
    pub async fn songs(&self) -> Result<Vec<RepertoireRow>, RepertoireServiceError> {
        Ok(self.songs.list_items().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn duplicate_titles_are_reported_by_name() {
        let svc = RepertoireService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        svc.add_song("Wonderwall", Some("Oasis".into())).await.unwrap();

        let err = svc.add_song(" wonderwall ", None).await.unwrap_err();
        assert!(matches!(err, RepertoireServiceError::DuplicateTitle(t) if t == "wonderwall"));
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let svc = RepertoireService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        assert!(matches!(
            svc.add_song("  ", None).await,
            Err(RepertoireServiceError::Repertoire(_))
        ));
    }
}
