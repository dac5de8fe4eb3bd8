use async_trait::async_trait;
use journal_core::model::{
    PracticeRecord, RecordId, RepertoireId, RepertoireItem, RepertoireStatus,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A journal entry together with its storage identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeRecordRow {
    pub id: RecordId,
    pub record: PracticeRecord,
}

/// A repertoire song together with its storage identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepertoireRow {
    pub id: RepertoireId,
    pub item: RepertoireItem,
}

/// Repository contract for the practice journal (sessions and drills).
#[async_trait]
pub trait PracticeLogRepository: Send + Sync {
    /// Append a journal entry and return its new identifier.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_record(&self, record: &PracticeRecord) -> Result<RecordId, StorageError>;

    /// Fetch a single entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_record(&self, id: RecordId) -> Result<PracticeRecord, StorageError>;

    /// Every entry, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn list_records(&self) -> Result<Vec<PracticeRecordRow>, StorageError>;

    /// Remove an entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no entry has this identifier.
    async fn delete_record(&self, id: RecordId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait RepertoireRepository: Send + Sync {
    /// Add a song. Titles are unique, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the title already exists.
    async fn append_item(&self, item: &RepertoireItem) -> Result<RepertoireId, StorageError>;

    /// All songs ordered by title.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn list_items(&self) -> Result<Vec<RepertoireRow>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no song has this identifier.
    async fn set_status(
        &self,
        id: RepertoireId,
        status: RepertoireStatus,
    ) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<BTreeMap<RecordId, PracticeRecord>>>,
    repertoire: Arc<Mutex<BTreeMap<RepertoireId, RepertoireItem>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn next_key<K, V>(map: &BTreeMap<K, V>, value: impl Fn(&K) -> u64) -> u64 {
    map.keys().next_back().map_or(1, |k| value(k) + 1)
}

#[async_trait]
impl PracticeLogRepository for InMemoryRepository {
    async fn append_record(&self, record: &PracticeRecord) -> Result<RecordId, StorageError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        let id = RecordId::new(next_key(&*guard, RecordId::value));
        guard.insert(id, record.clone());
        Ok(id)
    }

    async fn get_record(&self, id: RecordId) -> Result<PracticeRecord, StorageError> {
        let guard = self.records.lock().map_err(poisoned)?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_records(&self) -> Result<Vec<PracticeRecordRow>, StorageError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .map(|(id, record)| PracticeRecordRow {
                id: *id,
                record: record.clone(),
            })
            .collect())
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), StorageError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        guard.remove(&id).map(|_| ()).ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl RepertoireRepository for InMemoryRepository {
    async fn append_item(&self, item: &RepertoireItem) -> Result<RepertoireId, StorageError> {
        let mut guard = self.repertoire.lock().map_err(poisoned)?;
        let wanted = item.title.as_str().to_lowercase();
        if guard
            .values()
            .any(|existing| existing.title.as_str().to_lowercase() == wanted)
        {
            return Err(StorageError::Conflict);
        }
        let id = RepertoireId::new(next_key(&*guard, RepertoireId::value));
        guard.insert(id, item.clone());
        Ok(id)
    }

    async fn list_items(&self) -> Result<Vec<RepertoireRow>, StorageError> {
        let guard = self.repertoire.lock().map_err(poisoned)?;
        let mut rows: Vec<RepertoireRow> = guard
            .iter()
            .map(|(id, item)| RepertoireRow {
                id: *id,
                item: item.clone(),
            })
            .collect();
        rows.sort_by(|a, b| a.item.title.cmp(&b.item.title));
        Ok(rows)
    }

    async fn set_status(
        &self,
        id: RepertoireId,
        status: RepertoireStatus,
    ) -> Result<(), StorageError> {
        let mut guard = self.repertoire.lock().map_err(poisoned)?;
        let item = guard.get_mut(&id).ok_or(StorageError::NotFound)?;
        item.status = status;
        Ok(())
    }
}

/// Aggregates the journal repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn PracticeLogRepository>,
    pub repertoire: Arc<dyn RepertoireRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let records: Arc<dyn PracticeLogRepository> = Arc::new(repo.clone());
        let repertoire: Arc<dyn RepertoireRepository> = Arc::new(repo);
        Self {
            records,
            repertoire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use journal_core::model::{PracticeSession, SongTitle};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn session(d: u32, song: &str) -> PracticeRecord {
        PracticeSession::new(day(d), 20, vec![song.into()], vec![], "")
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn records_keep_insertion_order() {
        let repo = InMemoryRepository::new();
        let first = repo.append_record(&session(3, "Blackbird")).await.unwrap();
        let second = repo.append_record(&session(1, "Wonderwall")).await.unwrap();
        assert!(first < second);

        let rows = repo.list_records().await.unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![first, second]);
        assert_eq!(repo.get_record(second).await.unwrap(), session(1, "Wonderwall"));
    }

    #[tokio::test]
    async fn delete_missing_record_is_not_found() {
        let repo = InMemoryRepository::new();
        let id = repo.append_record(&session(1, "Blackbird")).await.unwrap();
        repo.delete_record(id).await.unwrap();
        assert!(matches!(
            repo.delete_record(id).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(repo.get_record(id).await, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn repertoire_titles_are_unique_and_sorted() {
        let repo = InMemoryRepository::new();
        let item = |t: &str| RepertoireItem::new(SongTitle::new(t).unwrap(), None, day(1));

        let wonderwall = repo.append_item(&item("Wonderwall")).await.unwrap();
        repo.append_item(&item("Blackbird")).await.unwrap();
        assert!(matches!(
            repo.append_item(&item("blackbird")).await,
            Err(StorageError::Conflict)
        ));

        repo.set_status(wonderwall, RepertoireStatus::Mastered)
            .await
            .unwrap();
        let rows = repo.list_items().await.unwrap();
        let titles: Vec<_> = rows.iter().map(|r| r.item.title.as_str()).collect();
        assert_eq!(titles, vec!["Blackbird", "Wonderwall"]);
        assert_eq!(rows[1].item.status, RepertoireStatus::Mastered);
    }
}
