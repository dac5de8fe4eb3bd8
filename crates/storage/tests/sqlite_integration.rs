use chrono::NaiveDate;
use journal_core::model::{
    CagedShape, DrillKind, DrillScore, DrillSession, PracticeRecord, PracticeSession, RecordId,
    RepertoireId, RepertoireItem, RepertoireStatus, SongTitle,
};
use storage::repository::{PracticeLogRepository, RepertoireRepository, Storage, StorageError};
use storage::sqlite::SqliteRepository;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn connect(name: &str) -> SqliteRepository {
    let repo = SqliteRepository::connect(&format!("sqlite:file:{name}?mode=memory&cache=shared"))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn practice() -> PracticeRecord {
    PracticeSession::new(
        date("2024-01-01"),
        60,
        vec!["Blackbird".into(), "Dust in the Wind".into()],
        vec!["travis picking".into()],
        "slow tempo, 60 bpm",
    )
    .unwrap()
    .into()
}

fn drill() -> PracticeRecord {
    DrillSession {
        date: date("2024-01-02"),
        kind: DrillKind::Caged,
        shapes: vec![CagedShape::C, CagedShape::A, CagedShape::C],
        score: DrillScore::new(47),
        time_seconds: 38,
        notes: "G shape still slow".into(),
    }
    .into()
}

#[tokio::test]
async fn sqlite_round_trips_both_record_kinds() {
    let repo = connect("memdb_records").await;

    let practice_id = repo.append_record(&practice()).await.unwrap();
    let drill_id = repo.append_record(&drill()).await.unwrap();

    assert_eq!(repo.get_record(practice_id).await.unwrap(), practice());
    assert_eq!(repo.get_record(drill_id).await.unwrap(), drill());

    let rows = repo.list_records().await.unwrap();
    assert_eq!(
        rows.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![practice_id, drill_id]
    );
}

#[tokio::test]
async fn sqlite_delete_and_missing_rows() {
    let repo = connect("memdb_delete").await;

    let id = repo.append_record(&practice()).await.unwrap();
    repo.delete_record(id).await.unwrap();

    assert!(matches!(
        repo.get_record(id).await,
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        repo.delete_record(RecordId::new(9_999)).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn sqlite_repertoire_conflicts_and_status() {
    let repo = connect("memdb_repertoire").await;
    let item = |title: &str| {
        RepertoireItem::new(
            SongTitle::new(title).unwrap(),
            Some("The Beatles".into()),
            date("2024-02-01"),
        )
    };

    let id = repo.append_item(&item("Blackbird")).await.unwrap();
    repo.append_item(&item("Across the Universe")).await.unwrap();
    assert!(matches!(
        repo.append_item(&item("BLACKBIRD")).await,
        Err(StorageError::Conflict)
    ));

    repo.set_status(id, RepertoireStatus::Polishing).await.unwrap();
    assert!(matches!(
        repo.set_status(RepertoireId::new(404), RepertoireStatus::Mastered)
            .await,
        Err(StorageError::NotFound)
    ));

    let rows = repo.list_items().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].item.title.as_str(), "Across the Universe");
    assert_eq!(rows[1].id, id);
    assert_eq!(rows[1].item.status, RepertoireStatus::Polishing);
    assert_eq!(rows[1].item.artist.as_deref(), Some("The Beatles"));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn storage_sqlite_wires_both_repositories() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");

    storage.records.append_record(&drill()).await.unwrap();
    let rows = storage.records.list_records().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(storage.repertoire.list_items().await.unwrap().is_empty());
}
