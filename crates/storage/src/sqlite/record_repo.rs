use journal_core::model::{PracticeRecord, RecordId};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_record_row, record_columns, record_id_from_i64, ser};
use crate::repository::{PracticeLogRepository, PracticeRecordRow, StorageError};
use sqlx::Row;

#[async_trait::async_trait]
impl PracticeLogRepository for SqliteRepository {
    async fn append_record(&self, record: &PracticeRecord) -> Result<RecordId, StorageError> {
        let cols = record_columns(record)?;

        let res = sqlx::query(
            r"
                INSERT INTO practice_records (
                    kind, practiced_on, duration_minutes, songs, techniques,
                    drill_kind, shapes, score, time_seconds, notes
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(cols.kind)
        .bind(cols.practiced_on)
        .bind(cols.duration_minutes)
        .bind(cols.songs)
        .bind(cols.techniques)
        .bind(cols.drill_kind)
        .bind(cols.shapes)
        .bind(cols.score)
        .bind(cols.time_seconds)
        .bind(cols.notes)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        record_id_from_i64(res.last_insert_rowid())
    }

    async fn get_record(&self, id: RecordId) -> Result<PracticeRecord, StorageError> {
        let row = sqlx::query(
            r"
                SELECT
                    kind, practiced_on, duration_minutes, songs, techniques,
                    drill_kind, shapes, score, time_seconds, notes
                FROM practice_records
                WHERE id = ?1
            ",
        )
        .bind(id_to_i64("record_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        map_record_row(&row)
    }

    async fn list_records(&self) -> Result<Vec<PracticeRecordRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    id, kind, practiced_on, duration_minutes, songs, techniques,
                    drill_kind, shapes, score, time_seconds, notes
                FROM practice_records
                ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let id = record_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
            out.push(PracticeRecordRow {
                id,
                record: map_record_row(&row)?,
            });
        }
        Ok(out)
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM practice_records WHERE id = ?1")
            .bind(id_to_i64("record_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
