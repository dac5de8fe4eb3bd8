use journal_core::model::{RepertoireId, RepertoireItem, RepertoireStatus};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_repertoire_row, repertoire_id_from_i64, ser};
use crate::repository::{RepertoireRepository, RepertoireRow, StorageError};

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait::async_trait]
impl RepertoireRepository for SqliteRepository {
    async fn append_item(&self, item: &RepertoireItem) -> Result<RepertoireId, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO repertoire (title, title_key, artist, status, added_on)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(item.title.as_str())
        .bind(item.title.as_str().to_lowercase())
        .bind(item.artist.as_deref())
        .bind(item.status.as_str())
        .bind(item.added_on)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::Conflict
            } else {
                conn(e)
            }
        })?;

        repertoire_id_from_i64(res.last_insert_rowid())
    }

    async fn list_items(&self) -> Result<Vec<RepertoireRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, title, artist, status, added_on
                FROM repertoire
                ORDER BY title ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let id = repertoire_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
            out.push(RepertoireRow {
                id,
                item: map_repertoire_row(&row)?,
            });
        }
        Ok(out)
    }

    async fn set_status(
        &self,
        id: RepertoireId,
        status: RepertoireStatus,
    ) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE repertoire SET status = ?1 WHERE id = ?2")
            .bind(status.as_str())
            .bind(id_to_i64("repertoire_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
