use chrono::NaiveDate;
use journal_core::model::{
    DrillKind, DrillScore, DrillSession, PracticeRecord, PracticeSession, RecordId, RepertoireId,
    RepertoireItem, RepertoireStatus, SongTitle, join_shapes, parse_shape_list,
};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) const KIND_PRACTICE: &str = "practice";
pub(crate) const KIND_DRILL: &str = "drill";

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn record_id_from_i64(v: i64) -> Result<RecordId, StorageError> {
    Ok(RecordId::new(i64_to_u64("record_id", v)?))
}

pub(crate) fn repertoire_id_from_i64(v: i64) -> Result<RepertoireId, StorageError> {
    Ok(RepertoireId::new(i64_to_u64("repertoire_id", v)?))
}

/// Column values for one `practice_records` row.
pub(crate) struct RecordColumns {
    pub kind: &'static str,
    pub practiced_on: NaiveDate,
    pub duration_minutes: Option<i64>,
    pub songs: String,
    pub techniques: String,
    pub drill_kind: Option<&'static str>,
    pub shapes: Option<String>,
    pub score: Option<i64>,
    pub time_seconds: Option<i64>,
    pub notes: String,
}

pub(crate) fn record_columns(record: &PracticeRecord) -> Result<RecordColumns, StorageError> {
    let columns = match record {
        PracticeRecord::Practice(s) => RecordColumns {
            kind: KIND_PRACTICE,
            practiced_on: s.date(),
            duration_minutes: Some(i64::from(s.duration_minutes())),
            songs: serde_json::to_string(s.songs()).map_err(ser)?,
            techniques: serde_json::to_string(s.techniques()).map_err(ser)?,
            drill_kind: None,
            shapes: None,
            score: None,
            time_seconds: None,
            notes: s.notes().to_owned(),
        },
        PracticeRecord::Drill(d) => RecordColumns {
            kind: KIND_DRILL,
            practiced_on: d.date,
            duration_minutes: None,
            songs: "[]".to_owned(),
            techniques: "[]".to_owned(),
            drill_kind: Some(d.kind.as_str()),
            shapes: Some(join_shapes(&d.shapes)),
            score: Some(i64::from(d.score.value())),
            time_seconds: Some(i64::from(d.time_seconds)),
            notes: d.notes.clone(),
        },
    };
    Ok(columns)
}

fn json_list(row: &sqlx::sqlite::SqliteRow, column: &str) -> Result<Vec<String>, StorageError> {
    let raw: String = row.try_get(column).map_err(ser)?;
    serde_json::from_str(&raw).map_err(ser)
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, StorageError> {
    value.ok_or_else(|| StorageError::Serialization(format!("missing {field}")))
}

pub(crate) fn map_record_row(row: &sqlx::sqlite::SqliteRow) -> Result<PracticeRecord, StorageError> {
    let kind: String = row.try_get("kind").map_err(ser)?;
    let practiced_on: NaiveDate = row.try_get("practiced_on").map_err(ser)?;
    let notes: String = row.try_get("notes").map_err(ser)?;

    match kind.as_str() {
        KIND_PRACTICE => {
            let minutes = required(
                "duration_minutes",
                row.try_get::<Option<i64>, _>("duration_minutes").map_err(ser)?,
            )?;
            Ok(PracticeSession::from_persisted(
                practiced_on,
                u32_from_i64("duration_minutes", minutes)?,
                json_list(row, "songs")?,
                json_list(row, "techniques")?,
                notes,
            )
            .into())
        }
        KIND_DRILL => {
            let drill_kind: DrillKind = required(
                "drill_kind",
                row.try_get::<Option<String>, _>("drill_kind").map_err(ser)?,
            )?
            .parse()
            .map_err(ser)?;
            let shapes = parse_shape_list(
                &row.try_get::<Option<String>, _>("shapes")
                    .map_err(ser)?
                    .unwrap_or_default(),
            )
            .map_err(ser)?;
            let score = required("score", row.try_get::<Option<i64>, _>("score").map_err(ser)?)?;
            let score = u8::try_from(score)
                .map_err(|_| StorageError::Serialization(format!("invalid score: {score}")))?;
            let time_seconds = row
                .try_get::<Option<i64>, _>("time_seconds")
                .map_err(ser)?
                .map(|v| u32_from_i64("time_seconds", v))
                .transpose()?
                .unwrap_or(0);

            Ok(DrillSession {
                date: practiced_on,
                kind: drill_kind,
                shapes,
                score: DrillScore::new(score),
                time_seconds,
                notes,
            }
            .into())
        }
        other => Err(StorageError::Serialization(format!(
            "invalid record kind: {other}"
        ))),
    }
}

pub(crate) fn map_repertoire_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<RepertoireItem, StorageError> {
    let title = SongTitle::new(row.try_get::<String, _>("title").map_err(ser)?).map_err(ser)?;
    let status: RepertoireStatus = row
        .try_get::<String, _>("status")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;

    Ok(RepertoireItem {
        title,
        artist: row.try_get("artist").map_err(ser)?,
        status,
        added_on: row.try_get("added_on").map_err(ser)?,
    })
}
