//! Plain-text and JSON output for the CLI.

use anyhow::Result;
use serde::Serialize;

use journal_core::labels::format_duration;
use journal_core::model::{PracticeRecord, RecordId, RepertoireId, RepertoireItem, join_shapes};
use journal_core::progression::ProgressionSummary;
use journal_core::scoring::score_severity_band;
use services::DrillReport;
use storage::repository::{PracticeRecordRow, RepertoireRow};

#[derive(Serialize)]
struct RecordView<'a> {
    id: RecordId,
    record: &'a PracticeRecord,
}

#[derive(Serialize)]
struct SongView<'a> {
    id: RepertoireId,
    #[serde(flatten)]
    item: &'a RepertoireItem,
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One timeline line, e.g. `2024-03-01  practice  20 min  Blackbird`.
#[must_use]
pub fn record_line(record: &PracticeRecord) -> String {
    match record {
        PracticeRecord::Practice(s) => {
            let topics: Vec<&str> = s
                .songs()
                .iter()
                .chain(s.techniques())
                .map(String::as_str)
                .collect();
            format!(
                "{}  practice  {} min  {}",
                s.date(),
                s.duration_minutes(),
                topics.join(", ")
            )
        }
        PracticeRecord::Drill(d) => format!(
            "{}  {}  score {} ({})  {}  {}",
            d.date,
            d.kind.display_name(),
            d.score,
            score_severity_band(d.score).as_str(),
            join_shapes(&d.shapes),
            format_duration(u64::from(d.time_seconds)),
        ),
    }
}

pub fn drill_report(report: &DrillReport, as_json: bool) -> Result<String> {
    if as_json {
        return json(report);
    }
    let mut out = format!(
        "score {} ({})\naccuracy: {}\ntime: {}\ncoverage {:.0}% / accuracy {:.0}% / speed {:.0}%",
        report.score,
        report.band.as_str(),
        report.accuracy_label,
        report.elapsed,
        report.breakdown.shape_coverage * 100.0,
        report.breakdown.accuracy_score * 100.0,
        report.breakdown.speed_score * 100.0,
    );
    if let Some(id) = report.record_id {
        out.push_str(&format!("\nsaved as entry {id}"));
    }
    Ok(out)
}

pub fn progression(focus: &str, summary: &ProgressionSummary, as_json: bool) -> Result<String> {
    if as_json {
        return json(summary);
    }
    if focus.is_empty() {
        return Ok("no focus selected; run `focus-options` to see choices".to_string());
    }
    let mut lines = vec![format!(
        "{focus}: {} sessions, {} min",
        summary.total_sessions, summary.total_minutes
    )];
    lines.extend(summary.sessions.iter().map(record_line));
    Ok(lines.join("\n"))
}

pub fn records(rows: &[PracticeRecordRow], as_json: bool) -> Result<String> {
    if as_json {
        let views: Vec<RecordView<'_>> = rows
            .iter()
            .map(|r| RecordView {
                id: r.id,
                record: &r.record,
            })
            .collect();
        return json(&views);
    }
    Ok(rows
        .iter()
        .map(|r| format!("#{:<4} {}", r.id.value(), record_line(&r.record)))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn songs(rows: &[RepertoireRow], as_json: bool) -> Result<String> {
    if as_json {
        let views: Vec<SongView<'_>> = rows
            .iter()
            .map(|r| SongView {
                id: r.id,
                item: &r.item,
            })
            .collect();
        return json(&views);
    }
    Ok(rows
        .iter()
        .map(|r| {
            let artist = r
                .item
                .artist
                .as_deref()
                .map(|a| format!(" - {a}"))
                .unwrap_or_default();
            format!("#{:<4} {}{}  [{}]", r.id.value(), r.item.title, artist, r.item.status)
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use journal_core::model::{CagedShape, DrillKind, DrillScore, DrillSession, PracticeSession};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn practice_line_lists_songs_then_techniques() {
        let record: PracticeRecord = PracticeSession::new(
            day(),
            20,
            vec!["Blackbird".into()],
            vec!["travis picking".into()],
            "",
        )
        .unwrap()
        .into();
        assert_eq!(
            record_line(&record),
            "2024-03-01  practice  20 min  Blackbird, travis picking"
        );
    }

    #[test]
    fn drill_line_shows_band_and_time() {
        let record: PracticeRecord = DrillSession {
            date: day(),
            kind: DrillKind::Caged,
            shapes: vec![CagedShape::C, CagedShape::A],
            score: DrillScore::new(26),
            time_seconds: 75,
            notes: String::new(),
        }
        .into();
        assert_eq!(
            record_line(&record),
            "2024-03-01  CAGED  score 26 (critical)  C,A  1m 15s"
        );
    }

    #[test]
    fn empty_focus_prompts_for_a_choice() {
        let out = progression("", &ProgressionSummary::default(), false).unwrap();
        assert!(out.contains("focus-options"));
    }
}
