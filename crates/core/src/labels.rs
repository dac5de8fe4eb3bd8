//! Display helpers shared by drill screens and reports.

/// Returned by [`accuracy_label`] for ratings outside `1..=5`.
pub const UNKNOWN_ACCURACY_LABEL: &str = "Unknown";

/// Describe a 1-5 accuracy rating.
#[must_use]
pub fn accuracy_label(accuracy: u8) -> &'static str {
    match accuracy {
        1 => "Poor - Many mistakes",
        2 => "Fair - Several mistakes",
        3 => "Good - Few mistakes",
        4 => "Great - Minor mistakes",
        5 => "Perfect - No mistakes",
        _ => UNKNOWN_ACCURACY_LABEL,
    }
}

/// `"45s"` under a minute, otherwise `"3m 5s"`.
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    if total_seconds < 60 {
        return format!("{total_seconds}s");
    }
    format!("{}m {}s", total_seconds / 60, total_seconds % 60)
}
