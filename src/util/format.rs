#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Format a 0..=1 fraction as a one-decimal percentage, e.g. `0.92` -> `"92.0%"`.
///
/// Used for recognition similarity; the backend reports a fraction and the
/// results table shows the percentage.
pub fn percent1(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Color bucket for an attendance-rate percentage (0..=100):
/// below 70 is red, below 85 orange, otherwise green.
pub fn rate_color(rate: f64) -> &'static str {
    if rate < 70.0 {
        "red"
    } else if rate < 85.0 {
        "orange"
    } else {
        "green"
    }
}

/// Tag color for an active/inactive status string.
pub fn status_color(status: &str) -> &'static str {
    if status.eq_ignore_ascii_case("active") {
        "green"
    } else {
        "red"
    }
}

/// Case-insensitive substring match of `needle` against any of `fields`.
/// An empty needle matches everything, so an empty search box shows the
/// full list.
pub fn matches_filter(needle: &str, fields: &[&str]) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}
