use super::*;

// =============================================================
// percent1
// =============================================================

#[test]
fn percent1_formats_fraction_with_one_decimal() {
    assert_eq!(percent1(0.92), "92.0%");
    assert_eq!(percent1(0.875), "87.5%");
}

#[test]
fn percent1_handles_bounds() {
    assert_eq!(percent1(0.0), "0.0%");
    assert_eq!(percent1(1.0), "100.0%");
}

// =============================================================
// rate_color
// =============================================================

#[test]
fn rate_color_buckets() {
    assert_eq!(rate_color(69.9), "red");
    assert_eq!(rate_color(70.0), "orange");
    assert_eq!(rate_color(84.9), "orange");
    assert_eq!(rate_color(85.0), "green");
    assert_eq!(rate_color(100.0), "green");
}

// =============================================================
// status_color
// =============================================================

#[test]
fn status_color_matches_case_insensitively() {
    assert_eq!(status_color("active"), "green");
    assert_eq!(status_color("Active"), "green");
    assert_eq!(status_color("inactive"), "red");
    assert_eq!(status_color(""), "red");
}

// =============================================================
// matches_filter
// =============================================================

#[test]
fn empty_needle_matches_everything() {
    assert!(matches_filter("", &["anything"]));
    assert!(matches_filter("", &[]));
}

#[test]
fn filter_is_case_insensitive_substring() {
    assert!(matches_filter("web", &["Web Development", "CS101"]));
    assert!(matches_filter("CS1", &["Web Development", "cs101"]));
    assert!(!matches_filter("math", &["Web Development", "CS101"]));
}

#[test]
fn filter_checks_every_field() {
    assert!(matches_filter("alice", &["SV001", "alice@example.com"]));
}
