use super::*;

fn image() -> CapturedImage {
    CapturedImage {
        data_url: "data:image/jpeg;base64,xyz".to_owned(),
        width: 640,
        height: 480,
    }
}

fn row(recognized: bool) -> RecognitionRow {
    RecognitionRow {
        student_id: "SV001".to_owned(),
        class_id: "CS101".to_owned(),
        recognized,
        similarity: 0.92,
        image_url: Some("x".to_owned()),
        manual: false,
    }
}

// =============================================================
// Step transitions
// =============================================================

#[test]
fn default_starts_at_capture() {
    let w = WizardState::default();
    assert_eq!(w.step, WizardStep::Capture);
    assert!(w.image.is_none());
    assert!(!w.submitted);
}

#[test]
fn image_ready_moves_to_verify_and_clears_class() {
    let mut w = WizardState::default();
    w.class_id = Some("stale".to_owned());
    w.image_ready(image());
    assert_eq!(w.step, WizardStep::Verify);
    assert!(w.image.is_some());
    assert!(w.class_id.is_none());
}

#[test]
fn retake_discards_image_and_returns_to_capture() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.retake();
    assert_eq!(w.step, WizardStep::Capture);
    assert!(w.image.is_none());
}

#[test]
fn step_indices_match_wizard_order() {
    assert_eq!(WizardStep::Capture.index(), 0);
    assert_eq!(WizardStep::Verify.index(), 1);
    assert_eq!(WizardStep::Results.index(), 2);
}

// =============================================================
// Submission guards
// =============================================================

#[test]
fn begin_submit_rejected_without_image() {
    let mut w = WizardState::default();
    w.class_id = Some("CS101".to_owned());
    assert_eq!(w.begin_submit(), Err(MISSING_INPUT));
    assert!(!w.submitting);
    assert_eq!(w.step, WizardStep::Capture);
}

#[test]
fn begin_submit_rejected_without_class() {
    let mut w = WizardState::default();
    w.image_ready(image());
    assert_eq!(w.begin_submit(), Err(MISSING_INPUT));
    assert!(!w.submitting);
    // Rejection mutates nothing.
    assert_eq!(w.step, WizardStep::Verify);
    assert!(w.image.is_some());
}

#[test]
fn begin_submit_rejected_when_both_missing() {
    let mut w = WizardState::default();
    assert_eq!(w.begin_submit(), Err(MISSING_INPUT));
}

#[test]
fn begin_submit_accepts_with_image_and_class() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    let generation = w.begin_submit().expect("submit accepted");
    assert!(w.submitting);
    assert_eq!(generation, w.generation());
}

#[test]
fn apply_outcome_moves_to_results() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    let generation = w.begin_submit().unwrap();
    assert!(w.apply_outcome(generation, row(true)));
    assert_eq!(w.step, WizardStep::Results);
    assert!(w.submitted);
    assert!(!w.submitting);
    assert_eq!(w.rows.len(), 1);
    assert!(w.rows[0].recognized);
}

#[test]
fn soft_failure_row_is_recorded_not_dropped() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    let generation = w.begin_submit().unwrap();
    assert!(w.apply_outcome(generation, row(false)));
    assert!(!w.rows[0].recognized);
    assert_eq!(w.step, WizardStep::Results);
}

#[test]
fn fail_submit_clears_in_flight_flag_only() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    let generation = w.begin_submit().unwrap();
    w.fail_submit(generation);
    assert!(!w.submitting);
    assert_eq!(w.step, WizardStep::Verify);
    assert!(w.image.is_some());
}

// =============================================================
// Start over
// =============================================================

#[test]
fn start_over_resets_everything_from_results() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    let generation = w.begin_submit().unwrap();
    w.apply_outcome(generation, row(true));

    w.start_over();
    assert_eq!(w.step, WizardStep::Capture);
    assert!(w.image.is_none());
    assert!(w.class_id.is_none());
    assert!(w.rows.is_empty());
    assert!(!w.submitted);
    assert!(!w.submitting);
}

#[test]
fn start_over_resets_from_verify_too() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    w.start_over();
    assert_eq!(w.step, WizardStep::Capture);
    assert!(w.image.is_none());
    assert!(w.class_id.is_none());
}

// =============================================================
// Stale async completions
// =============================================================

#[test]
fn outcome_after_start_over_is_ignored() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    let generation = w.begin_submit().unwrap();

    w.start_over();
    assert!(!w.apply_outcome(generation, row(true)));
    assert_eq!(w.step, WizardStep::Capture);
    assert!(w.rows.is_empty());
    assert!(!w.submitted);
}

#[test]
fn stale_file_read_is_ignored() {
    let mut w = WizardState::default();
    let generation = w.generation();
    w.start_over();
    assert!(!w.image_ready_if_current(generation, image()));
    assert!(w.image.is_none());
    assert_eq!(w.step, WizardStep::Capture);
}

#[test]
fn current_file_read_is_applied() {
    let mut w = WizardState::default();
    let generation = w.generation();
    assert!(w.image_ready_if_current(generation, image()));
    assert_eq!(w.step, WizardStep::Verify);
}

#[test]
fn stale_fail_submit_does_not_touch_new_wizard() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    let generation = w.begin_submit().unwrap();
    w.start_over();

    // New in-flight submission on the fresh generation.
    w.image_ready(image());
    w.class_id = Some("CS102".to_owned());
    let _ = w.begin_submit().unwrap();

    w.fail_submit(generation);
    assert!(w.submitting, "stale failure must not clear the new flight");
}

// =============================================================
// Manual entries
// =============================================================

#[test]
fn manual_entry_appends_marked_row() {
    let mut w = WizardState::default();
    w.record_manual("SV002".to_owned(), "CS101".to_owned());
    assert_eq!(w.rows.len(), 1);
    assert!(w.rows[0].manual);
    assert!(w.rows[0].recognized);
    assert_eq!(w.rows[0].similarity, 0.0);
}

// =============================================================
// Success view gating
// =============================================================

#[test]
fn recognized_outcome_unlocks_the_success_view() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    let generation = w.begin_submit().unwrap();
    assert!(w.apply_outcome(generation, row(true)));
    assert!(w.recognition_succeeded());
}

#[test]
fn unrecognized_outcome_does_not_unlock_the_success_view() {
    let mut w = WizardState::default();
    w.image_ready(image());
    w.class_id = Some("CS101".to_owned());
    let generation = w.begin_submit().unwrap();
    assert!(w.apply_outcome(generation, row(false)));
    assert!(w.submitted, "the outcome itself is recorded");
    assert!(!w.recognition_succeeded());
}

#[test]
fn manual_rows_do_not_count_as_recognition() {
    let mut w = WizardState::default();
    w.record_manual("SV002".to_owned(), "CS101".to_owned());
    w.submitted = true;
    assert!(!w.recognition_succeeded());
}
