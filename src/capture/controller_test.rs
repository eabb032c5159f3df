use super::*;

// =============================================================
// Phase transitions (native half of the controller)
// =============================================================

#[test]
fn controller_starts_idle() {
    let c = CaptureController::new();
    assert_eq!(c.phase(), CapturePhase::Idle);
    assert!(!c.is_streaming());
}

#[test]
fn attach_enters_streaming() {
    let mut c = CaptureController::new();
    c.attach();
    assert!(c.is_streaming());
}

#[test]
fn release_returns_to_idle_and_reports_live_stream() {
    let mut c = CaptureController::new();
    c.attach();
    assert!(c.release(), "first release stops the live stream");
    assert_eq!(c.phase(), CapturePhase::Idle);
}

#[test]
fn release_is_idempotent() {
    let mut c = CaptureController::new();
    c.attach();
    assert!(c.release());
    assert!(!c.release(), "second release has nothing to stop");
    assert!(!c.release());
}

#[test]
fn release_without_stream_is_a_no_op() {
    let mut c = CaptureController::new();
    assert!(!c.release());
    assert_eq!(c.phase(), CapturePhase::Idle);
}

#[test]
fn double_attach_holds_at_most_one_stream() {
    let mut c = CaptureController::new();
    c.attach();
    c.attach();
    assert!(c.is_streaming());
    // Only one stream is outstanding: one release stops it, the next
    // finds nothing.
    assert!(c.release());
    assert!(!c.release());
}

// =============================================================
// Shutdown (page teardown)
// =============================================================

#[test]
fn shutdown_releases_and_refuses_late_streams() {
    let mut c = CaptureController::new();
    c.attach();
    c.shutdown();
    assert!(!c.is_streaming());

    // A getUserMedia promise resolving after unmount must not leave a
    // live handle behind.
    c.attach();
    assert!(!c.is_streaming());
    assert!(!c.release());
}
