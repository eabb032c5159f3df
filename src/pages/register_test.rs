use super::build_request;
use crate::state::auth::Role;

// =============================================================
// Validation
// =============================================================

#[test]
fn rejects_blank_fields() {
    let err = build_request("", "a@b.c", "S1", Role::Student, "secret1", "secret1").unwrap_err();
    assert_eq!(err, "All fields are required");

    let err = build_request("Ann", "  ", "S1", Role::Student, "secret1", "secret1").unwrap_err();
    assert_eq!(err, "All fields are required");
}

#[test]
fn rejects_short_password() {
    let err = build_request("Ann", "a@b.c", "S1", Role::Student, "12345", "12345").unwrap_err();
    assert_eq!(err, "Password must be at least 6 characters");
}

#[test]
fn rejects_mismatched_confirmation() {
    let err =
        build_request("Ann", "a@b.c", "S1", Role::Student, "secret1", "secret2").unwrap_err();
    assert_eq!(err, "Passwords do not match");
}

// =============================================================
// Request shape
// =============================================================

#[test]
fn student_request_carries_student_id_only() {
    let req =
        build_request(" Ann Lee ", "ann@school.edu", "S-42", Role::Student, "secret1", "secret1")
            .unwrap();
    assert_eq!(req.full_name, "Ann Lee");
    assert_eq!(req.role, "student");
    assert_eq!(req.student_id.as_deref(), Some("S-42"));
    assert!(req.teacher_id.is_none());
}

#[test]
fn teacher_request_carries_teacher_id_only() {
    let req = build_request("Bo", "bo@school.edu", "T-7", Role::Teacher, "secret1", "secret1")
        .unwrap();
    assert_eq!(req.role, "teacher");
    assert_eq!(req.teacher_id.as_deref(), Some("T-7"));
    assert!(req.student_id.is_none());
}
