use super::*;

fn profile(display_name: &str, email: &str, role: &str) -> Profile {
    Profile {
        user_id: "u-1".to_owned(),
        email: email.to_owned(),
        display_name: display_name.to_owned(),
        photo_url: String::new(),
        role: role.to_owned(),
        status: "active".to_owned(),
        department: String::new(),
        last_login: String::new(),
        student_id: Some("SV001".to_owned()),
        classes: Vec::new(),
        attendance_stats: None,
    }
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_is_loading_without_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.loading);
}

#[test]
fn auth_state_signed_out_clears_loading() {
    let state = AuthState::signed_out();
    assert!(state.user.is_none());
    assert!(!state.loading);
}

#[test]
fn auth_state_role_defaults_to_student_without_user() {
    assert_eq!(AuthState::default().role(), Role::Student);
    assert!(!AuthState::default().is_teacher());
}

#[test]
fn auth_state_reports_teacher_role() {
    let state = AuthState::signed_in(SessionUser::from_profile("u-1", &profile("A", "a@x.y", "teacher")));
    assert!(state.is_teacher());
    assert!(!state.loading);
}

// =============================================================
// Role parsing
// =============================================================

#[test]
fn role_parse_is_case_insensitive() {
    assert_eq!(Role::parse("teacher"), Role::Teacher);
    assert_eq!(Role::parse("Teacher"), Role::Teacher);
    assert_eq!(Role::parse("TEACHER"), Role::Teacher);
    assert_eq!(Role::parse("student"), Role::Student);
}

#[test]
fn role_parse_unknown_falls_back_to_student() {
    assert_eq!(Role::parse(""), Role::Student);
    assert_eq!(Role::parse("admin"), Role::Student);
}

// =============================================================
// SessionUser::from_profile
// =============================================================

#[test]
fn session_user_takes_display_name_when_present() {
    let user = SessionUser::from_profile("u-1", &profile("Alice", "alice@example.com", "student"));
    assert_eq!(user.display_name, "Alice");
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.student_id.as_deref(), Some("SV001"));
}

#[test]
fn session_user_falls_back_to_email_then_uid() {
    let user = SessionUser::from_profile("u-1", &profile("", "alice@example.com", "student"));
    assert_eq!(user.display_name, "alice@example.com");

    let user = SessionUser::from_profile("u-1", &profile("", "", "student"));
    assert_eq!(user.display_name, "u-1");
}

#[test]
fn session_user_empty_photo_url_becomes_none() {
    let user = SessionUser::from_profile("u-1", &profile("Alice", "a@x.y", "student"));
    assert!(user.photo_url.is_none());
}
