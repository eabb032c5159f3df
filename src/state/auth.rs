#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Profile;

/// Authentication state tracking the current user and loading status.
///
/// Provided as an `RwSignal` context from `App`. `loading` is true from app
/// start until the stored session (if any) has been restored, so gated pages
/// can distinguish "not signed in" from "still checking".
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// State after a completed sign-in or restore.
    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user), loading: false }
    }

    /// State after sign-out or a failed restore.
    pub fn signed_out() -> Self {
        Self { user: None, loading: false }
    }

    pub fn role(&self) -> Role {
        self.user.as_ref().map_or(Role::Student, |u| u.role)
    }

    pub fn is_teacher(&self) -> bool {
        self.role() == Role::Teacher
    }
}

/// The signed-in identity as assembled from the identity provider and the
/// backend user record. Replaced wholesale on every auth-state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUser {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: Role,
    /// Institutional student ID, present for student accounts.
    pub student_id: Option<String>,
}

impl SessionUser {
    /// Build a session from the backend profile record for `uid`.
    ///
    /// Missing display names fall back to the email, then the uid, matching
    /// what the roster pages show for incomplete records.
    pub fn from_profile(uid: &str, profile: &Profile) -> Self {
        let display_name = if profile.display_name.is_empty() {
            if profile.email.is_empty() {
                uid.to_owned()
            } else {
                profile.email.clone()
            }
        } else {
            profile.display_name.clone()
        };
        Self {
            uid: uid.to_owned(),
            email: profile.email.clone(),
            display_name,
            photo_url: if profile.photo_url.is_empty() {
                None
            } else {
                Some(profile.photo_url.clone())
            },
            role: Role::parse(&profile.role),
            student_id: profile.student_id.clone(),
        }
    }
}

/// Account role as reported by the backend user record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

impl Role {
    /// Case-insensitive parse; anything unrecognized is a student, the
    /// lower-privilege role.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("teacher") {
            Self::Teacher
        } else {
            Self::Student
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}
