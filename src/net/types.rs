//! Serde types for the backend REST contracts.
//!
//! Field names mirror what the backend actually emits: list endpoints wrap
//! their payload under a per-endpoint key (`classes`, `students`, `data`,
//! ...) next to a `success` flag, dashboard endpoints return bare
//! snake_case objects, and report rows use camelCase (`attendanceRate`).
//! Records coming out of the drifted Firestore collections can miss fields,
//! so almost everything defaults.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

fn default_status() -> String {
    "active".to_owned()
}

/// Accept a string, or silently drop legacy non-string values (the class
/// `schedule` field is `{}` in older documents).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

// =============================================================
// Classes
// =============================================================

/// A class as listed by `GET /api/classes`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClassRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub room: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub schedule: String,
    #[serde(default)]
    pub instructor: Option<InstructorRef>,
    /// Server-resolved display name for the instructor, when available.
    #[serde(default, rename = "instructorName")]
    pub instructor_name: String,
    #[serde(default, rename = "totalStudents")]
    pub total_students: u32,
    #[serde(default)]
    pub students: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

impl ClassRef {
    /// "Name (CODE)" label used by class selectors.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }

    pub fn instructor_uid(&self) -> Option<&str> {
        self.instructor.as_ref().and_then(InstructorRef::uid)
    }
}

/// The `instructor` field drifted between revisions: a bare uid string in
/// newer documents, an embedded `{id, name}` object in older ones.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InstructorRef {
    Uid(String),
    Details {
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
    },
}

impl InstructorRef {
    pub fn uid(&self) -> Option<&str> {
        match self {
            Self::Uid(uid) => Some(uid),
            Self::Details { id, .. } if !id.is_empty() => Some(id),
            Self::Details { .. } => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Uid(_) => None,
            Self::Details { name, .. } if !name.is_empty() => Some(name),
            Self::Details { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub classes: Vec<ClassRef>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Create/update payload for a class.
#[derive(Clone, Debug, Serialize)]
pub struct ClassPayload {
    pub name: String,
    pub code: String,
    pub room: String,
    pub schedule: String,
    /// Instructor uid.
    pub instructor: String,
    #[serde(rename = "numberStudent")]
    pub number_student: u32,
    pub students: Vec<String>,
    pub status: String,
}

// =============================================================
// Students / teachers
// =============================================================

/// A student roster row from `GET /api/students`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "studentId")]
    pub student_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct StudentsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub students: Vec<StudentRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StudentPayload {
    pub user_id: String,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub class_id: String,
    /// Data-URL encoded enrollment photo, empty when unchanged.
    pub image_base64: String,
    pub status: String,
}

/// A teacher row from `GET /api/teachers`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TeacherRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default, rename = "displayName")]
    pub display_name: String,
}

impl TeacherRecord {
    /// Display name with the same fallback chain the roster pages use:
    /// displayName, then name, then the uid.
    pub fn display(&self) -> &str {
        if !self.display_name.is_empty() {
            &self.display_name
        } else if !self.name.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }
}

/// `GET /api/teachers/:id/displayName` body.
#[derive(Debug, Deserialize)]
pub struct DisplayNameResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, rename = "displayName")]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct TeachersResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub teachers: Vec<TeacherRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================
// Profile
// =============================================================

/// The backend user record for a uid.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "displayName")]
    pub display_name: String,
    #[serde(default, rename = "photoURL")]
    pub photo_url: String,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, rename = "lastLogin")]
    pub last_login: String,
    /// Institutional ID; both spellings exist in the user collection.
    #[serde(default, rename = "student_id", alias = "studentId")]
    pub student_id: Option<String>,
    #[serde(default)]
    pub classes: Vec<ProfileClass>,
    #[serde(default, rename = "attendanceStats")]
    pub attendance_stats: Option<AttendanceStats>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfileClass {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct AttendanceStats {
    #[serde(default)]
    pub overall: f64,
    #[serde(default)]
    pub present: u32,
    #[serde(default)]
    pub absent: u32,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================
// Registration
// =============================================================

/// `POST /api/register` body. Exactly one of `student_id`/`teacher_id` is
/// sent, keyed by role.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "studentId", skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(rename = "teacherId", skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    pub role: String,
    pub password: String,
}

// =============================================================
// Dashboards (bare snake_case objects, no success wrapper)
// =============================================================

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeacherDashboard {
    #[serde(default)]
    pub total_students: u32,
    #[serde(default)]
    pub present_today: u32,
    #[serde(default)]
    pub absent_today: u32,
    #[serde(default)]
    pub attendance_rate: f64,
    #[serde(default)]
    pub classes: Vec<DashboardClass>,
    #[serde(default)]
    pub recent_attendance: Vec<RecentAttendanceRow>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DashboardClass {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, rename = "totalStudents")]
    pub total_students: u32,
    #[serde(default, rename = "presentToday")]
    pub present_today: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RecentAttendanceRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StudentDashboard {
    #[serde(default)]
    pub total_classes: u32,
    #[serde(default)]
    pub attendance_rate: f64,
    #[serde(default)]
    pub next_class: Option<NextClass>,
    #[serde(default)]
    pub attendance_history: Vec<AttendanceHistoryRow>,
    #[serde(default)]
    pub by_class: Vec<ClassBreakdown>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NextClass {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AttendanceHistoryRow {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "className")]
    pub class_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ClassBreakdown {
    #[serde(default, rename = "className")]
    pub class_name: String,
    #[serde(default)]
    pub attendance_rate: f64,
    #[serde(default)]
    pub present: u32,
    #[serde(default)]
    pub absent: u32,
}

// =============================================================
// Reports
// =============================================================

/// One student's aggregate row from `GET /api/reports/attendance`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReportRow {
    #[serde(default, rename = "studentId")]
    pub student_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub present: u32,
    #[serde(default)]
    pub absent: u32,
    #[serde(default)]
    pub late: u32,
    #[serde(default, rename = "attendanceRate")]
    pub attendance_rate: f64,
}

/// Per-class comparison row from `GET /api/reports/class`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClassReportRow {
    #[serde(default, rename = "class")]
    pub class_name: String,
    #[serde(default, rename = "attendanceRate")]
    pub attendance_rate: f64,
    #[serde(default, rename = "studentCount")]
    pub student_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================
// Attendance submission
// =============================================================

/// `POST /attendance` body.
#[derive(Clone, Debug, Serialize)]
pub struct AttendanceRequest {
    #[serde(rename = "imageBase64")]
    pub image_base64: String,
    #[serde(rename = "studentId")]
    pub student_id: String,
    #[serde(rename = "classId")]
    pub class_id: String,
}

/// Recognition outcome; authoritative, displayed without reinterpretation.
/// `recognized: false` is a soft failure (face not matched), distinct from
/// a request error.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecognitionOutcome {
    pub recognized: bool,
    #[serde(default)]
    pub similarity: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

// =============================================================
// Generic status envelope (create/update/delete acks)
// =============================================================

#[derive(Debug, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
