//! REST API helpers for the attendance backend.
//!
//! Client-side (`csr`): real HTTP calls via `gloo-net`, with the identity
//! provider's ID token attached as a bearer header when present.
//! Native builds (tests): stubs returning an error, since these endpoints
//! are only meaningful in the browser.
//!
//! Base URL comes from `ROLLCALL_API_URL` at compile time, defaulting to
//! the local development backend.

#![allow(clippy::unused_async)]

use super::ApiError;
use super::types::{
    AttendanceRequest, ClassPayload, ClassRef, ClassReportRow, Profile, RecognitionOutcome,
    RegisterRequest, ReportRow, StudentDashboard, StudentPayload, StudentRecord, TeacherDashboard,
    TeacherRecord,
};

#[cfg(feature = "csr")]
use super::types::{
    AckResponse, ClassesResponse, DataResponse, ExportRequest, ExportResponse, ProfileResponse,
    StudentsResponse, TeachersResponse,
};

/// Backend base URL.
pub fn api_base() -> &'static str {
    option_env!("ROLLCALL_API_URL").unwrap_or("http://localhost:5002")
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> ApiError {
    ApiError::Request("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
fn backend_err(error: Option<String>) -> ApiError {
    ApiError::Backend(error.unwrap_or_else(|| "Operation failed".to_owned()))
}

// -------------------------------------------------------------
// Transport helpers (browser only)
// -------------------------------------------------------------

#[cfg(feature = "csr")]
fn authorized(builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    match super::identity::id_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

#[cfg(feature = "csr")]
async fn parse<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        // Error bodies carry `{"error": "..."}` even on non-2xx.
        if let Ok(ack) = resp.json::<AckResponse>().await {
            if let Some(msg) = ack.error {
                return Err(ApiError::Backend(msg));
            }
        }
        return Err(ApiError::Status(status));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))
}

#[cfg(feature = "csr")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = authorized(gloo_net::http::Request::get(url))
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    parse(resp).await
}

#[cfg(feature = "csr")]
async fn send_json<T, B>(
    builder: gloo_net::http::RequestBuilder,
    body: &B,
) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
    B: serde::Serialize,
{
    let resp = authorized(builder)
        .json(body)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    parse(resp).await
}

#[cfg(feature = "csr")]
async fn delete_json(url: &str) -> Result<(), ApiError> {
    let resp = authorized(gloo_net::http::Request::delete(url))
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    let ack: AckResponse = parse(resp).await?;
    if ack.success { Ok(()) } else { Err(backend_err(ack.error)) }
}

// -------------------------------------------------------------
// Classes
// -------------------------------------------------------------

/// Fetch all classes (teacher view).
pub async fn fetch_classes() -> Result<Vec<ClassRef>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp: ClassesResponse = get_json(&format!("{}/api/classes", api_base())).await?;
        if resp.success {
            Ok(resp.classes)
        } else {
            Err(backend_err(resp.error))
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable())
    }
}

/// Fetch only the classes a student is enrolled in.
pub async fn fetch_student_classes(student_id: &str) -> Result<Vec<ClassRef>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = format!("{}/api/classes/student/{student_id}", api_base());
        let resp: ClassesResponse = get_json(&url).await?;
        if resp.success {
            Ok(resp.classes)
        } else {
            Err(backend_err(resp.error))
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = student_id;
        Err(unavailable())
    }
}

pub async fn create_class(payload: &ClassPayload) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = format!("{}/api/classes", api_base());
        let ack: AckResponse = send_json(gloo_net::http::Request::post(&url), payload).await?;
        if ack.success { Ok(()) } else { Err(backend_err(ack.error)) }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = payload;
        Err(unavailable())
    }
}

pub async fn update_class(class_id: &str, payload: &ClassPayload) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = format!("{}/api/classes/{class_id}", api_base());
        let ack: AckResponse = send_json(gloo_net::http::Request::put(&url), payload).await?;
        if ack.success { Ok(()) } else { Err(backend_err(ack.error)) }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (class_id, payload);
        Err(unavailable())
    }
}

pub async fn delete_class(class_id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        delete_json(&format!("{}/api/classes/{class_id}", api_base())).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = class_id;
        Err(unavailable())
    }
}

// -------------------------------------------------------------
// Students / teachers
// -------------------------------------------------------------

pub async fn fetch_students() -> Result<Vec<StudentRecord>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp: StudentsResponse = get_json(&format!("{}/api/students", api_base())).await?;
        if resp.success {
            Ok(resp.students)
        } else {
            Err(backend_err(resp.error))
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable())
    }
}

pub async fn create_student(payload: &StudentPayload) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = format!("{}/api/students", api_base());
        let ack: AckResponse = send_json(gloo_net::http::Request::post(&url), payload).await?;
        if ack.success { Ok(()) } else { Err(backend_err(ack.error)) }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = payload;
        Err(unavailable())
    }
}

pub async fn update_student(student_id: &str, payload: &StudentPayload) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = format!("{}/api/students/{student_id}", api_base());
        let ack: AckResponse = send_json(gloo_net::http::Request::put(&url), payload).await?;
        if ack.success { Ok(()) } else { Err(backend_err(ack.error)) }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (student_id, payload);
        Err(unavailable())
    }
}

pub async fn delete_student(student_id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        delete_json(&format!("{}/api/students/{student_id}", api_base())).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = student_id;
        Err(unavailable())
    }
}

pub async fn fetch_teachers() -> Result<Vec<TeacherRecord>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp: TeachersResponse = get_json(&format!("{}/api/teachers", api_base())).await?;
        if resp.success {
            Ok(resp.teachers)
        } else {
            Err(backend_err(resp.error))
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable())
    }
}

/// Resolve one teacher uid to a display name. `None` covers every miss:
/// unknown uid, backend failure, or an empty name. Used to backfill class
/// rows whose `instructorName` the server left blank.
pub async fn fetch_teacher_display_name(uid: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let url = format!("{}/api/teachers/{uid}/displayName", api_base());
        let resp: super::types::DisplayNameResponse = get_json(&url).await.ok()?;
        if resp.success && !resp.display_name.is_empty() {
            Some(resp.display_name)
        } else {
            None
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = uid;
        None
    }
}

// -------------------------------------------------------------
// Profile / dashboards
// -------------------------------------------------------------

pub async fn fetch_profile(uid: &str) -> Result<Profile, ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = format!("{}/api/profile/{uid}", api_base());
        let resp: ProfileResponse = get_json(&url).await?;
        match (resp.success, resp.profile) {
            (true, Some(profile)) => Ok(profile),
            (_, _) => Err(backend_err(resp.error)),
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = uid;
        Err(unavailable())
    }
}

/// Teacher dashboard aggregate. Bare snake_case body, no success wrapper.
pub async fn fetch_teacher_dashboard() -> Result<TeacherDashboard, ApiError> {
    #[cfg(feature = "csr")]
    {
        get_json(&format!("{}/api/dashboard/teacher", api_base())).await
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable())
    }
}

pub async fn fetch_student_dashboard(uid: &str) -> Result<StudentDashboard, ApiError> {
    #[cfg(feature = "csr")]
    {
        get_json(&format!("{}/api/dashboard/student?uid={uid}", api_base())).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = uid;
        Err(unavailable())
    }
}

// -------------------------------------------------------------
// Reports
// -------------------------------------------------------------

/// Per-student attendance aggregates, optionally restricted to one class.
pub async fn fetch_attendance_report(class_id: Option<&str>) -> Result<Vec<ReportRow>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let mut url = format!("{}/api/reports/attendance", api_base());
        if let Some(class_id) = class_id {
            url.push_str(&format!("?class={class_id}"));
        }
        let resp: DataResponse<ReportRow> = get_json(&url).await?;
        if resp.success {
            Ok(resp.data)
        } else {
            Err(backend_err(resp.error))
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = class_id;
        Err(unavailable())
    }
}

pub async fn fetch_class_report() -> Result<Vec<ClassReportRow>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp: DataResponse<ClassReportRow> =
            get_json(&format!("{}/api/reports/class", api_base())).await?;
        if resp.success {
            Ok(resp.data)
        } else {
            Err(backend_err(resp.error))
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(unavailable())
    }
}

/// Request a PDF/Excel export; resolves to the download URL.
pub async fn export_report(kind: &str) -> Result<String, ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = format!("{}/api/reports/export", api_base());
        let resp: ExportResponse = send_json(
            gloo_net::http::Request::post(&url),
            &ExportRequest { kind: kind.to_owned() },
        )
        .await?;
        match (resp.success, resp.url) {
            (true, Some(url)) => Ok(url),
            (_, _) => Err(backend_err(resp.error)),
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = kind;
        Err(unavailable())
    }
}

// -------------------------------------------------------------
// Registration / attendance submission
// -------------------------------------------------------------

pub async fn register(request: &RegisterRequest) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let url = format!("{}/api/register", api_base());
        // A 2xx response here is success; the body is empty on success and
        // `{"error"}` otherwise, which `parse` already surfaces.
        let _: serde_json::Value = send_json(gloo_net::http::Request::post(&url), request).await?;
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = request;
        Err(unavailable())
    }
}

/// The one recognition call: submit an encoded image for a student+class,
/// get back the authoritative outcome. No automatic retry.
pub async fn submit_attendance(request: &AttendanceRequest) -> Result<RecognitionOutcome, ApiError> {
    #[cfg(feature = "csr")]
    {
        // Note: this endpoint is mounted at the root, not under /api.
        let url = format!("{}/attendance", api_base());
        send_json(gloo_net::http::Request::post(&url), request).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = request;
        Err(unavailable())
    }
}
