use super::*;

// =============================================================
// Envelope handling
// =============================================================

#[test]
fn classes_envelope_success_false_parses_with_empty_list() {
    let body = r#"{"success": false, "error": "boom"}"#;
    let resp: ClassesResponse = serde_json::from_str(body).unwrap();
    assert!(!resp.success);
    assert!(resp.classes.is_empty());
    assert_eq!(resp.error.as_deref(), Some("boom"));
}

#[test]
fn classes_envelope_parses_rows() {
    let body = r#"{
        "success": true,
        "classes": [{
            "id": "CS101",
            "name": "Web Development",
            "code": "CS101",
            "room": "A1",
            "schedule": "Mon, Wed 10:00 AM - 11:30 AM",
            "instructor": "u-teacher",
            "instructorName": "Dr. Chau",
            "totalStudents": 32,
            "status": "active"
        }]
    }"#;
    let resp: ClassesResponse = serde_json::from_str(body).unwrap();
    assert!(resp.success);
    let class = &resp.classes[0];
    assert_eq!(class.label(), "Web Development (CS101)");
    assert_eq!(class.instructor_uid(), Some("u-teacher"));
    assert_eq!(class.instructor_name, "Dr. Chau");
    assert_eq!(class.total_students, 32);
}

#[test]
fn class_missing_fields_fall_back_to_defaults() {
    let body = r#"{"id": "x"}"#;
    let class: ClassRef = serde_json::from_str(body).unwrap();
    assert_eq!(class.status, "active");
    assert!(class.schedule.is_empty());
    assert!(class.instructor.is_none());
    assert_eq!(class.total_students, 0);
}

#[test]
fn legacy_object_schedule_is_dropped_not_fatal() {
    let body = r#"{"id": "x", "schedule": {}}"#;
    let class: ClassRef = serde_json::from_str(body).unwrap();
    assert!(class.schedule.is_empty());
}

// =============================================================
// Instructor drift
// =============================================================

#[test]
fn instructor_uid_string_variant() {
    let i: InstructorRef = serde_json::from_str(r#""u-1""#).unwrap();
    assert_eq!(i.uid(), Some("u-1"));
    assert_eq!(i.name(), None);
}

#[test]
fn instructor_embedded_object_variant() {
    let i: InstructorRef = serde_json::from_str(r#"{"id": "u-1", "name": "Dr. Chau"}"#).unwrap();
    assert_eq!(i.uid(), Some("u-1"));
    assert_eq!(i.name(), Some("Dr. Chau"));
}

#[test]
fn instructor_empty_object_yields_nothing() {
    let i: InstructorRef = serde_json::from_str("{}").unwrap();
    assert_eq!(i.uid(), None);
    assert_eq!(i.name(), None);
}

// =============================================================
// Teacher display fallback
// =============================================================

#[test]
fn teacher_display_prefers_display_name_then_name_then_id() {
    let t: TeacherRecord =
        serde_json::from_str(r#"{"id": "u-1", "name": "N", "displayName": "D"}"#).unwrap();
    assert_eq!(t.display(), "D");

    let t: TeacherRecord = serde_json::from_str(r#"{"id": "u-1", "name": "N"}"#).unwrap();
    assert_eq!(t.display(), "N");

    let t: TeacherRecord = serde_json::from_str(r#"{"id": "u-1"}"#).unwrap();
    assert_eq!(t.display(), "u-1");
}

#[test]
fn display_name_response_parses_camel_case() {
    let r: DisplayNameResponse =
        serde_json::from_str(r#"{"success": true, "displayName": "Dr. Chen"}"#).unwrap();
    assert!(r.success);
    assert_eq!(r.display_name, "Dr. Chen");
}

#[test]
fn display_name_response_defaults_on_missing_name() {
    let r: DisplayNameResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
    assert!(r.display_name.is_empty());
}

// =============================================================
// Profile
// =============================================================

#[test]
fn profile_accepts_both_student_id_spellings() {
    let p: Profile = serde_json::from_str(r#"{"student_id": "SV001"}"#).unwrap();
    assert_eq!(p.student_id.as_deref(), Some("SV001"));

    let p: Profile = serde_json::from_str(r#"{"studentId": "SV001"}"#).unwrap();
    assert_eq!(p.student_id.as_deref(), Some("SV001"));
}

#[test]
fn profile_renamed_fields_parse() {
    let body = r#"{
        "displayName": "Alice",
        "photoURL": "http://x/a.jpg",
        "lastLogin": "2024-01-01",
        "attendanceStats": {"overall": 91.5, "present": 40, "absent": 4}
    }"#;
    let p: Profile = serde_json::from_str(body).unwrap();
    assert_eq!(p.display_name, "Alice");
    assert_eq!(p.photo_url, "http://x/a.jpg");
    assert_eq!(p.last_login, "2024-01-01");
    let stats = p.attendance_stats.unwrap();
    assert_eq!(stats.present, 40);
}

// =============================================================
// Dashboards
// =============================================================

#[test]
fn teacher_dashboard_uses_snake_case_contract() {
    let body = r#"{
        "total_students": 120,
        "present_today": 100,
        "absent_today": 20,
        "attendance_rate": 83.3,
        "classes": [{"id": "c1", "name": "Web", "code": "CS101",
                     "totalStudents": 30, "presentToday": 28}],
        "recent_attendance": [{"id": "a1", "name": "Alice", "class": "Web",
                               "time": "09:00", "status": "present"}]
    }"#;
    let d: TeacherDashboard = serde_json::from_str(body).unwrap();
    assert_eq!(d.total_students, 120);
    assert_eq!(d.classes[0].present_today, 28);
    assert_eq!(d.recent_attendance[0].class_name, "Web");
}

#[test]
fn student_dashboard_parses_breakdown() {
    let body = r#"{
        "total_classes": 4,
        "attendance_rate": 88.0,
        "next_class": {"name": "Web", "time": "10:00"},
        "attendance_history": [{"className": "Web", "date": "2024-01-01", "status": "present"}],
        "by_class": [{"className": "Web", "attendance_rate": 90.0, "present": 9, "absent": 1}]
    }"#;
    let d: StudentDashboard = serde_json::from_str(body).unwrap();
    assert_eq!(d.total_classes, 4);
    assert_eq!(d.next_class.unwrap().name, "Web");
    assert_eq!(d.by_class[0].present, 9);
}

#[test]
fn student_dashboard_next_class_may_be_null() {
    let d: StudentDashboard = serde_json::from_str(r#"{"next_class": null}"#).unwrap();
    assert!(d.next_class.is_none());
}

// =============================================================
// Reports
// =============================================================

#[test]
fn report_rows_use_camel_case_contract() {
    let body = r#"{"success": true, "data": [
        {"studentId": "SV001", "name": "Alice", "present": 18, "absent": 2,
         "late": 1, "attendanceRate": 85.71}
    ]}"#;
    let resp: DataResponse<ReportRow> = serde_json::from_str(body).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data[0].student_id, "SV001");
    assert_eq!(resp.data[0].attendance_rate, 85.71);
}

#[test]
fn class_report_row_parses_reserved_word_key() {
    let body = r#"{"class": "Web Development", "attendanceRate": 92.1, "studentCount": 30}"#;
    let row: ClassReportRow = serde_json::from_str(body).unwrap();
    assert_eq!(row.class_name, "Web Development");
    assert_eq!(row.student_count, 30);
}

// =============================================================
// Requests
// =============================================================

#[test]
fn register_request_keys_student_id_by_role() {
    let req = RegisterRequest {
        full_name: "Alice".to_owned(),
        email: "a@x.y".to_owned(),
        student_id: Some("SV001".to_owned()),
        teacher_id: None,
        role: "student".to_owned(),
        password: "secret".to_owned(),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["fullName"], "Alice");
    assert_eq!(json["studentId"], "SV001");
    assert!(json.get("teacherId").is_none());
}

#[test]
fn attendance_request_uses_camel_case_keys() {
    let req = AttendanceRequest {
        image_base64: "data:image/jpeg;base64,xyz".to_owned(),
        student_id: "SV001".to_owned(),
        class_id: "CS101".to_owned(),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["imageBase64"], "data:image/jpeg;base64,xyz");
    assert_eq!(json["studentId"], "SV001");
    assert_eq!(json["classId"], "CS101");
}

#[test]
fn export_request_serializes_type_key() {
    let json = serde_json::to_value(ExportRequest { kind: "pdf".to_owned() }).unwrap();
    assert_eq!(json["type"], "pdf");
}

// =============================================================
// Recognition outcome
// =============================================================

#[test]
fn recognition_outcome_full_response() {
    let o: RecognitionOutcome =
        serde_json::from_str(r#"{"recognized": true, "similarity": 0.92, "image_url": "x"}"#)
            .unwrap();
    assert!(o.recognized);
    assert_eq!(o.similarity, 0.92);
    assert_eq!(o.image_url.as_deref(), Some("x"));
}

#[test]
fn recognition_outcome_soft_failure_defaults() {
    let o: RecognitionOutcome = serde_json::from_str(r#"{"recognized": false}"#).unwrap();
    assert!(!o.recognized);
    assert_eq!(o.similarity, 0.0);
    assert!(o.image_url.is_none());
}
