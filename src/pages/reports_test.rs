use super::summarize;
use crate::net::types::ReportRow;

fn row(present: u32, absent: u32, rate: f64) -> ReportRow {
    ReportRow {
        student_id: "S1".to_owned(),
        name: "Ann".to_owned(),
        present,
        absent,
        late: 0,
        attendance_rate: rate,
    }
}

#[test]
fn empty_report_summarizes_to_zero() {
    assert_eq!(summarize(&[]), (0.0, 0, 0));
}

#[test]
fn totals_and_average_over_rows() {
    let rows = vec![row(8, 2, 80.0), row(9, 1, 90.0), row(10, 0, 100.0)];
    let (average, present, absent) = summarize(&rows);
    assert!((average - 90.0).abs() < 1e-9);
    assert_eq!(present, 27);
    assert_eq!(absent, 3);
}
