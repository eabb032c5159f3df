use super::splash_detail;
use crate::net::types::ClassRef;
use crate::state::wizard::{RecognitionRow, WizardState};

fn class(id: &str, name: &str, code: &str) -> ClassRef {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "code": code,
    }))
    .unwrap()
}

fn recognized_wizard(class_id: &str, similarity: f64) -> WizardState {
    let mut w = WizardState::default();
    w.rows.push(RecognitionRow {
        student_id: "SV001".to_owned(),
        class_id: class_id.to_owned(),
        recognized: true,
        similarity,
        image_url: None,
        manual: false,
    });
    w.submitted = true;
    w
}

// ==== Success splash detail line ====

#[test]
fn splash_names_the_class_and_match_rate() {
    let w = recognized_wizard("c-1", 0.92);
    let classes = vec![class("c-1", "Algorithms", "CS101")];
    assert_eq!(splash_detail(&w, &classes), "Algorithms (CS101) \u{00b7} match 92.0%");
}

#[test]
fn splash_falls_back_to_the_class_id_until_classes_load() {
    let w = recognized_wizard("c-1", 0.92);
    assert_eq!(splash_detail(&w, &[]), "c-1 \u{00b7} match 92.0%");
}

#[test]
fn splash_is_empty_without_a_recognized_row() {
    let mut w = WizardState::default();
    w.record_manual("SV001".to_owned(), "c-1".to_owned());
    w.submitted = true;
    assert_eq!(splash_detail(&w, &[]), "");
}
