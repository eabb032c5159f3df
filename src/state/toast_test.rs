use super::*;

// =============================================================
// Push / dismiss
// =============================================================

#[test]
fn push_returns_increasing_ids() {
    let mut toasts = ToastState::default();
    let a = toasts.push(ToastKind::Info, "one");
    let b = toasts.push(ToastKind::Error, "two");
    assert!(b > a);
    assert_eq!(toasts.items.len(), 2);
}

#[test]
fn dismiss_removes_only_the_matching_toast() {
    let mut toasts = ToastState::default();
    let a = toasts.push(ToastKind::Success, "kept?");
    let b = toasts.push(ToastKind::Error, "gone");
    toasts.dismiss(b);
    assert_eq!(toasts.items.len(), 1);
    assert_eq!(toasts.items[0].id, a);
}

#[test]
fn dismiss_unknown_id_is_a_no_op() {
    let mut toasts = ToastState::default();
    toasts.push(ToastKind::Info, "stays");
    toasts.dismiss(99);
    assert_eq!(toasts.items.len(), 1);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut toasts = ToastState::default();
    let a = toasts.push(ToastKind::Info, "one");
    toasts.dismiss(a);
    let b = toasts.push(ToastKind::Info, "two");
    assert_ne!(a, b);
}

// =============================================================
// Kind -> CSS class
// =============================================================

#[test]
fn kind_class_suffixes_are_distinct() {
    assert_eq!(ToastKind::Success.class_suffix(), "success");
    assert_eq!(ToastKind::Info.class_suffix(), "info");
    assert_eq!(ToastKind::Error.class_suffix(), "error");
}
