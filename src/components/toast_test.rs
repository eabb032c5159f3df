use leptos::prelude::*;

use crate::net::ApiError;
use crate::state::toast::{ToastKind, ToastState};

use super::ok_or_notify;

// ==== Fetch error routing ====

#[test]
fn fetch_error_lands_on_the_toast_stack() {
    let toasts = RwSignal::new(ToastState::default());

    let list: Vec<String> = ok_or_notify(toasts, Err(ApiError::Status(500)));

    assert!(list.is_empty());
    toasts.with(|state| {
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].kind, ToastKind::Error);
        assert_eq!(state.items[0].text, "Server returned status 500");
    });
}

#[test]
fn successful_fetch_passes_through() {
    let toasts = RwSignal::new(ToastState::default());

    let list = ok_or_notify(toasts, Ok(vec!["CS101".to_owned()]));

    assert_eq!(list, vec!["CS101".to_owned()]);
    toasts.with(|state| assert!(state.items.is_empty()));
}
