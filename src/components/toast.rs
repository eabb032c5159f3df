//! Transient notification stack.
//!
//! Toasts live in the [`ToastState`] context; [`notify`] pushes one and
//! schedules its removal, and [`ToastStack`] renders whatever is pending.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;

use crate::net::ApiError;
use crate::state::toast::{ToastKind, ToastState};

/// How long a toast stays up before auto-dismissing.
#[cfg(feature = "csr")]
const TOAST_MS: u32 = 4000;

/// Push a toast and schedule its dismissal.
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, text: impl Into<String>) {
    let id = toasts.try_update(|t| t.push(kind, text.into()));
    let Some(id) = id else { return };

    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            // The signal may be gone if the app unmounted underneath us.
            let _ = toasts.try_update(|t| t.dismiss(id));
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
    }
}

/// Unwrap a fetch result, routing any failure to the toast stack and
/// falling back to the empty value. Every list/dashboard resource goes
/// through here so no fetch silently swallows its error.
pub fn ok_or_notify<T: Default>(toasts: RwSignal<ToastState>, result: Result<T, ApiError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            notify(toasts, ToastKind::Error, err.to_string());
            T::default()
        }
    }
}

/// Fixed-position stack of pending toasts. Clicking one dismisses it early.
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = format!("toast toast--{}", toast.kind.class_suffix());
                    view! {
                        <div class=class on:click=move |_| {
                            toasts.update(|t| t.dismiss(id));
                        }>
                            {toast.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
