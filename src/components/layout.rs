//! Authenticated application shell: top navigation plus the routed page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::{A, Outlet};
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Layout wrapping every signed-in page.
///
/// Owns the redirect-to-login check so individual pages don't repeat it:
/// once session restore settles with no user, any route under the shell
/// bounces to `/login`.
#[component]
pub fn AppShell() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new({
        let navigate = navigate.clone();
        move || {
            let state = auth.get();
            if !state.loading && state.user.is_none() {
                navigate("/login", NavigateOptions::default());
            }
        }
    });

    let is_teacher = move || auth.get().is_teacher();
    let display_name = move || {
        auth.get()
            .user
            .map(|u| u.display_name)
            .unwrap_or_default()
    };

    let on_sign_out = move |_| {
        crate::net::identity::sign_out();
        auth.set(AuthState::signed_out());
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <div class="app-shell">
            <nav class="app-nav">
                <span class="app-nav__brand">"RollCall"</span>
                <A href="/">"Dashboard"</A>
                <A href="/attendance">"Attendance"</A>
                <A href="/classes">"Classes"</A>
                <Show when=is_teacher>
                    <A href="/students">"Students"</A>
                    <A href="/reports">"Reports"</A>
                </Show>
                <span class="app-nav__spacer"></span>
                <A href="/profile">{display_name}</A>
                <button class="btn app-nav__signout" on:click=on_sign_out>
                    "Sign Out"
                </button>
            </nav>
            <main class="app-main">
                <Outlet/>
            </main>
        </div>
    }
}
