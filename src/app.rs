//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::{layout::AppShell, toast::ToastStack};
use crate::pages::{
    attendance::AttendancePage, classes::ClassesPage, dashboard::DashboardPage, login::LoginPage,
    profile::ProfilePage, register::RegisterPage, reports::ReportsPage, students::StudentsPage,
};
use crate::state::{auth::AuthState, toast::ToastState};

/// Root application component.
///
/// Provides shared state contexts, kicks off session restore, and sets up
/// client-side routing. Signed-in routes nest under [`AppShell`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let toasts = RwSignal::new(ToastState::default());

    provide_context(auth);
    provide_context(toasts);

    // Restore a persisted session before any page decides to redirect:
    // `AuthState::loading` stays true until this settles.
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        match crate::net::identity::restore_session().await {
            Some(user) => auth.set(AuthState::signed_in(user)),
            None => auth.set(AuthState::signed_out()),
        }
    });

    view! {
        <Stylesheet id="app" href="/style.css"/>
        <Title text="RollCall"/>

        <ToastStack/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <ParentRoute path=StaticSegment("") view=AppShell>
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("attendance") view=AttendancePage/>
                    <Route path=StaticSegment("classes") view=ClassesPage/>
                    <Route path=StaticSegment("students") view=StudentsPage/>
                    <Route path=StaticSegment("reports") view=ReportsPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
