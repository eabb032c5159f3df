//! Login page: email/password sign-in against the identity provider.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Login page. A successful sign-in lands on the dashboard; a signed-in
/// user visiting here is bounced straight there.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new({
        let navigate = navigate.clone();
        move || {
            let state = auth.get();
            if !state.loading && state.user.is_some() {
                navigate("/", NavigateOptions::default());
            }
        }
    });

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        let email_val = email.get().trim().to_owned();
        let password_val = password.get();
        if email_val.is_empty() || password_val.is_empty() {
            error.set(Some("Email and password are required".to_owned()));
            return;
        }
        if busy.get() {
            return;
        }

        #[cfg(feature = "csr")]
        {
            busy.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                match crate::net::identity::sign_in_user(&email_val, &password_val).await {
                    Ok(user) => auth.set(AuthState::signed_in(user)),
                    Err(err) => {
                        error.set(Some(err.to_string()));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email_val, password_val);
        }
    });

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"RollCall"</h1>
                <p class="auth-card__tagline">"Photo-based attendance"</p>

                {move || error.get().map(|msg| view! { <p class="auth-card__error">{msg}</p> })}

                <label class="auth-card__label">
                    "Email"
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="auth-card__label">
                    "Password"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>

                <button
                    class="btn btn--primary auth-card__submit"
                    disabled=move || busy.get()
                    on:click=move |_| submit.run(())
                >
                    {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                </button>

                <p class="auth-card__switch">
                    "No account yet? "
                    <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
