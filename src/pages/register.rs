//! Registration page posting a new account to the backend.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::RegisterRequest;
use crate::state::auth::Role;

/// Validate the form and build the request body; `Err` is the message to
/// show the user.
fn build_request(
    full_name: &str,
    email: &str,
    id_number: &str,
    role: Role,
    password: &str,
    confirm: &str,
) -> Result<RegisterRequest, String> {
    let full_name = full_name.trim();
    let email = email.trim();
    let id_number = id_number.trim();
    if full_name.is_empty() || email.is_empty() || id_number.is_empty() {
        return Err("All fields are required".to_owned());
    }
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_owned());
    }
    if password != confirm {
        return Err("Passwords do not match".to_owned());
    }
    let (student_id, teacher_id) = match role {
        Role::Student => (Some(id_number.to_owned()), None),
        Role::Teacher => (None, Some(id_number.to_owned())),
    };
    Ok(RegisterRequest {
        full_name: full_name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        role: role.as_str().to_owned(),
        student_id,
        teacher_id,
    })
}

/// Registration page; a successful submit navigates to `/login`.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let navigate = use_navigate();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let id_number = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student);
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let busy = RwSignal::new(false);

    let id_label = move || match role.get() {
        Role::Student => "Student ID",
        Role::Teacher => "Teacher ID",
    };

    let submit = Callback::new(move |()| {
        let request = match build_request(
            &full_name.get(),
            &email.get(),
            &id_number.get(),
            role.get(),
            &password.get(),
            &confirm.get(),
        ) {
            Ok(request) => request,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        if busy.get() {
            return;
        }

        #[cfg(feature = "csr")]
        {
            let navigate = navigate.clone();
            busy.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                match crate::net::api::register(&request).await {
                    Ok(()) => navigate("/login", NavigateOptions::default()),
                    Err(err) => {
                        error.set(Some(err.to_string()));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, &navigate);
        }
    });

    let text_field = move |label: &'static str,
                           kind: &'static str,
                           signal: RwSignal<String>| {
        view! {
            <label class="auth-card__label">
                {label}
                <input
                    type=kind
                    prop:value=move || signal.get()
                    on:input=move |ev| signal.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create Account"</h1>

                {move || error.get().map(|msg| view! { <p class="auth-card__error">{msg}</p> })}

                {text_field("Full Name", "text", full_name)}
                {text_field("Email", "email", email)}

                <label class="auth-card__label">
                    "Role"
                    <select on:change=move |ev| {
                        role.set(Role::parse(&event_target_value(&ev)));
                    }>
                        <option value="student">"Student"</option>
                        <option value="teacher">"Teacher"</option>
                    </select>
                </label>

                <label class="auth-card__label">
                    {id_label}
                    <input
                        type="text"
                        prop:value=move || id_number.get()
                        on:input=move |ev| id_number.set(event_target_value(&ev))
                    />
                </label>

                {text_field("Password", "password", password)}
                {text_field("Confirm Password", "password", confirm)}

                <button
                    class="btn btn--primary auth-card__submit"
                    disabled=move || busy.get()
                    on:click=move |_| submit.run(())
                >
                    {move || if busy.get() { "Creating..." } else { "Register" }}
                </button>

                <p class="auth-card__switch">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
