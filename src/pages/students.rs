//! Students page: roster management for teachers.

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::components::toast::{notify, ok_or_notify};
use crate::net::api;
use crate::net::types::{ClassRef, StudentPayload, StudentRecord};
use crate::state::toast::{ToastKind, ToastState};
use crate::util::browser::confirm;
use crate::util::format::{matches_filter, status_color};

enum DialogState {
    Closed,
    Create,
    Edit(StudentRecord),
}

/// Roster page. Teacher-only (the nav hides it for students, and the
/// backend rejects unauthorized mutation anyway).
#[component]
pub fn StudentsPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let search = RwSignal::new(String::new());
    let dialog = RwSignal::new(DialogState::Closed);
    let close_dialog = Callback::new(move |()| dialog.set(DialogState::Closed));

    let students = LocalResource::new(move || async move {
        ok_or_notify(toasts, api::fetch_students().await)
    });

    let classes = LocalResource::new(move || async move {
        ok_or_notify(toasts, api::fetch_classes().await)
    });

    let delete = move |student_id: String| {
        if !confirm("Remove this student? Their attendance history is kept.") {
            return;
        }
        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                match api::delete_student(&student_id).await {
                    Ok(()) => {
                        notify(toasts, ToastKind::Success, "Student removed");
                        students.refetch();
                    }
                    Err(err) => notify(toasts, ToastKind::Error, err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = student_id;
        }
    };

    // Export and bulk import are backend features that never shipped; keep
    // the buttons visible and explain instead of failing a request.
    let not_available = move |what: &'static str| {
        notify(toasts, ToastKind::Info, format!("{what} is not available yet"));
    };

    let filtered = move || {
        let needle = search.get();
        students
            .get()
            .unwrap_or_default()
            .into_iter()
            .filter(|s| matches_filter(&needle, &[&s.name, &s.student_id, &s.email]))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="students-page">
            <header class="page-header">
                <h1>"Students"</h1>
                <input
                    class="page-header__search"
                    type="search"
                    placeholder="Search students..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <button class="btn" on:click=move |_| not_available("Bulk import")>
                    "Import"
                </button>
                <button class="btn" on:click=move |_| not_available("Roster export")>
                    "Export"
                </button>
                <button
                    class="btn btn--primary"
                    on:click=move |_| dialog.set(DialogState::Create)
                >
                    "+ Add Student"
                </button>
            </header>

            <Suspense fallback=move || view! { <p>"Loading students..."</p> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th></th>
                            <th>"Name"</th>
                            <th>"Student ID"</th>
                            <th>"Email"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            filtered()
                                .into_iter()
                                .map(|s| {
                                    let color = status_color(&s.status);
                                    let edit_target = s.clone();
                                    let delete_id = s.id.clone();
                                    let avatar = if s.avatar_url.is_empty() {
                                        view! { <span class="avatar avatar--placeholder"></span> }
                                            .into_any()
                                    } else {
                                        view! { <img class="avatar" src=s.avatar_url.clone() alt=""/> }
                                            .into_any()
                                    };
                                    view! {
                                        <tr>
                                            <td>{avatar}</td>
                                            <td>{s.name.clone()}</td>
                                            <td>{s.student_id.clone()}</td>
                                            <td>{s.email.clone()}</td>
                                            <td style=format!("color: {color}")>{s.status.clone()}</td>
                                            <td class="data-table__actions">
                                                <button
                                                    class="btn btn--small"
                                                    on:click=move |_| {
                                                        dialog.set(DialogState::Edit(edit_target.clone()));
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    class="btn btn--small btn--danger"
                                                    on:click=move |_| delete(delete_id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </tbody>
                </table>
            </Suspense>

            {move || {
                dialog.with(|state| match state {
                    DialogState::Closed => None,
                    DialogState::Create => Some(
                        view! {
                            <StudentDialog
                                existing=None
                                classes=classes
                                students=students
                                on_close=close_dialog
                            />
                        },
                    ),
                    DialogState::Edit(record) => Some(
                        view! {
                            <StudentDialog
                                existing=Some(record.clone())
                                classes=classes
                                students=students
                                on_close=close_dialog
                            />
                        },
                    ),
                })
            }}
        </div>
    }
}

/// Create/edit form for one student, with an optional enrollment photo.
/// The photo goes up as a data URL in the same shape the check-in flow
/// uses.
#[component]
fn StudentDialog(
    existing: Option<StudentRecord>,
    classes: LocalResource<Vec<ClassRef>>,
    students: LocalResource<Vec<StudentRecord>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let editing_id = existing.as_ref().map(|s| s.id.clone());

    let name = RwSignal::new(existing.as_ref().map(|s| s.name.clone()).unwrap_or_default());
    let student_id =
        RwSignal::new(existing.as_ref().map(|s| s.student_id.clone()).unwrap_or_default());
    let email = RwSignal::new(existing.as_ref().map(|s| s.email.clone()).unwrap_or_default());
    let class_id = RwSignal::new(String::new());
    let status = RwSignal::new(
        existing.as_ref().map(|s| s.status.clone()).unwrap_or_else(|| "active".to_owned()),
    );
    // Newly selected photo, as a data URL; empty means "leave unchanged".
    let photo = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let title = if editing_id.is_some() { "Edit Student" } else { "Add Student" };

    let on_photo_picked = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let Some(file) = crate::capture::picked_file(&ev) else { return };
            leptos::task::spawn_local(async move {
                match crate::capture::load_from_file(file).await {
                    Ok(image) => photo.set(image.data_url),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ev;
        }
    };

    let save = move |_| {
        let payload = StudentPayload {
            user_id: editing_id.clone().unwrap_or_default(),
            student_id: student_id.get().trim().to_owned(),
            name: name.get().trim().to_owned(),
            email: email.get().trim().to_owned(),
            class_id: class_id.get(),
            image_base64: photo.get(),
            status: status.get(),
        };
        if payload.name.is_empty() || payload.student_id.is_empty() {
            error.set(Some("Name and student ID are required".to_owned()));
            return;
        }

        #[cfg(feature = "csr")]
        {
            let editing_id = editing_id.clone();
            leptos::task::spawn_local(async move {
                let result = match &editing_id {
                    Some(id) => api::update_student(id, &payload).await,
                    None => api::create_student(&payload).await,
                };
                match result {
                    Ok(()) => {
                        let saved =
                            if editing_id.is_some() { "Student updated" } else { "Student added" };
                        notify(toasts, ToastKind::Success, saved);
                        students.refetch();
                        on_close.run(());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = payload;
        }
    };

    let text_field = move |label: &'static str, kind: &'static str, signal: RwSignal<String>| {
        view! {
            <label class="dialog__label">
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
        <Modal title=title on_close=on_close>
            {move || error.get().map(|msg| view! { <p class="dialog__error">{msg}</p> })}

            {text_field("Name", "text", name)}
            {text_field("Student ID", "text", student_id)}
            {text_field("Email", "email", email)}

            <label class="dialog__label">
                "Class"
                <select on:change=move |ev| class_id.set(event_target_value(&ev))>
                    <option value="">"No class"</option>
                    {move || {
                        classes
                            .get()
                            .map(|list| {
                                list.into_iter()
                                    .map(|c| {
                                        let label = c.label();
                                        view! { <option value=c.id>{label}</option> }
                                    })
                                    .collect::<Vec<_>>()
                            })
                    }}
                </select>
            </label>

            <label class="dialog__label">
                "Status"
                <select
                    prop:value=move || status.get()
                    on:change=move |ev| status.set(event_target_value(&ev))
                >
                    <option value="active">"Active"</option>
                    <option value="inactive">"Inactive"</option>
                </select>
            </label>

            <label class="dialog__label">
                "Photo"
                <input type="file" accept="image/*" on:change=on_photo_picked/>
            </label>
            <Show when=move || !photo.get().is_empty()>
                <img class="dialog__photo-preview" src=move || photo.get() alt="Selected photo"/>
            </Show>

            <div class="dialog__actions">
                <button class="btn" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
                <button class="btn btn--primary" on:click=save>
                    "Save"
                </button>
            </div>
        </Modal>
    }
}
