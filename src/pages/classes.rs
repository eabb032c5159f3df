//! Classes page: searchable list, with create/edit/delete for teachers.

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::components::toast::{notify, ok_or_notify};
use crate::net::api;
use crate::net::types::{ClassPayload, ClassRef, TeacherRecord};
use crate::state::auth::{AuthState, Role};
use crate::state::toast::{ToastKind, ToastState};
use crate::util::browser::confirm;
use crate::util::format::{matches_filter, status_color};

/// Schedule slots offered by the class editor.
const SCHEDULE_OPTIONS: &[&str] = &[
    "Mon/Wed 08:00-09:30",
    "Mon/Wed 10:00-11:30",
    "Tue/Thu 08:00-09:30",
    "Tue/Thu 13:00-14:30",
    "Fri 09:00-12:00",
];

enum DialogState {
    Closed,
    Create,
    Edit(ClassRef),
}

/// Class list page. Students see the classes they are enrolled in;
/// teachers see everything and can manage the roster of classes.
#[component]
pub fn ClassesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let search = RwSignal::new(String::new());
    let dialog = RwSignal::new(DialogState::Closed);
    let close_dialog = Callback::new(move |()| dialog.set(DialogState::Closed));

    let classes = LocalResource::new(move || {
        let state = auth.get();
        async move {
            let result = match &state.user {
                Some(user) if user.role == Role::Student => match &user.student_id {
                    Some(sid) => api::fetch_student_classes(sid).await,
                    None => Ok(Vec::new()),
                },
                Some(_) => api::fetch_classes().await,
                None => Ok(Vec::new()),
            };
            let mut list = ok_or_notify(toasts, result);
            backfill_instructor_names(&mut list).await;
            list
        }
    });

    // Instructor picker choices; also used to resolve display names for
    // classes that only carry an instructor uid.
    let teachers = LocalResource::new(move || {
        let teacher = auth.get().is_teacher();
        async move {
            if !teacher {
                return Vec::new();
            }
            ok_or_notify(toasts, api::fetch_teachers().await)
        }
    });

    let is_teacher = move || auth.get().is_teacher();

    let delete = move |class_id: String| {
        if !confirm("Delete this class? This cannot be undone.") {
            return;
        }
        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                match api::delete_class(&class_id).await {
                    Ok(()) => {
                        notify(toasts, ToastKind::Success, "Class deleted");
                        classes.refetch();
                    }
                    Err(err) => notify(toasts, ToastKind::Error, err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = class_id;
        }
    };

    let filtered = move || {
        let needle = search.get();
        classes
            .get()
            .unwrap_or_default()
            .into_iter()
            .filter(|c| {
                matches_filter(&needle, &[&c.name, &c.code, &c.room, &c.instructor_name])
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="classes-page">
            <header class="page-header">
                <h1>"Classes"</h1>
                <input
                    class="page-header__search"
                    type="search"
                    placeholder="Search classes..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <Show when=is_teacher>
                    <button
                        class="btn btn--primary"
                        on:click=move |_| dialog.set(DialogState::Create)
                    >
                        "+ New Class"
                    </button>
                </Show>
            </header>

            <Suspense fallback=move || view! { <p>"Loading classes..."</p> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Code"</th>
                            <th>"Schedule"</th>
                            <th>"Room"</th>
                            <th>"Instructor"</th>
                            <th>"Students"</th>
                            <th>"Status"</th>
                            <Show when=is_teacher>
                                <th></th>
                            </Show>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let teacher_list = teachers.get().unwrap_or_default();
                            filtered()
                                .into_iter()
                                .map(|c| {
                                    let instructor = instructor_display(&c, &teacher_list);
                                    let color = status_color(&c.status);
                                    let edit_target = c.clone();
                                    let delete_id = c.id.clone();
                                    view! {
                                        <tr>
                                            <td>{c.name.clone()}</td>
                                            <td>{c.code.clone()}</td>
                                            <td>{c.schedule.clone()}</td>
                                            <td>{c.room.clone()}</td>
                                            <td>{instructor}</td>
                                            <td>{roster_size(&c)}</td>
                                            <td style=format!("color: {color}")>{c.status.clone()}</td>
                                            <Show when=is_teacher>
                                                {
                                                    let edit_target = edit_target.clone();
                                                    let delete_id = delete_id.clone();
                                                    view! {
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
                                                    }
                                                }
                                            </Show>
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
                            <ClassDialog
                                existing=None
                                teachers=teachers
                                classes=classes
                                on_close=close_dialog
                            />
                        },
                    ),
                    DialogState::Edit(class) => Some(
                        view! {
                            <ClassDialog
                                existing=Some(class.clone())
                                teachers=teachers
                                classes=classes
                                on_close=close_dialog
                            />
                        },
                    ),
                })
            }}
        </div>
    }
}

/// Fill in missing instructor names by looking each uid up against the
/// display-name endpoint. Classes that already carry a name are left alone;
/// lookups that fail fall through to the uid shown by `instructor_display`.
async fn backfill_instructor_names(classes: &mut [ClassRef]) {
    for class in classes.iter_mut() {
        if !class.instructor_name.is_empty() {
            continue;
        }
        let Some(uid) = class.instructor_uid().map(str::to_owned) else {
            continue;
        };
        if let Some(name) = api::fetch_teacher_display_name(&uid).await {
            class.instructor_name = name;
        }
    }
}

/// Prefer the server-resolved name, then an embedded instructor record,
/// then a lookup against the teachers list by uid.
fn instructor_display(class: &ClassRef, teachers: &[TeacherRecord]) -> String {
    if !class.instructor_name.is_empty() {
        return class.instructor_name.clone();
    }
    if let Some(name) = class.instructor.as_ref().and_then(|i| i.name()) {
        return name.to_owned();
    }
    if let Some(uid) = class.instructor_uid() {
        if let Some(teacher) = teachers.iter().find(|t| t.id == uid) {
            return teacher.display().to_owned();
        }
        return uid.to_owned();
    }
    "\u{2014}".to_owned()
}

/// Roster size: the explicit count when set, otherwise the member list.
fn roster_size(class: &ClassRef) -> u32 {
    if class.total_students > 0 {
        class.total_students
    } else {
        u32::try_from(class.students.len()).unwrap_or(u32::MAX)
    }
}

/// Create/edit form for one class.
#[component]
fn ClassDialog(
    existing: Option<ClassRef>,
    teachers: LocalResource<Vec<TeacherRecord>>,
    classes: LocalResource<Vec<ClassRef>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let editing_id = existing.as_ref().map(|c| c.id.clone());
    let members = existing.as_ref().map(|c| c.students.clone()).unwrap_or_default();

    let name = RwSignal::new(existing.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let code = RwSignal::new(existing.as_ref().map(|c| c.code.clone()).unwrap_or_default());
    let room = RwSignal::new(existing.as_ref().map(|c| c.room.clone()).unwrap_or_default());
    let schedule = RwSignal::new(
        existing
            .as_ref()
            .map(|c| c.schedule.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| SCHEDULE_OPTIONS[0].to_owned()),
    );
    let instructor = RwSignal::new(
        existing
            .as_ref()
            .and_then(|c| c.instructor_uid().map(ToOwned::to_owned))
            .unwrap_or_default(),
    );
    let status = RwSignal::new(
        existing.as_ref().map(|c| c.status.clone()).unwrap_or_else(|| "active".to_owned()),
    );
    let error = RwSignal::new(Option::<String>::None);

    let title = if editing_id.is_some() { "Edit Class" } else { "New Class" };

    let save = move |_| {
        let payload = ClassPayload {
            name: name.get().trim().to_owned(),
            code: code.get().trim().to_owned(),
            room: room.get().trim().to_owned(),
            schedule: schedule.get(),
            instructor: instructor.get(),
            number_student: u32::try_from(members.len()).unwrap_or(u32::MAX),
            students: members.clone(),
            status: status.get(),
        };
        if payload.name.is_empty() || payload.code.is_empty() {
            error.set(Some("Name and code are required".to_owned()));
            return;
        }

        #[cfg(feature = "csr")]
        {
            let editing_id = editing_id.clone();
            leptos::task::spawn_local(async move {
                let result = match &editing_id {
                    Some(id) => api::update_class(id, &payload).await,
                    None => api::create_class(&payload).await,
                };
                match result {
                    Ok(()) => {
                        let saved = if editing_id.is_some() { "Class updated" } else { "Class created" };
                        notify(toasts, ToastKind::Success, saved);
                        classes.refetch();
                        on_close.run(());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (payload, &editing_id);
        }
    };

    let text_field = move |label: &'static str, signal: RwSignal<String>| {
        view! {
            <label class="dialog__label">
                {label}
                <input
                    type="text"
                    prop:value=move || signal.get()
                    on:input=move |ev| signal.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <Modal title=title on_close=on_close>
            {move || error.get().map(|msg| view! { <p class="dialog__error">{msg}</p> })}

            {text_field("Name", name)}
            {text_field("Code", code)}
            {text_field("Room", room)}

            <label class="dialog__label">
                "Schedule"
                <select
                    prop:value=move || schedule.get()
                    on:change=move |ev| schedule.set(event_target_value(&ev))
                >
                    {SCHEDULE_OPTIONS
                        .iter()
                        .map(|opt| view! { <option value=*opt>{*opt}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </label>

            <label class="dialog__label">
                "Instructor"
                <select
                    prop:value=move || instructor.get()
                    on:change=move |ev| instructor.set(event_target_value(&ev))
                >
                    <option value="">"Unassigned"</option>
                    {move || {
                        teachers
                            .get()
                            .map(|list| {
                                list.into_iter()
                                    .map(|t| {
                                        let label = t.display().to_owned();
                                        view! { <option value=t.id.clone()>{label}</option> }
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
