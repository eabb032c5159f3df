//! Attendance check-in, split by role: students get a single self check-in
//! card that ends in a success splash, teachers get the full three-step
//! wizard with a results table and manual-entry fallback.
//!
//! The camera device is owned by a [`CaptureController`] held in local
//! (non-reactive) storage inside the shared capture card; a separate
//! `streaming` signal mirrors its phase for the view. Async completions
//! carry the wizard generation they saw at launch, so anything resolving
//! after "start over" is dropped.

#[cfg(test)]
#[path = "attendance_test.rs"]
mod attendance_test;

use leptos::prelude::*;

use crate::capture::{CaptureController, CapturedImage};
use crate::components::modal::Modal;
use crate::components::toast::{notify, ok_or_notify};
use crate::net::api;
use crate::net::types::{ClassRef, StudentRecord};
use crate::state::auth::{AuthState, Role, SessionUser};
use crate::state::toast::{ToastKind, ToastState};
use crate::state::wizard::{RecognitionRow, WizardState, WizardStep};
use crate::util::format::percent1;

/// The check-in page. Dispatches once by role: students check themselves in
/// against their own classes, teachers can check in any student.
#[component]
pub fn AttendancePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    move || match auth.get().user {
        None => view! { <p class="page-loading">"Loading..."</p> }.into_any(),
        Some(user) if user.role == Role::Teacher => view! { <TeacherWizard/> }.into_any(),
        Some(user) => view! { <StudentCheckIn user=user/> }.into_any(),
    }
}

// -------------------------------------------------------------
// Shared capture card and submission call
// -------------------------------------------------------------

/// Camera/upload card shared by both check-in variants.
///
/// MediaStream handles are not Send, so the controller lives outside the
/// reactive graph; the camera is shut down when the card unmounts. Captured
/// images are handed to `on_image` together with the wizard generation
/// observed when the capture started.
#[component]
fn CaptureCard(generation: Signal<u64>, on_image: Callback<(u64, CapturedImage)>) -> impl IntoView {
    let controller = StoredValue::new_local(CaptureController::new());
    let streaming = RwSignal::new(false);
    let camera_error = RwSignal::new(Option::<String>::None);

    let video_ref = NodeRef::<leptos::html::Video>::new();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(not(feature = "csr"))]
    let _ = (generation, on_image);

    // The camera must never outlive the card.
    on_cleanup(move || {
        controller.update_value(CaptureController::shutdown);
    });

    let start_camera = move |_| {
        #[cfg(feature = "csr")]
        {
            camera_error.set(None);
            leptos::task::spawn_local(async move {
                match crate::capture::open_stream().await {
                    Ok(stream) => {
                        let Some(video) = video_ref.get_untracked() else {
                            // No surface to show it on; don't leave the device open.
                            crate::capture::discard_stream(&stream);
                            return;
                        };
                        controller.update_value(|c| c.attach(stream, &video));
                        streaming.set(controller.with_value(CaptureController::is_streaming));
                    }
                    Err(err) => camera_error.set(Some(err.to_string())),
                }
            });
        }
    };

    let stop_camera = move |_| {
        controller.update_value(|c| {
            c.release();
        });
        streaming.set(false);
    };

    let capture_photo = move |_| {
        #[cfg(feature = "csr")]
        {
            let (Some(video), Some(canvas)) =
                (video_ref.get_untracked(), canvas_ref.get_untracked())
            else {
                return;
            };
            let result = controller.try_update_value(|c| c.capture_frame(&video, &canvas));
            streaming.set(false);
            match result {
                Some(Ok(image)) => on_image.run((generation.get_untracked(), image)),
                Some(Err(err)) => camera_error.set(Some(err.to_string())),
                None => {}
            }
        }
    };

    let on_file_picked = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let Some(file) = crate::capture::picked_file(&ev) else { return };
            let launched = generation.get_untracked();
            leptos::task::spawn_local(async move {
                match crate::capture::load_from_file(file).await {
                    Ok(image) => on_image.run((launched, image)),
                    Err(err) => camera_error.set(Some(err.to_string())),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ev;
        }
    };

    view! {
        <section class="capture-card">
            {move || {
                camera_error
                    .get()
                    .map(|msg| view! { <p class="capture-card__error">{msg}</p> })
            }}

            <video
                node_ref=video_ref
                class="capture-card__video"
                class=("capture-card__video--hidden", move || !streaming.get())
                autoplay=true
                muted=true
                playsinline=true
            ></video>

            // The canvas is an off-screen encoding surface, never shown.
            <canvas node_ref=canvas_ref class="capture-card__canvas" hidden=true></canvas>

            <div class="capture-card__actions">
                <Show
                    when=move || streaming.get()
                    fallback=move || {
                        view! {
                            <button class="btn btn--primary" on:click=start_camera>
                                "Start Camera"
                            </button>
                        }
                    }
                >
                    <button class="btn btn--primary" on:click=capture_photo>
                        "Capture Photo"
                    </button>
                    <button class="btn" on:click=stop_camera>
                        "Cancel"
                    </button>
                </Show>

                <label class="btn capture-card__upload">
                    "Upload Photo"
                    <input
                        type="file"
                        accept="image/*"
                        hidden=true
                        on:change=on_file_picked
                    />
                </label>
            </div>
        </section>
    }
}

/// Issue the recognition call for the image and class the wizard holds.
/// Precondition failures surface as an error toast without touching the
/// wizard; a soft failure (`recognized: false`) gets `soft_failure_note`.
fn submit_capture(
    wizard: RwSignal<WizardState>,
    toasts: RwSignal<ToastState>,
    student_id: String,
    soft_failure_note: &'static str,
) {
    let Some(begun) = wizard.try_update(WizardState::begin_submit) else { return };
    let generation = match begun {
        Ok(generation) => generation,
        Err(msg) => {
            notify(toasts, ToastKind::Error, msg);
            return;
        }
    };

    #[cfg(feature = "csr")]
    {
        let (image, class_id) = wizard.with_untracked(|w| (w.image.clone(), w.class_id.clone()));
        // begin_submit already guaranteed both are present.
        let (Some(image), Some(class_id)) = (image, class_id) else { return };
        let request = crate::net::types::AttendanceRequest {
            image_base64: image.data_url,
            student_id: student_id.clone(),
            class_id: class_id.clone(),
        };
        leptos::task::spawn_local(async move {
            match api::submit_attendance(&request).await {
                Ok(outcome) => {
                    let recognized = outcome.recognized;
                    let row = RecognitionRow {
                        student_id,
                        class_id,
                        recognized,
                        similarity: outcome.similarity,
                        image_url: outcome.image_url,
                        manual: false,
                    };
                    let applied = wizard
                        .try_update(|w| w.apply_outcome(generation, row))
                        .unwrap_or(false);
                    if applied {
                        if recognized {
                            notify(toasts, ToastKind::Success, "Attendance recorded");
                        } else {
                            notify(toasts, ToastKind::Info, soft_failure_note);
                        }
                    }
                }
                Err(err) => {
                    wizard.update(|w| w.fail_submit(generation));
                    notify(toasts, ToastKind::Error, err.to_string());
                }
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (student_id, generation, soft_failure_note);
    }
}

// -------------------------------------------------------------
// Student self check-in
// -------------------------------------------------------------

/// Student variant: one card that walks capture -> own class -> submit and
/// ends in a success splash. No step header and no results table; an
/// unrecognized outcome keeps the form up with an inline note so the
/// student can retake and retry, and never shows the splash.
#[component]
fn StudentCheckIn(user: SessionUser) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let wizard = RwSignal::new(WizardState::default());

    // Submissions go against the institutional ID when the profile has one.
    let student_id = user.student_id.clone().unwrap_or_else(|| user.uid.clone());

    let classes = LocalResource::new({
        let enrolled_id = user.student_id.clone();
        move || {
            let enrolled_id = enrolled_id.clone();
            async move {
                match enrolled_id {
                    Some(sid) => ok_or_notify(toasts, api::fetch_student_classes(&sid).await),
                    None => Vec::new(),
                }
            }
        }
    });

    let generation = Signal::derive(move || wizard.with(WizardState::generation));
    let on_image = Callback::new(move |(launched, image): (u64, CapturedImage)| {
        wizard.update(|w| {
            w.image_ready_if_current(launched, image);
        });
    });

    let succeeded = Memo::new(move |_| wizard.with(WizardState::recognition_succeeded));
    let has_image = Memo::new(move |_| wizard.with(|w| w.image.is_some()));
    // True while the latest submission came back unrecognized; cleared the
    // moment a retake or start-over leaves the Results step behind.
    let unrecognized = move || {
        wizard.with(|w| w.step == WizardStep::Results && !w.recognition_succeeded())
    };

    let retake = move |_| wizard.update(WizardState::retake);
    let submit = {
        let student_id = student_id.clone();
        move |_| {
            submit_capture(
                wizard,
                toasts,
                student_id.clone(),
                "Face not recognized; please retake and try again",
            );
        }
    };
    let check_in_again = move |_| wizard.update(WizardState::start_over);

    view! {
        <div class="attendance-page">
            <h1>"Check In"</h1>

            <Show when=move || !succeeded.get() && !has_image.get()>
                <CaptureCard generation=generation on_image=on_image/>
            </Show>

            <Show when=move || !succeeded.get() && has_image.get()>
                <section class="verify-card">
                    {move || {
                        wizard
                            .get()
                            .image
                            .map(|image| {
                                let caption = format!("{}x{}", image.width, image.height);
                                view! {
                                    <figure class="verify-card__preview">
                                        <img src=image.data_url alt="Captured photo"/>
                                        <figcaption>{caption}</figcaption>
                                    </figure>
                                }
                            })
                    }}

                    <Show when=unrecognized>
                        <p class="verify-card__note">
                            "Face not recognized. Retake the photo and try again."
                        </p>
                    </Show>

                    <label class="verify-card__field">
                        "Class"
                        <select
                            prop:value=move || {
                                wizard.with(|w| w.class_id.clone().unwrap_or_default())
                            }
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                wizard.update(|w| {
                                    w.class_id = if value.is_empty() { None } else { Some(value) };
                                });
                            }
                        >
                            <option value="">"Select your class"</option>
                            {move || classes.get().map(class_options)}
                        </select>
                    </label>

                    <div class="verify-card__actions">
                        <button class="btn" on:click=retake>
                            "Retake"
                        </button>
                        <button
                            class="btn btn--primary"
                            disabled=move || wizard.get().submitting
                            on:click=submit.clone()
                        >
                            {move || {
                                if wizard.get().submitting { "Submitting..." } else { "Submit" }
                            }}
                        </button>
                    </div>
                </section>
            </Show>

            <Show when=move || succeeded.get()>
                <section class="success-splash">
                    <div class="success-splash__icon">"\u{2713}"</div>
                    <h2 class="success-splash__title">"Attendance Recorded!"</h2>
                    <p>"Your attendance has been successfully recorded."</p>
                    <p class="success-splash__detail">
                        {move || {
                            wizard
                                .with(|w| splash_detail(w, &classes.get().unwrap_or_default()))
                        }}
                    </p>
                    <button class="btn btn--primary" on:click=check_in_again>
                        "Done"
                    </button>
                </section>
            </Show>
        </div>
    }
}

/// Detail line under the splash title: the class the student checked in to
/// plus the match percentage. Falls back to the raw class id until the
/// class list has loaded.
fn splash_detail(wizard: &WizardState, classes: &[ClassRef]) -> String {
    let Some(row) = wizard.rows.iter().find(|r| r.recognized && !r.manual) else {
        return String::new();
    };
    let class = classes
        .iter()
        .find(|c| c.id == row.class_id)
        .map_or_else(|| row.class_id.clone(), ClassRef::label);
    format!("{class} \u{00b7} match {}", percent1(row.similarity))
}

// -------------------------------------------------------------
// Teacher wizard
// -------------------------------------------------------------

/// Teacher variant: the full Capture -> Verify -> Results wizard, with a
/// student selector on Verify, a results table, and manual entry as the
/// fallback when recognition keeps failing.
#[component]
fn TeacherWizard() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let wizard = RwSignal::new(WizardState::default());
    let selected_student = RwSignal::new(Option::<String>::None);
    let show_manual = RwSignal::new(false);

    let classes = LocalResource::new(move || async move {
        ok_or_notify(toasts, api::fetch_classes().await)
    });

    // Roster for the student selector and manual entry.
    let students = LocalResource::new(move || async move {
        ok_or_notify(toasts, api::fetch_students().await)
    });

    let generation = Signal::derive(move || wizard.with(WizardState::generation));
    let on_image = Callback::new(move |(launched, image): (u64, CapturedImage)| {
        wizard.update(|w| {
            w.image_ready_if_current(launched, image);
        });
    });

    let retake = move |_| wizard.update(WizardState::retake);

    let submit = move |_| {
        let Some(student_id) = selected_student.get_untracked() else {
            notify(toasts, ToastKind::Error, "Please select a student");
            return;
        };
        submit_capture(
            wizard,
            toasts,
            student_id,
            "Face not recognized; you can retry or record manually",
        );
    };

    let start_over = move |_| {
        wizard.update(WizardState::start_over);
        selected_student.set(None);
    };

    let step = move || wizard.get().step;
    let step_class = move |own: WizardStep| {
        move || {
            if step() == own {
                "wizard-steps__item wizard-steps__item--active"
            } else {
                "wizard-steps__item"
            }
        }
    };

    view! {
        <div class="attendance-page">
            <h1>"Check In"</h1>

            <ol class="wizard-steps">
                <li class=step_class(WizardStep::Capture)>"1. Capture"</li>
                <li class=step_class(WizardStep::Verify)>"2. Verify"</li>
                <li class=step_class(WizardStep::Results)>"3. Results"</li>
            </ol>

            <Show when=move || step() == WizardStep::Capture>
                <CaptureCard generation=generation on_image=on_image/>
            </Show>

            <Show when=move || step() == WizardStep::Verify>
                <section class="verify-card">
                    {move || {
                        wizard
                            .get()
                            .image
                            .map(|image| {
                                let caption = format!("{}x{}", image.width, image.height);
                                view! {
                                    <figure class="verify-card__preview">
                                        <img src=image.data_url alt="Captured photo"/>
                                        <figcaption>{caption}</figcaption>
                                    </figure>
                                }
                            })
                    }}

                    <label class="verify-card__field">
                        "Student"
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            selected_student
                                .set(if value.is_empty() { None } else { Some(value) });
                        }>
                            <option value="">"Select a student"</option>
                            {move || {
                                students
                                    .get()
                                    .map(student_options)
                            }}
                        </select>
                    </label>

                    <label class="verify-card__field">
                        "Class"
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            wizard.update(|w| {
                                w.class_id = if value.is_empty() { None } else { Some(value) };
                            });
                        }>
                            <option value="">"Select a class"</option>
                            {move || classes.get().map(class_options)}
                        </select>
                    </label>

                    <div class="verify-card__actions">
                        <button class="btn" on:click=retake>
                            "Retake"
                        </button>
                        <button
                            class="btn btn--primary"
                            disabled=move || wizard.get().submitting
                            on:click=submit
                        >
                            {move || {
                                if wizard.get().submitting { "Submitting..." } else { "Submit" }
                            }}
                        </button>
                    </div>
                </section>
            </Show>

            <Show when=move || step() == WizardStep::Results>
                <section class="results-card">
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Student"</th>
                                <th>"Class"</th>
                                <th>"Status"</th>
                                <th>"Similarity"</th>
                                <th>"Photo"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                wizard
                                    .get()
                                    .rows
                                    .into_iter()
                                    .map(result_row)
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>

                    <div class="results-card__actions">
                        <button class="btn" on:click=move |_| show_manual.set(true)>
                            "Manual Entry"
                        </button>
                        <button class="btn btn--primary" on:click=start_over>
                            "Start Over"
                        </button>
                    </div>
                </section>
            </Show>

            <Show when=move || show_manual.get()>
                <ManualEntryDialog
                    wizard=wizard
                    students=students
                    classes=classes
                    on_close=Callback::new(move |()| show_manual.set(false))
                />
            </Show>
        </div>
    }
}

fn class_options(list: Vec<ClassRef>) -> Vec<AnyView> {
    list.into_iter()
        .map(|c| {
            let label = c.label();
            view! { <option value=c.id>{label}</option> }.into_any()
        })
        .collect()
}

fn student_options(list: Vec<StudentRecord>) -> Vec<AnyView> {
    list.into_iter()
        .map(|s| {
            let label = format!("{} ({})", s.name, s.student_id);
            view! { <option value=s.student_id.clone()>{label}</option> }.into_any()
        })
        .collect()
}

fn result_row(row: RecognitionRow) -> AnyView {
    let (status, color) = if row.manual {
        ("Manual", "orange")
    } else if row.recognized {
        ("Recognized", "green")
    } else {
        ("Not recognized", "red")
    };
    let similarity = if row.manual {
        "\u{2014}".to_owned()
    } else {
        percent1(row.similarity)
    };
    view! {
        <tr>
            <td>{row.student_id}</td>
            <td>{row.class_id}</td>
            <td style=format!("color: {color}")>{status}</td>
            <td>{similarity}</td>
            <td>
                {row
                    .image_url
                    .map(|url| {
                        view! {
                            <a href=url target="_blank" rel="noopener">
                                "view"
                            </a>
                        }
                    })}
            </td>
        </tr>
    }
    .into_any()
}

/// Teacher fallback when recognition keeps failing: record the student as
/// present without a photo. Local to the results table; the row is tagged
/// as manual.
#[component]
fn ManualEntryDialog(
    wizard: RwSignal<WizardState>,
    students: LocalResource<Vec<StudentRecord>>,
    classes: LocalResource<Vec<ClassRef>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let student = RwSignal::new(Option::<String>::None);
    let class = RwSignal::new(Option::<String>::None);

    let save = move |_| {
        let (Some(student_id), Some(class_id)) = (student.get(), class.get()) else {
            notify(toasts, ToastKind::Error, "Please select a student and a class");
            return;
        };
        wizard.update(|w| w.record_manual(student_id, class_id));
        notify(toasts, ToastKind::Success, "Attendance recorded manually");
        on_close.run(());
    };

    view! {
        <Modal title="Manual Entry" on_close=on_close>
            <label class="dialog__label">
                "Student"
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    student.set(if value.is_empty() { None } else { Some(value) });
                }>
                    <option value="">"Select a student"</option>
                    {move || students.get().map(student_options)}
                </select>
            </label>
            <label class="dialog__label">
                "Class"
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    class.set(if value.is_empty() { None } else { Some(value) });
                }>
                    <option value="">"Select a class"</option>
                    {move || classes.get().map(class_options)}
                </select>
            </label>
            <div class="dialog__actions">
                <button class="btn" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
                <button class="btn btn--primary" on:click=save>
                    "Record"
                </button>
            </div>
        </Modal>
    }
}
