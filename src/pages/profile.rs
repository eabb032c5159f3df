//! Profile page: the signed-in user's backend record.

use leptos::prelude::*;

use crate::components::stat_card::StatCard;
use crate::components::toast::notify;
use crate::net::api;
use crate::net::types::Profile;
use crate::state::auth::AuthState;
use crate::state::toast::{ToastKind, ToastState};
use crate::util::format::rate_color;

/// Read-only view of the current user's profile record.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let profile = LocalResource::new(move || {
        let uid = auth.get().user.map(|u| u.uid);
        async move {
            let Some(uid) = uid else { return Profile::default() };
            match api::fetch_profile(&uid).await {
                Ok(profile) => profile,
                Err(err) => {
                    notify(toasts, ToastKind::Error, err.to_string());
                    Profile::default()
                }
            }
        }
    });

    view! {
        <div class="profile-page">
            <h1>"Profile"</h1>
            <Suspense fallback=move || view! { <p>"Loading profile..."</p> }>
                {move || {
                    profile
                        .get()
                        .map(|p| {
                            let avatar = if p.photo_url.is_empty() {
                                view! { <span class="avatar avatar--large avatar--placeholder"></span> }
                                    .into_any()
                            } else {
                                view! { <img class="avatar avatar--large" src=p.photo_url.clone() alt=""/> }
                                    .into_any()
                            };
                            let display_name = if p.display_name.is_empty() {
                                p.email.clone()
                            } else {
                                p.display_name.clone()
                            };
                            let stats = p.attendance_stats.map(|s| {
                                view! {
                                    <div class="profile-page__stats">
                                        <StatCard
                                            label="Overall Attendance"
                                            value=format!("{:.1}%", s.overall)
                                            color=rate_color(s.overall)
                                        />
                                        <StatCard label="Present" value=s.present.to_string() color="green"/>
                                        <StatCard label="Absent" value=s.absent.to_string() color="red"/>
                                    </div>
                                }
                            });
                            view! {
                                <section class="profile-card">
                                    {avatar}
                                    <h2>{display_name}</h2>
                                    <span class="profile-card__role">{p.role.clone()}</span>
                                    <dl class="profile-card__fields">
                                        <dt>"Email"</dt>
                                        <dd>{p.email.clone()}</dd>
                                        {(!p.department.is_empty())
                                            .then(|| {
                                                view! {
                                                    <dt>"Department"</dt>
                                                    <dd>{p.department.clone()}</dd>
                                                }
                                            })}
                                        {p.student_id
                                            .clone()
                                            .map(|sid| {
                                                view! {
                                                    <dt>"Student ID"</dt>
                                                    <dd>{sid}</dd>
                                                }
                                            })}
                                        {(!p.last_login.is_empty())
                                            .then(|| {
                                                view! {
                                                    <dt>"Last Login"</dt>
                                                    <dd>{p.last_login.clone()}</dd>
                                                }
                                            })}
                                    </dl>

                                    <div class="profile-card__classes">
                                        {p
                                            .classes
                                            .iter()
                                            .map(|c| {
                                                let tag = format!("{} ({})", c.name, c.code);
                                                view! { <span class="tag">{tag}</span> }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>

                                    {stats}
                                </section>
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
