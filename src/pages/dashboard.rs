//! Dashboard page: role-specific summary of today's attendance.

use leptos::prelude::*;

use crate::components::stat_card::StatCard;
use crate::components::toast::ok_or_notify;
use crate::net::api;
use crate::net::types::{StudentDashboard, TeacherDashboard};
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::format::{rate_color, status_color};

/// Dashboard page, split by role once the session has settled.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    move || {
        match auth.get().user {
            None => view! { <p class="page-loading">"Loading..."</p> }.into_any(),
            Some(user) if user.role == crate::state::auth::Role::Teacher => {
                view! { <TeacherDashboardView/> }.into_any()
            }
            Some(user) => view! { <StudentDashboardView uid=user.uid/> }.into_any(),
        }
    }
}

/// Teacher view: school-wide counters, today's classes, recent check-ins.
#[component]
fn TeacherDashboardView() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let dashboard = LocalResource::new(move || async move {
        ok_or_notify::<TeacherDashboard>(toasts, api::fetch_teacher_dashboard().await)
    });

    view! {
        <div class="dashboard-page">
            <h1>"Dashboard"</h1>
            <Suspense fallback=move || view! { <p>"Loading dashboard..."</p> }>
                {move || {
                    dashboard
                        .get()
                        .map(|data| {
                            let rate = data.attendance_rate;
                            view! {
                                <div class="dashboard-page__stats">
                                    <StatCard label="Total Students" value=data.total_students.to_string()/>
                                    <StatCard label="Present Today" value=data.present_today.to_string() color="green"/>
                                    <StatCard label="Absent Today" value=data.absent_today.to_string() color="red"/>
                                    <StatCard
                                        label="Attendance Rate"
                                        value=format!("{rate:.1}%")
                                        color=rate_color(rate)
                                    />
                                </div>

                                <section class="dashboard-page__section">
                                    <h2>"Today's Classes"</h2>
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Class"</th>
                                                <th>"Code"</th>
                                                <th>"Students"</th>
                                                <th>"Present"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {data
                                                .classes
                                                .into_iter()
                                                .map(|c| {
                                                    view! {
                                                        <tr>
                                                            <td>{c.name}</td>
                                                            <td>{c.code}</td>
                                                            <td>{c.total_students}</td>
                                                            <td>{c.present_today}</td>
                                                        </tr>
                                                    }
                                                })
                                                .collect::<Vec<_>>()}
                                        </tbody>
                                    </table>
                                </section>

                                <section class="dashboard-page__section">
                                    <h2>"Recent Attendance"</h2>
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Student"</th>
                                                <th>"Class"</th>
                                                <th>"Time"</th>
                                                <th>"Status"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {data
                                                .recent_attendance
                                                .into_iter()
                                                .map(|row| {
                                                    let color = status_color(&row.status);
                                                    view! {
                                                        <tr>
                                                            <td>{row.name}</td>
                                                            <td>{row.class_name}</td>
                                                            <td>{row.time}</td>
                                                            <td style=format!("color: {color}")>{row.status}</td>
                                                        </tr>
                                                    }
                                                })
                                                .collect::<Vec<_>>()}
                                        </tbody>
                                    </table>
                                </section>
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

/// Student view: personal counters, next class, history, per-class rates.
#[component]
fn StudentDashboardView(uid: String) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let dashboard = LocalResource::new(move || {
        let uid = uid.clone();
        async move {
            ok_or_notify::<StudentDashboard>(toasts, api::fetch_student_dashboard(&uid).await)
        }
    });

    view! {
        <div class="dashboard-page">
            <h1>"My Dashboard"</h1>
            <Suspense fallback=move || view! { <p>"Loading dashboard..."</p> }>
                {move || {
                    dashboard
                        .get()
                        .map(|data| {
                            let rate = data.attendance_rate;
                            let next = data
                                .next_class
                                .map_or_else(|| "None scheduled".to_owned(), |n| {
                                    format!("{} at {}", n.name, n.time)
                                });
                            view! {
                                <div class="dashboard-page__stats">
                                    <StatCard label="My Classes" value=data.total_classes.to_string()/>
                                    <StatCard
                                        label="Attendance Rate"
                                        value=format!("{rate:.1}%")
                                        color=rate_color(rate)
                                    />
                                    <StatCard label="Next Class" value=next/>
                                </div>

                                <section class="dashboard-page__section">
                                    <h2>"Attendance History"</h2>
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Class"</th>
                                                <th>"Date"</th>
                                                <th>"Status"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {data
                                                .attendance_history
                                                .into_iter()
                                                .map(|row| {
                                                    let color = status_color(&row.status);
                                                    view! {
                                                        <tr>
                                                            <td>{row.class_name}</td>
                                                            <td>{row.date}</td>
                                                            <td style=format!("color: {color}")>{row.status}</td>
                                                        </tr>
                                                    }
                                                })
                                                .collect::<Vec<_>>()}
                                        </tbody>
                                    </table>
                                </section>

                                <section class="dashboard-page__section">
                                    <h2>"By Class"</h2>
                                    <div class="dashboard-page__breakdown">
                                        {data
                                            .by_class
                                            .into_iter()
                                            .map(|c| {
                                                let rate = c.attendance_rate;
                                                view! {
                                                    <div class="breakdown-row">
                                                        <span>{c.class_name}</span>
                                                        <span style=format!("color: {}", rate_color(rate))>
                                                            {format!("{rate:.1}%")}
                                                        </span>
                                                        <span class="breakdown-row__detail">
                                                            {format!("{} present / {} absent", c.present, c.absent)}
                                                        </span>
                                                    </div>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                </section>
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
