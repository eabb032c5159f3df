//! Reports page: per-student aggregates, class comparison, export links.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use leptos::prelude::*;

use crate::components::stat_card::StatCard;
use crate::components::toast::{notify, ok_or_notify};
use crate::net::api;
use crate::net::types::ReportRow;
use crate::state::toast::{ToastKind, ToastState};
use crate::util::browser::open_in_new_tab;
use crate::util::format::rate_color;

/// Summary figures computed client-side from the report rows.
fn summarize(rows: &[ReportRow]) -> (f64, u32, u32) {
    let present: u32 = rows.iter().map(|r| r.present).sum();
    let absent: u32 = rows.iter().map(|r| r.absent).sum();
    let average = if rows.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let count = rows.len() as f64;
        rows.iter().map(|r| r.attendance_rate).sum::<f64>() / count
    };
    (average, present, absent)
}

/// Attendance reporting for teachers.
#[component]
pub fn ReportsPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    let class_filter = RwSignal::new(Option::<String>::None);

    let classes = LocalResource::new(move || async move {
        ok_or_notify(toasts, api::fetch_classes().await)
    });

    // Refetches whenever the class filter changes.
    let report = LocalResource::new(move || {
        let filter = class_filter.get();
        async move { ok_or_notify(toasts, api::fetch_attendance_report(filter.as_deref()).await) }
    });

    let class_report = LocalResource::new(move || async move {
        ok_or_notify(toasts, api::fetch_class_report().await)
    });

    let export = move |kind: &'static str| {
        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                match api::export_report(kind).await {
                    Ok(url) => open_in_new_tab(&url),
                    Err(err) => notify(toasts, ToastKind::Error, err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = kind;
        }
    };

    view! {
        <div class="reports-page">
            <header class="page-header">
                <h1>"Reports"</h1>
                <select
                    class="page-header__filter"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        class_filter.set(if value.is_empty() { None } else { Some(value) });
                    }
                >
                    <option value="">"All classes"</option>
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
                <button class="btn" on:click=move |_| export("pdf")>
                    "Export PDF"
                </button>
                <button class="btn" on:click=move |_| export("excel")>
                    "Export Excel"
                </button>
            </header>

            <Suspense fallback=move || view! { <p>"Loading report..."</p> }>
                {move || {
                    report
                        .get()
                        .map(|rows| {
                            let (average, present, absent) = summarize(&rows);
                            view! {
                                <div class="reports-page__stats">
                                    <StatCard
                                        label="Average Attendance"
                                        value=format!("{average:.1}%")
                                        color=rate_color(average)
                                    />
                                    <StatCard label="Total Present" value=present.to_string() color="green"/>
                                    <StatCard label="Total Absent" value=absent.to_string() color="red"/>
                                </div>

                                <table class="data-table">
                                    <thead>
                                        <tr>
                                            <th>"Student ID"</th>
                                            <th>"Name"</th>
                                            <th>"Present"</th>
                                            <th>"Absent"</th>
                                            <th>"Late"</th>
                                            <th>"Rate"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {rows
                                            .into_iter()
                                            .map(|row| {
                                                let rate = row.attendance_rate;
                                                view! {
                                                    <tr>
                                                        <td>{row.student_id}</td>
                                                        <td>{row.name}</td>
                                                        <td>{row.present}</td>
                                                        <td>{row.absent}</td>
                                                        <td>{row.late}</td>
                                                        <td style=format!("color: {}", rate_color(rate))>
                                                            {format!("{rate:.1}%")}
                                                        </td>
                                                    </tr>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </tbody>
                                </table>
                            }
                        })
                }}
            </Suspense>

            <section class="reports-page__section">
                <h2>"By Class"</h2>
                <Suspense fallback=move || view! { <p>"Loading comparison..."</p> }>
                    {move || {
                        class_report
                            .get()
                            .map(|rows| {
                                rows.into_iter()
                                    .map(|row| {
                                        let rate = row.attendance_rate;
                                        view! {
                                            <div class="breakdown-row">
                                                <span>{row.class_name}</span>
                                                <span style=format!("color: {}", rate_color(rate))>
                                                    {format!("{rate:.1}%")}
                                                </span>
                                                <span class="breakdown-row__detail">
                                                    {format!("{} students", row.student_count)}
                                                </span>
                                            </div>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            })
                    }}
                </Suspense>
            </section>
        </div>
    }
}
