//! Small numeric summary card used on dashboards and reports.

use leptos::prelude::*;

/// A labelled figure, optionally colored (e.g. attendance-rate buckets).
#[component]
pub fn StatCard(
    label: &'static str,
    value: String,
    #[prop(optional, into)] color: Option<&'static str>,
) -> impl IntoView {
    let style = color.map(|c| format!("color: {c}")).unwrap_or_default();
    view! {
        <div class="stat-card">
            <span class="stat-card__label">{label}</span>
            <span class="stat-card__value" style=style>{value}</span>
        </div>
    }
}
