//! Modal dialog shell: backdrop, titled card, close on backdrop click.

use leptos::prelude::*;

/// Centered dialog over a dimmed backdrop. Clicking the backdrop (but not
/// the dialog itself) closes it.
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <header class="dialog__header">
                    <h2>{title}</h2>
                    <button class="dialog__close" on:click=move |_| on_close.run(())>
                        "\u{00d7}"
                    </button>
                </header>
                {children()}
            </div>
        </div>
    }
}
