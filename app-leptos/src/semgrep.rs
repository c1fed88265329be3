//! Detail view for the opaque semgrep payload.
//!
//! Reached only through the explicit hand-off from the semgrep-enabled
//! folder surface; the payload is rendered verbatim, never interpreted.

use leptos::prelude::*;

use crate::results::{EmptyNotice, JsonBlock};
use crate::Page;

#[component]
pub fn SemgrepResultsPage() -> impl IntoView {
    let page = expect_context::<RwSignal<Page>>();
    let handoff = expect_context::<RwSignal<Option<serde_json::Value>>>();

    view! {
        <section class="semgrep-page">
            <header class="semgrep-header">
                <h2>"Semgrep Results"</h2>
                <button class="back-btn" on:click=move |_| page.set(Page::Folder)>
                    "Back to upload"
                </button>
            </header>

            {move || match handoff.get() {
                Some(payload) => {
                    let text = serde_json::to_string_pretty(&payload).unwrap_or_default();
                    view! { <JsonBlock text=text /> }.into_any()
                }
                None => view! {
                    <EmptyNotice
                        title="Nothing to show"
                        body="Run a folder analysis on the Simple Folder page first"
                    />
                }
                .into_any(),
            }}
        </section>
    }
}
