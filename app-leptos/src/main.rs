//! astlens — browser client for the code analysis service.
//!
//! Leptos CSR entry point. The page signal replaces router plumbing and the
//! semgrep hand-off travels through reactive context, so the surfaces pass
//! data to each other explicitly instead of through ambient storage.

use leptos::prelude::*;

mod editor;
mod folder;
mod net;
mod output;
mod results;
mod semgrep;

use editor::EditorPage;
use folder::{FolderSurface, FolderUploadPage};
use semgrep::SemgrepResultsPage;

/// Which top-level surface is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    /// Snippet editor with the three-view analysis panel.
    Editor,
    /// Batch upload against `/api/folder_upload/`.
    FolderUpload,
    /// Batch upload against `/api/folder/` (semgrep-enabled).
    Folder,
    /// Detail view for the forwarded semgrep payload.
    SemgrepResults,
}

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}

#[component]
fn App() -> impl IntoView {
    let page = RwSignal::new(Page::Editor);
    let semgrep_handoff: RwSignal<Option<serde_json::Value>> = RwSignal::new(None);
    provide_context(page);
    provide_context(semgrep_handoff);

    view! {
        <main class="app">
            {move || match page.get() {
                Page::Editor => view! { <EditorPage /> }.into_any(),
                Page::FolderUpload => view! {
                    <FolderUploadPage surface=FolderSurface::Standard />
                }
                .into_any(),
                Page::Folder => view! {
                    <FolderUploadPage surface=FolderSurface::Semgrep />
                }
                .into_any(),
                Page::SemgrepResults => view! { <SemgrepResultsPage /> }.into_any(),
            }}
        </main>
    }
}
