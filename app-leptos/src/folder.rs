//! The folder-upload surfaces: drop zone + directory picker on one side,
//! the per-language results panel on the other.
//!
//! Both backend surfaces share this single page component, parameterized by
//! [`FolderSurface`]; the only differences are the endpoint and the semgrep
//! hand-off button. All display state lives in one
//! `RwSignal<DisplayState>` and every mutation goes through the controller,
//! so a network completion lands as a single atomic update.

use astlens_core::state::{DisplayState, EmptyState};
use astlens_core::types::FileResult;
use astlens_core::Endpoints;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, File};

use crate::net;
use crate::results::{EmptyNotice, JsonBlock, RecommendationList, VulnerabilityList};
use crate::Page;

/// Which of the two upload surfaces this page instance serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FolderSurface {
    /// `POST /api/folder_upload/` - per-file results only.
    Standard,
    /// `POST /api/folder/` - additionally returns the opaque semgrep payload
    /// handed off to the detail view.
    Semgrep,
}

impl FolderSurface {
    fn endpoint(&self) -> String {
        let endpoints = Endpoints::default();
        match self {
            FolderSurface::Standard => endpoints.folder_upload(),
            FolderSurface::Semgrep => endpoints.folder(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FolderSurface::Standard => "Complex Folder",
            FolderSurface::Semgrep => "Simple Folder",
        }
    }
}

#[component]
pub fn FolderUploadPage(surface: FolderSurface) -> impl IntoView {
    let state = RwSignal::new(DisplayState::new());
    let (dragging, set_dragging) = signal(false);
    let input_ref = NodeRef::<html::Input>::new();

    // One network call per user action. `begin_submit` refuses re-entrant
    // attempts while an upload is in flight; both completion paths release
    // the loading flag.
    let submit = move |files: Vec<File>| {
        if files.is_empty() {
            return;
        }
        if !state.try_update(|s| s.begin_submit()).unwrap_or(false) {
            return;
        }
        let endpoint = surface.endpoint();
        spawn_local(async move {
            let entries = net::read_entries(files).await;
            match net::upload_folder(&endpoint, &entries).await {
                Ok(response) => state.update(|s| s.apply_response(response)),
                Err(err) => {
                    state.update(|s| s.fail_submit());
                    net::notify(&format!("Upload failed: {err}"));
                }
            }
        });
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        submit(net::files_from_drop(&ev));
    };

    let on_pick = move |_| {
        if let Some(input) = input_ref.get() {
            submit(net::files_from_input(&input));
        }
    };

    view! {
        <div class="folder-page">
            <div
                class=move || if dragging.get() { "drop-zone dragging" } else { "drop-zone" }
                on:dragover=move |ev: DragEvent| ev.prevent_default()
                on:dragenter=move |_| set_dragging.set(true)
                on:dragleave=move |_| set_dragging.set(false)
                on:drop=on_drop
            >
                <label class="drop-zone-target">
                    <input
                        type="file"
                        node_ref=input_ref
                        multiple
                        // `webkitdirectory` has no typed builder method in
                        // leptos/tachys; set it as a raw custom attribute.
                        {leptos::attr::custom::custom_attribute("webkitdirectory", "true")}
                        {leptos::attr::custom::custom_attribute("directory", "true")}
                        style="display: none"
                        on:change=on_pick
                    />
                    <span class="drop-zone-label">{surface.label()}</span>
                </label>
                <p class="drop-zone-hint">"or drag & drop here"</p>
                <p class="drop-zone-support">"Supports: JavaScript, Python, Java, ReactJS, Node.js"</p>
            </div>

            <ResultsPanel state=state surface=surface />
        </div>
    }
}

/// Right-hand panel: loading overlay, pre-upload placeholder, or the
/// normalized results with search + language selection.
///
/// The overlay and the body sit in separate `Show`s so a search keystroke
/// only recomputes the projections inside the body instead of remounting
/// the panel (which would drop focus from the search input).
#[component]
fn ResultsPanel(state: RwSignal<DisplayState>, surface: FolderSurface) -> impl IntoView {
    view! {
        <section class="results-panel">
            <Show when=move || state.with(|s| s.loading())>
                <LoadingOverlay />
            </Show>
            <Show
                when=move || state.with(|s| s.has_results())
                fallback=move || view! {
                    <EmptyNotice
                        title="No Results Yet"
                        body="Upload a folder to see analysis results here"
                    />
                }
            >
                <ResultsBody state=state surface=surface />
            </Show>
        </section>
    }
}

#[component]
fn ResultsBody(state: RwSignal<DisplayState>, surface: FolderSurface) -> impl IntoView {
    let page = expect_context::<RwSignal<Page>>();
    let handoff = expect_context::<RwSignal<Option<serde_json::Value>>>();

    // Explicit hand-off of the opaque semgrep payload: the detail view gets
    // it through reactive context, not a storage side channel.
    let open_semgrep = move |_| {
        handoff.set(state.with(|s| s.results().and_then(|r| r.semgrep.clone())));
        page.set(Page::SemgrepResults);
    };

    view! {
        <div class="results-body">
            <header class="results-header">
                <h2>"Analysis Results"</h2>
                <div class="results-controls">
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search files..."
                        prop:value=move || state.with(|s| s.search_term().to_string())
                        on:input=move |ev| {
                            state.update(|s| s.set_search_term(event_target_value(&ev)))
                        }
                    />
                    <select
                        class="language-select"
                        on:change=move |ev| {
                            state.update(|s| s.select_language(&event_target_value(&ev)))
                        }
                    >
                        {move || state.with(|s| {
                            let selected = s.selected_language().map(str::to_owned);
                            s.languages()
                                .iter()
                                .map(|language| {
                                    let is_selected =
                                        selected.as_deref() == Some(language.as_str());
                                    view! {
                                        <option value=language.clone() selected=is_selected>
                                            {language.clone()}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })}
                    </select>
                    {(surface == FolderSurface::Semgrep).then(|| view! {
                        <button class="rule-btn" on:click=open_semgrep>"Rule"</button>
                    })}
                </div>
            </header>

            {move || state.with(|s| {
                let term = s.search_term();
                if term.is_empty() {
                    return None;
                }
                let count = s.visible_files().len();
                let plural = if count == 1 { "" } else { "s" };
                Some(view! {
                    <div class="search-count">
                        {format!("Found {count} file{plural} matching \"{term}\"")}
                    </div>
                })
            })}

            {move || match state.with(|s| s.empty_state()) {
                Some(EmptyState::NoFiles) => view! {
                    <EmptyNotice
                        title="No files to display"
                        body="No files found for the selected language"
                    />
                }
                .into_any(),
                Some(EmptyState::NoMatch) => {
                    let term = state.with(|s| s.search_term().to_string());
                    view! {
                        <EmptyNotice
                            title="No files found"
                            body=format!("No files match your search for \"{term}\"")
                        >
                            <button
                                class="clear-search-btn"
                                on:click=move |_| state.update(|s| s.clear_search())
                            >
                                "Clear search"
                            </button>
                        </EmptyNotice>
                    }
                    .into_any()
                }
                _ => {
                    let files: Vec<FileResult> = state.with(|s| {
                        s.visible_files().into_iter().cloned().collect()
                    });
                    view! {
                        <div class="file-list">
                            {files
                                .into_iter()
                                .map(|file| view! { <FileCard file=file state=state /> })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// One analyzed file: name, AST toggle, vulnerabilities, recommendations,
/// and the raw rule-check details block.
#[component]
fn FileCard(file: FileResult, state: RwSignal<DisplayState>) -> impl IntoView {
    // Visibility is keyed by the full relative path, so same-named files in
    // different directories keep independent flags.
    let path = file.filename.clone();
    let is_visible = {
        let path = path.clone();
        move || state.with(|s| s.is_ast_visible(&path))
    };
    let toggle = move |_| state.update(|s| s.toggle_ast(&path));

    let ast_pretty = file.ast_pretty();
    let raw_pretty = file.rule_check_pretty();

    view! {
        <article class="file-card">
            <header class="file-card-header">
                <h3 class="file-name">{file.filename.clone()}</h3>
                <label class="ast-toggle">
                    <span>
                        {
                            let is_visible = is_visible.clone();
                            move || if is_visible() { "Hide AST" } else { "Show AST" }
                        }
                    </span>
                    <input
                        type="checkbox"
                        prop:checked=is_visible.clone()
                        on:change=toggle
                    />
                </label>
            </header>

            <Show when=is_visible.clone()>
                <h4 class="section-heading">"Abstract Syntax Tree"</h4>
                <JsonBlock text=ast_pretty.clone() />
            </Show>

            <VulnerabilityList vulnerabilities=file.rule_check.vulnerabilities.clone() />
            <RecommendationList recommendations=file.rule_check.recommendations.clone() />

            <details class="raw-details">
                <summary>"View raw analysis data"</summary>
                <JsonBlock text=raw_pretty.clone() />
            </details>
        </article>
    }
}

#[component]
fn LoadingOverlay() -> impl IntoView {
    view! {
        <div class="loading-overlay">
            <div class="spinner"></div>
            <p class="loading-title">"Analyzing your code"</p>
            <p class="loading-subtitle">
                "Parsing files, building AST, and applying rule checks"
            </p>
        </div>
    }
}
