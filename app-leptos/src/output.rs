//! Snippet analysis panel: three named views over one fetched result.
//!
//! Each button press triggers exactly one fresh request against the snippet
//! route and replaces the cached result wholesale; the view buttons double
//! as the analyze action, matching the upload surfaces' one-call-per-action
//! contract.

use astlens_core::snippet::{SnippetState, SnippetView};
use astlens_core::Endpoints;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::net;
use crate::results::{RecommendationList, VulnerabilityList};

#[component]
pub fn OutputPanel(code: RwSignal<String>) -> impl IntoView {
    let state = RwSignal::new(SnippetState::new());

    let analyze = move |view_kind: SnippetView| {
        if !state.try_update(|s| s.begin_submit()).unwrap_or(false) {
            return;
        }
        let source = code.get_untracked();
        spawn_local(async move {
            match net::analyze_snippet(&Endpoints::default().analyze(), &source).await {
                Ok(result) => state.update(|s| s.apply_result(view_kind, result)),
                Err(err) => {
                    state.update(|s| s.fail_submit());
                    net::notify(&format!("Analysis failed: {err}"));
                }
            }
        });
    };

    let button_class = move |view_kind: SnippetView| {
        if state.with(|s| s.view()) == Some(view_kind) {
            "analysis-btn active"
        } else {
            "analysis-btn"
        }
    };

    view! {
        <div class="output-panel">
            <header class="panel-header">
                <h2>"Code Analysis"</h2>
                <p class="panel-subtitle">"Review your code analysis results"</p>
            </header>

            <div class="button-group">
                <button
                    class=move || button_class(SnippetView::Security)
                    on:click=move |_| analyze(SnippetView::Security)
                >
                    "🔍 Security Analysis"
                </button>
                <button
                    class=move || button_class(SnippetView::Ast)
                    on:click=move |_| analyze(SnippetView::Ast)
                >
                    "🌳 View AST"
                </button>
                <button
                    class=move || button_class(SnippetView::Errors)
                    on:click=move |_| analyze(SnippetView::Errors)
                >
                    "⚠️ Error Check"
                </button>
            </div>

            <div class="output-container">
                {move || state.with(|s| {
                    if s.loading() {
                        return view! {
                            <div class="loading-indicator">
                                <div class="spinner"></div>
                                <p>"Analyzing code..."</p>
                            </div>
                        }
                        .into_any();
                    }

                    let (Some(view_kind), Some(result)) = (s.view(), s.result()) else {
                        return view! {
                            <p class="output-hint">"Run an analysis to see results here"</p>
                        }
                        .into_any();
                    };

                    match view_kind {
                        SnippetView::Ast => view! {
                            <pre class="raw-output">{result.ast_pretty()}</pre>
                        }
                        .into_any(),
                        SnippetView::Errors => view! {
                            <pre class="raw-output">{result.errors_text()}</pre>
                        }
                        .into_any(),
                        SnippetView::Security => {
                            let language = result.language.clone();
                            let vulnerabilities = result.vulnerabilities.clone();
                            let recommendations = result.recommendations.clone();
                            view! {
                                <div class="analysis-results">
                                    <section class="result-section">
                                        <h3>"Language Detected"</h3>
                                        <div class="language-tag">{language}</div>
                                    </section>
                                    <section class="result-section">
                                        <VulnerabilityList vulnerabilities=vulnerabilities />
                                    </section>
                                    <section class="result-section">
                                        <RecommendationList recommendations=recommendations />
                                    </section>
                                </div>
                            }
                            .into_any()
                        }
                    }
                })}
            </div>
        </div>
    }
}
