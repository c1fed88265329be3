//! Editor page: a plain-text code buffer next to the snippet analysis panel.
//!
//! The embedded editor widget is an external collaborator; this page binds a
//! textarea to the shared code buffer and offers file-upload-into-buffer,
//! copy-to-clipboard, and navigation to the two folder surfaces.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::output::OutputPanel;
use crate::Page;

#[component]
pub fn EditorPage() -> impl IntoView {
    let code = RwSignal::new(String::from("// Write your code here"));

    view! {
        <div class="editor-page">
            <IdeBox code=code />
            <OutputPanel code=code />
        </div>
    }
}

#[component]
fn IdeBox(code: RwSignal<String>) -> impl IntoView {
    let page = expect_context::<RwSignal<Page>>();
    let file_ref = NodeRef::<html::Input>::new();
    let (copied, set_copied) = signal(false);

    // Reads one file's text into the buffer, replacing it wholesale.
    let on_upload = move |_| {
        let Some(input) = file_ref.get() else { return };
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        spawn_local(async move {
            if let Ok(text) = JsFuture::from(file.text()).await {
                if let Some(text) = text.as_string() {
                    code.set(text);
                }
            }
        });
    };

    let copy_code = move |_| {
        if let Some(window) = web_sys::window() {
            let clipboard = window.navigator().clipboard();
            let _ = clipboard.write_text(&code.get_untracked());
            set_copied.set(true);
            set_timeout(
                move || set_copied.set(false),
                std::time::Duration::from_millis(2000),
            );
        }
    };

    view! {
        <div class="ide-box">
            <div class="ide-header">
                <input
                    type="file"
                    accept=".js,.py,.java,.cpp,.c,.ts,.json,.txt"
                    node_ref=file_ref
                    style="display: none"
                    on:change=on_upload
                />
                <button
                    class="ide-btn"
                    on:click=move |_| {
                        if let Some(input) = file_ref.get() {
                            input.click();
                        }
                    }
                >
                    "📁 Upload File"
                </button>
                <button class="ide-btn" on:click=copy_code>
                    {move || if copied.get() { "✓ Copied" } else { "📋 Copy Code" }}
                </button>
                <button class="ide-btn" on:click=move |_| page.set(Page::FolderUpload)>
                    "🗂️ Complex Folder"
                </button>
                <button class="ide-btn" on:click=move |_| page.set(Page::Folder)>
                    "📂 Simple Folder"
                </button>
            </div>

            <textarea
                class="code-editor"
                spellcheck="false"
                prop:value=move || code.get()
                on:input=move |ev| code.set(event_target_value(&ev))
            ></textarea>
        </div>
    }
}
