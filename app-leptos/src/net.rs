//! File collection and network transport against the analysis backend.
//!
//! The collector turns drop/picker payloads into `FileEntry` lists; the
//! transmitter maps them onto one multipart POST via the contract in
//! `astlens_core::protocol` and hands the decoded body to the normalizer.
//! Re-entrancy is the display controller's job, not this module's.

use astlens_core::normalize::{normalize_response, normalize_snippet};
use astlens_core::protocol::{self, AnalyzeRequest, RawAnalysisResponse, RawSnippetResponse};
use astlens_core::types::{AnalysisResponse, FileEntry, SnippetResult};
use astlens_core::UploadError;
use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, DragEvent, File, FileList, FormData, Headers, HtmlInputElement, Request, RequestInit,
    Response,
};

/// Files carried by a drop payload, in the order the browser reports them.
pub fn files_from_drop(ev: &DragEvent) -> Vec<File> {
    ev.data_transfer()
        .and_then(|transfer| transfer.files())
        .map(|list| files_from_list(&list))
        .unwrap_or_default()
}

/// Files selected through a (directory) input element.
pub fn files_from_input(input: &HtmlInputElement) -> Vec<File> {
    input
        .files()
        .map(|list| files_from_list(&list))
        .unwrap_or_default()
}

fn files_from_list(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|index| list.get(index)).collect()
}

/// Read every file once, preserving the directory-relative path when the
/// picker reported one (plain drops report an empty one). No filtering by
/// extension or size; an unreadable file is skipped with a console warning
/// rather than aborting the batch.
pub async fn read_entries(files: Vec<File>) -> Vec<FileEntry> {
    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let buffer = match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => buffer,
            Err(err) => {
                web_sys::console::warn_2(&JsValue::from_str("skipping unreadable file"), &err);
                continue;
            }
        };
        let bytes = Uint8Array::new(&buffer).to_vec();
        // `File::webkitRelativePath` has no typed binding in web-sys 0.3; read
        // the property directly. Absent (plain drops) yields an empty string,
        // matching the browser's own default.
        let relative_path = js_sys::Reflect::get(
            file.as_ref(),
            &JsValue::from_str("webkitRelativePath"),
        )
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default();
        entries.push(FileEntry::new(
            &relative_path,
            &file.name(),
            bytes,
        ));
    }
    entries
}

/// Send one multipart POST carrying the whole batch, then decode and
/// normalize the response. Failures yield a single [`UploadError`]; nothing
/// is retried.
pub async fn upload_folder(
    url: &str,
    entries: &[FileEntry],
) -> Result<AnalysisResponse, UploadError> {
    let form = FormData::new().map_err(js_transport)?;
    for (field, filename, bytes) in protocol::form_parts(entries) {
        let chunks = js_sys::Array::new();
        chunks.push(&Uint8Array::from(bytes));
        let blob = Blob::new_with_u8_array_sequence(&chunks).map_err(js_transport)?;
        form.append_with_blob_and_filename(field, &blob, filename)
            .map_err(js_transport)?;
    }

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);

    let body = fetch_text(url, &init).await?;
    let raw: RawAnalysisResponse =
        serde_json::from_str(&body).map_err(|err| UploadError::Malformed(err.to_string()))?;
    Ok(normalize_response(raw))
}

/// Send one code string to the snippet route and normalize the response.
pub async fn analyze_snippet(url: &str, code: &str) -> Result<SnippetResult, UploadError> {
    let payload = serde_json::to_string(&AnalyzeRequest {
        code: code.to_string(),
    })
    .map_err(|err| UploadError::Malformed(err.to_string()))?;

    let headers = Headers::new().map_err(js_transport)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_transport)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&payload));

    let body = fetch_text(url, &init).await?;
    let raw: RawSnippetResponse =
        serde_json::from_str(&body).map_err(|err| UploadError::Malformed(err.to_string()))?;
    Ok(normalize_snippet(raw))
}

async fn fetch_text(url: &str, init: &RequestInit) -> Result<String, UploadError> {
    let request = Request::new_with_str_and_init(url, init).map_err(js_transport)?;
    let window =
        web_sys::window().ok_or_else(|| UploadError::Transport("no window object".into()))?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_transport)?
        .dyn_into()
        .map_err(js_transport)?;

    if !response.ok() {
        return Err(UploadError::Status(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(js_transport)?)
        .await
        .map_err(js_transport)?;
    text.as_string()
        .ok_or_else(|| UploadError::Transport("response body was not text".into()))
}

fn js_transport(err: JsValue) -> UploadError {
    let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    UploadError::Transport(message)
}

/// One-shot failure notification: logged to the console and surfaced via a
/// blocking dialog, then forgotten. No retry queue.
pub fn notify(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
