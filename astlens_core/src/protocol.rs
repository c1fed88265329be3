//! Wire contract shared with the analysis backend.
//!
//! Endpoint routes, the multipart upload contract, and the *raw* response
//! shapes as the backend actually sends them: partially optional, with
//! `null` and missing fields absorbed by `#[serde(default)]`. Raw shapes are
//! repaired into the canonical [`crate::types`] model by
//! [`crate::normalize`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{AnalysisResponse, FileEntry, RuleCheck, Vulnerability};

/// Development backend host. Endpoint hosts are configuration constants,
/// never negotiated at runtime.
pub const DEFAULT_BASE: &str = "http://localhost:8000";

/// Multipart field name shared by every uploaded file part.
pub const UPLOAD_FIELD: &str = "files";

/// The three backend routes the client consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Scheme + host + port, without a trailing slash.
    pub base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Endpoints against a non-default host (tests, staging).
    pub fn with_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Batch upload route for the standard folder surface.
    pub fn folder_upload(&self) -> String {
        format!("{}/api/folder_upload/", self.base)
    }

    /// Batch upload route for the semgrep-enabled folder surface.
    pub fn folder(&self) -> String {
        format!("{}/api/folder/", self.base)
    }

    /// Single-snippet analysis route.
    pub fn analyze(&self) -> String {
        format!("{}/analyze/", self.base)
    }
}

/// Request body for the single-snippet route.
#[derive(Clone, Debug, Serialize)]
pub struct AnalyzeRequest {
    /// The code buffer, verbatim.
    pub code: String,
}

/// Multipart parts for a batch upload: one `(field, filename, bytes)` triple
/// per collected entry, in collection order. The transmitter maps each triple
/// onto one `FormData` part; keeping the projection here makes the upload
/// contract testable off-wasm.
pub fn form_parts(entries: &[FileEntry]) -> impl Iterator<Item = (&'static str, &str, &[u8])> {
    entries
        .iter()
        .map(|entry| (UPLOAD_FIELD, entry.relative_path.as_str(), entry.content.as_slice()))
}

/// Raw batch response, exactly as decoded from the response body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAnalysisResponse {
    /// Language list; may repeat or be absent entirely.
    pub languages: Vec<String>,
    /// Per-language file results.
    pub results: HashMap<String, Vec<RawFileResult>>,
    /// Opaque semgrep payload (only the `/api/folder/` surface sends it).
    #[serde(rename = "semgrepResults", skip_serializing_if = "Option::is_none")]
    pub semgrep_results: Option<Value>,
}

/// Raw per-file result; `rule_check` may be `null` or missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFileResult {
    /// Relative path of the analyzed file.
    pub filename: String,
    /// Opaque AST payload.
    pub ast: Value,
    /// Rule-check substructure, when the backend produced one.
    pub rule_check: Option<RuleCheck>,
}

/// Raw single-snippet response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnippetResponse {
    /// Language the backend detected.
    pub language: String,
    /// Analysis payload.
    pub result: RawSnippetResult,
}

/// Inner payload of the snippet response. The server calls its
/// recommendation list `rules`; the client renames it during normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnippetResult {
    /// Opaque AST payload.
    pub ast: Value,
    /// Syntax/semantic error lines.
    pub errors: Vec<String>,
    /// Vulnerabilities detected in the snippet.
    pub vulnerabilities: Vec<Vulnerability>,
    /// Remediation suggestions (surfaced to the user as recommendations).
    pub rules: Vec<String>,
}

impl From<AnalysisResponse> for RawAnalysisResponse {
    /// Project a normalized response back onto the wire shape. Used to check
    /// that normalization is idempotent.
    fn from(response: AnalysisResponse) -> Self {
        Self {
            languages: response.languages,
            results: response
                .results
                .into_iter()
                .map(|(language, files)| {
                    let files = files
                        .into_iter()
                        .map(|file| RawFileResult {
                            filename: file.filename,
                            ast: file.ast,
                            rule_check: Some(file.rule_check),
                        })
                        .collect();
                    (language, files)
                })
                .collect(),
            semgrep_results: response.semgrep,
        }
    }
}
