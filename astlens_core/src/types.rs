//! Canonical data model for analysis results.
//!
//! These types describe the *normalized* shape of a backend response: every
//! file result carries a full [`RuleCheck`], every sequence is present even
//! when empty. The lenient wire shapes live in [`crate::protocol`]; the
//! defaulting pass that converts one into the other lives in
//! [`crate::normalize`]. Display code built on these types never has to
//! branch on a missing substructure.
//!
//! # Example
//!
//! ```rust
//! use astlens_core::types::{AnalysisResponse, FileResult, RuleCheck};
//!
//! let response = AnalysisResponse {
//!     languages: vec!["python".into()],
//!     results: [(
//!         "python".into(),
//!         vec![FileResult {
//!             filename: "app/main.py".into(),
//!             ast: serde_json::json!({"type": "Module"}),
//!             rule_check: RuleCheck::default(),
//!         }],
//!     )]
//!     .into(),
//!     semgrep: None,
//! };
//!
//! assert_eq!(response.default_language(), Some("python"));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One collected file, ready for upload.
///
/// Produced by the file collector from a drag-drop or directory-picker
/// payload, consumed exactly once by the upload transmitter, then discarded.
/// The relative path doubles as the multipart part filename and is the only
/// identifier the backend echoes back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// Directory-relative path, or the bare filename when the source
    /// provided none.
    pub relative_path: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

impl FileEntry {
    /// Build an entry, preferring the directory-relative path over the bare
    /// filename. Browsers report an empty `webkitRelativePath` for files
    /// picked outside a directory selection.
    pub fn new(relative_path: &str, fallback_name: &str, content: Vec<u8>) -> Self {
        let path = if relative_path.is_empty() {
            fallback_name
        } else {
            relative_path
        };
        Self {
            relative_path: path.to_string(),
            content,
        }
    }
}

/// A single vulnerability reported by the backend.
///
/// Everything beyond the free-form description is optional on the wire.
/// The accessor methods substitute rendering defaults so display code never
/// needs fallback logic of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vulnerability {
    /// Vulnerability class, e.g. "SQL Injection".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Severity label as sent by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Primary description field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Alternate description field used by the snippet endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// 1-indexed source line, when the rule could attribute one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    /// Identifier of the rule that fired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl Vulnerability {
    /// Human-readable description: `message`, else `detail`, else empty.
    pub fn description(&self) -> &str {
        self.message
            .as_deref()
            .or(self.detail.as_deref())
            .unwrap_or("")
    }

    /// Severity for display; unspecified severities render as "High".
    pub fn severity_label(&self) -> &str {
        self.severity.as_deref().unwrap_or("High")
    }

    /// Vulnerability class for display.
    pub fn kind_label(&self) -> &str {
        self.kind.as_deref().unwrap_or("Vulnerability")
    }

    /// Rule identifier for display.
    pub fn rule_label(&self) -> &str {
        self.rule_id.as_deref().unwrap_or("No rule ID")
    }
}

/// Combined rule-violation and vulnerability report for one file.
///
/// After normalization all three sequences are present; an empty check is a
/// perfectly ordinary "nothing found" result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleCheck {
    /// Names of the rules that were evaluated or violated.
    pub rules: Vec<String>,
    /// Vulnerabilities detected in the file.
    pub vulnerabilities: Vec<Vulnerability>,
    /// Remediation suggestions.
    pub recommendations: Vec<String>,
}

/// Normalized analysis result for one uploaded file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    /// Relative path of the file, as echoed back by the backend.
    pub filename: String,
    /// Opaque abstract-syntax-tree payload; rendered verbatim.
    #[serde(default)]
    pub ast: Value,
    /// Rule-check substructure. Always present after normalization.
    #[serde(default)]
    pub rule_check: RuleCheck,
}

impl FileResult {
    /// Pretty-printed AST for the expandable panel.
    pub fn ast_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.ast).unwrap_or_default()
    }

    /// Pretty-printed raw rule-check data for the details block.
    pub fn rule_check_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.rule_check).unwrap_or_default()
    }
}

/// Normalized batch-upload response: a language-keyed index of file results.
///
/// `languages` preserves the server's order (first occurrence wins) and is
/// the authoritative iteration order; `results` buckets preserve file order
/// exactly as received.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisResponse {
    /// Unique language names, in first-seen order.
    pub languages: Vec<String>,
    /// Per-language file results.
    pub results: HashMap<String, Vec<FileResult>>,
    /// Opaque semgrep payload, forwarded verbatim to the detail view.
    pub semgrep: Option<Value>,
}

impl AnalysisResponse {
    /// Candidate default selection: the first language the server listed.
    pub fn default_language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }

    /// File results for one language; empty for unknown languages.
    pub fn files(&self, language: &str) -> &[FileResult] {
        self.results.get(language).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Result of the single-snippet path. Replaced wholesale on each request,
/// never merged with prior state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnippetResult {
    /// Language the backend detected.
    pub language: String,
    /// Opaque abstract-syntax-tree payload.
    pub ast: Value,
    /// Syntax/semantic error lines.
    pub errors: Vec<String>,
    /// Vulnerabilities detected in the snippet.
    pub vulnerabilities: Vec<Vulnerability>,
    /// Remediation suggestions (the server's `rules` field).
    pub recommendations: Vec<String>,
}

impl SnippetResult {
    /// Pretty-printed AST for the AST view.
    pub fn ast_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.ast).unwrap_or_default()
    }

    /// Text for the errors view: joined error lines, or the all-clear note.
    pub fn errors_text(&self) -> String {
        if self.errors.is_empty() {
            "No syntax/semantic errors".to_string()
        } else {
            self.errors.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn entry_prefers_relative_path() {
        let entry = FileEntry::new("src/app/main.py", "main.py", vec![1, 2]);
        assert_eq!(entry.relative_path, "src/app/main.py");
    }

    #[test]
    fn entry_falls_back_to_bare_name() {
        let entry = FileEntry::new("", "main.py", vec![]);
        assert_eq!(entry.relative_path, "main.py");
    }

    #[test]
    fn vulnerability_defaults_degrade_gracefully() {
        let vuln = Vulnerability::default();
        assert_eq!(vuln.description(), "");
        assert_eq!(vuln.severity_label(), "High");
        assert_eq!(vuln.kind_label(), "Vulnerability");
        assert_eq!(vuln.rule_label(), "No rule ID");
    }

    #[test]
    fn vulnerability_description_prefers_message_over_detail() {
        let vuln = Vulnerability {
            message: Some("eval() call".into()),
            detail: Some("dynamic execution".into()),
            ..Default::default()
        };
        assert_eq!(vuln.description(), "eval() call");

        let detail_only = Vulnerability {
            detail: Some("dynamic execution".into()),
            ..Default::default()
        };
        assert_eq!(detail_only.description(), "dynamic execution");
    }

    #[test]
    fn vulnerability_wire_field_is_type() {
        let vuln: Vulnerability =
            serde_json::from_value(serde_json::json!({"type": "XSS", "line": 7})).unwrap();
        assert_eq!(vuln.kind.as_deref(), Some("XSS"));
        assert_eq!(vuln.line, Some(7));
    }

    #[test]
    fn files_for_unknown_language_is_empty() {
        let response = AnalysisResponse::default();
        assert!(response.files("cobol").is_empty());
        assert_eq!(response.default_language(), None);
    }

    #[test]
    fn errors_text_falls_back_to_all_clear() {
        let clean = SnippetResult::default();
        assert_eq!(clean.errors_text(), "No syntax/semantic errors");

        let broken = SnippetResult {
            errors: vec!["line 1: unexpected token".into(), "line 9: EOF".into()],
            ..Default::default()
        };
        assert_eq!(broken.errors_text(), "line 1: unexpected token\nline 9: EOF");
    }
}
