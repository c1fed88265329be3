//! Defaulting/repair pass applied to server responses before display.
//!
//! A pure function from the raw wire shapes in [`crate::protocol`] to the
//! canonical model in [`crate::types`]: no network, no state, same input
//! always yields the same output. Missing substructures are substituted with
//! empty defaults so the display layer never meets an absent field; ordering
//! is preserved exactly as received.

use tracing::debug;

use crate::protocol::{RawAnalysisResponse, RawFileResult, RawSnippetResponse};
use crate::types::{AnalysisResponse, FileResult, RuleCheck, SnippetResult};

/// Normalize a raw batch response into the canonical per-language index.
///
/// Repairs applied:
///
/// - duplicate language names are dropped (first occurrence wins);
/// - result buckets whose key is missing from the language list are appended
///   in sorted order, so returned data is never unreachable;
/// - a missing or `null` `rule_check` becomes [`RuleCheck::default()`], and
///   missing sequences inside it become empty vectors.
///
/// Idempotent: normalizing an already-normalized response yields an
/// identical structure.
pub fn normalize_response(raw: RawAnalysisResponse) -> AnalysisResponse {
    let mut languages: Vec<String> = Vec::with_capacity(raw.languages.len());
    for language in raw.languages {
        if !languages.contains(&language) {
            languages.push(language);
        }
    }

    let mut orphaned: Vec<&String> = raw
        .results
        .keys()
        .filter(|key| !languages.contains(key))
        .collect();
    if !orphaned.is_empty() {
        orphaned.sort();
        debug!(count = orphaned.len(), "result buckets missing from language list");
        languages.extend(orphaned.into_iter().cloned());
    }

    let results = raw
        .results
        .into_iter()
        .map(|(language, files)| {
            let files = files.into_iter().map(normalize_file).collect();
            (language, files)
        })
        .collect();

    AnalysisResponse {
        languages,
        results,
        semgrep: raw.semgrep_results,
    }
}

fn normalize_file(raw: RawFileResult) -> FileResult {
    let rule_check = match raw.rule_check {
        Some(rule_check) => rule_check,
        None => {
            debug!(file = %raw.filename, "missing rule_check, substituting empty default");
            RuleCheck::default()
        }
    };
    FileResult {
        filename: raw.filename,
        ast: raw.ast,
        rule_check,
    }
}

/// Normalize a raw single-snippet response.
///
/// The server's `result.rules` field is surfaced as `recommendations`; every
/// sequence is present, possibly empty.
pub fn normalize_snippet(raw: RawSnippetResponse) -> SnippetResult {
    SnippetResult {
        language: raw.language,
        ast: raw.result.ast,
        errors: raw.result.errors,
        vulnerabilities: raw.result.vulnerabilities,
        recommendations: raw.result.rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw_batch(value: serde_json::Value) -> RawAnalysisResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_rule_check_becomes_empty_default() {
        let raw = raw_batch(json!({
            "languages": ["python", "java"],
            "results": {
                "python": [{"filename": "a.py", "ast": {}, "rule_check": null}],
                "java": [],
            },
        }));

        let normalized = normalize_response(raw);
        assert_eq!(normalized.default_language(), Some("python"));
        assert_eq!(
            normalized.files("python")[0].rule_check,
            RuleCheck {
                rules: vec![],
                vulnerabilities: vec![],
                recommendations: vec![],
            }
        );
    }

    #[test]
    fn missing_sequences_become_empty_not_absent() {
        let raw = raw_batch(json!({
            "languages": ["python"],
            "results": {
                "python": [{
                    "filename": "a.py",
                    "ast": {},
                    "rule_check": {"rules": ["no-eval"]},
                }],
            },
        }));

        let normalized = normalize_response(raw);
        let rule_check = &normalized.files("python")[0].rule_check;
        assert_eq!(rule_check.rules, vec!["no-eval".to_string()]);
        assert!(rule_check.vulnerabilities.is_empty());
        assert!(rule_check.recommendations.is_empty());
    }

    #[test]
    fn file_and_language_order_is_preserved() {
        let raw = raw_batch(json!({
            "languages": ["java", "python"],
            "results": {
                "python": [
                    {"filename": "z.py", "ast": {}},
                    {"filename": "a.py", "ast": {}},
                ],
            },
        }));

        let normalized = normalize_response(raw);
        assert_eq!(normalized.languages, vec!["java", "python"]);
        let filenames: Vec<_> = normalized
            .files("python")
            .iter()
            .map(|f| f.filename.as_str())
            .collect();
        assert_eq!(filenames, vec!["z.py", "a.py"]);
    }

    #[test]
    fn duplicate_languages_keep_first_occurrence() {
        let raw = raw_batch(json!({
            "languages": ["python", "java", "python"],
            "results": {},
        }));
        assert_eq!(normalize_response(raw).languages, vec!["python", "java"]);
    }

    #[test]
    fn orphaned_result_buckets_are_appended_sorted() {
        let raw = raw_batch(json!({
            "languages": ["python"],
            "results": {
                "python": [],
                "ruby": [{"filename": "x.rb", "ast": {}}],
                "go": [{"filename": "x.go", "ast": {}}],
            },
        }));

        let normalized = normalize_response(raw);
        assert_eq!(normalized.languages, vec!["python", "go", "ruby"]);
        assert_eq!(normalized.files("ruby").len(), 1);
    }

    #[test]
    fn empty_language_list_leaves_selection_unset() {
        let normalized = normalize_response(raw_batch(json!({})));
        assert_eq!(normalized.default_language(), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = raw_batch(json!({
            "languages": ["python", "python", "java"],
            "results": {
                "python": [
                    {"filename": "a.py", "ast": {"type": "Module"}, "rule_check": null},
                    {"filename": "b.py", "ast": {}},
                ],
                "rust": [{"filename": "lib.rs", "ast": {}}],
            },
            "semgrepResults": {"findings": []},
        }));

        let once = normalize_response(raw);
        let twice = normalize_response(once.clone().into());
        assert_eq!(once, twice);
    }

    #[test]
    fn semgrep_payload_is_forwarded_verbatim() {
        let raw = raw_batch(json!({
            "languages": [],
            "results": {},
            "semgrepResults": {"findings": [{"check_id": "rules.eval"}]},
        }));
        assert_eq!(
            normalize_response(raw).semgrep,
            Some(json!({"findings": [{"check_id": "rules.eval"}]}))
        );
    }

    #[test]
    fn snippet_rules_surface_as_recommendations() {
        let raw: RawSnippetResponse = serde_json::from_value(json!({
            "language": "python",
            "result": {
                "ast": {"type": "Module"},
                "errors": [],
                "vulnerabilities": [{"detail": "eval() call", "line": 3}],
                "rules": ["Avoid eval()"],
            },
        }))
        .unwrap();

        let snippet = normalize_snippet(raw);
        assert_eq!(snippet.language, "python");
        assert_eq!(snippet.recommendations, vec!["Avoid eval()".to_string()]);
        assert_eq!(snippet.vulnerabilities[0].description(), "eval() call");
        assert!(snippet.errors.is_empty());
    }

    #[test]
    fn snippet_tolerates_missing_result_fields() {
        let raw: RawSnippetResponse =
            serde_json::from_value(json!({"language": "js", "result": {}})).unwrap();
        let snippet = normalize_snippet(raw);
        assert!(snippet.errors.is_empty());
        assert!(snippet.vulnerabilities.is_empty());
        assert!(snippet.recommendations.is_empty());
    }
}
