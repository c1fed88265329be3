//! Display state machine for the batch upload surfaces.
//!
//! [`DisplayState`] is the single shared resource of the client: it owns the
//! normalized results plus every UI-facing flag, and it is mutated only in
//! response to discrete events (a submission starting, a response landing, a
//! keystroke, a toggle). The app wraps one instance in a reactive signal and
//! applies each mutation in a single update, so partial states are never
//! observable.

use std::collections::HashSet;

use tracing::warn;

use crate::types::{AnalysisResponse, FileResult};

/// The three distinguishable "nothing to show" conditions.
///
/// Each gets its own affordance in the UI: the pre-upload placeholder, the
/// empty language bucket, and the fruitless search (which offers a
/// "clear search" action).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    /// No request has completed yet.
    NoResultsYet,
    /// A request completed but the selected language has zero files.
    NoFiles,
    /// The search term matched nothing in a non-empty language bucket.
    NoMatch,
}

/// UI-facing state for one upload surface.
///
/// Invariants maintained by the mutating methods:
///
/// - once results exist, `selected_language` names a key of
///   `results.languages`; clearing results resets it;
/// - `loading` is true exactly between submission start and completion;
/// - AST visibility is an explicit set with default-false membership, keyed
///   by the full relative path so same-named files in different directories
///   cannot collide.
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    results: Option<AnalysisResponse>,
    selected_language: Option<String>,
    search_term: String,
    ast_visible: HashSet<String>,
    loading: bool,
}

impl DisplayState {
    /// Fresh state: no results, nothing selected, not loading.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- submission lifecycle ----

    /// Mark a submission as started. Returns `false` (and changes nothing)
    /// while another submission is in flight; the caller must drop the
    /// event, not queue it.
    pub fn begin_submit(&mut self) -> bool {
        if self.loading {
            warn!("submission ignored, another upload is in flight");
            return false;
        }
        self.loading = true;
        true
    }

    /// Apply a successful response: replace the results wholesale and select
    /// the server's default language. Search term and AST visibility flags
    /// persist so re-selecting a language restores prior visibility.
    pub fn apply_response(&mut self, response: AnalysisResponse) {
        self.selected_language = response.default_language().map(str::to_owned);
        self.results = Some(response);
        self.loading = false;
    }

    /// Record a failed submission. Previously displayed results and the
    /// selection stay untouched; only the loading flag is released.
    pub fn fail_submit(&mut self) {
        self.loading = false;
    }

    /// Discard all results and UI flags.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a submission is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    // ---- results access ----

    /// The normalized results of the last successful request, if any.
    pub fn results(&self) -> Option<&AnalysisResponse> {
        self.results.as_ref()
    }

    /// Whether any request has completed successfully.
    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    /// Known languages, in the normalized (first-seen) order.
    pub fn languages(&self) -> &[String] {
        self.results
            .as_ref()
            .map(|r| r.languages.as_slice())
            .unwrap_or(&[])
    }

    // ---- language selection ----

    /// Currently selected language, always a known key once results exist.
    pub fn selected_language(&self) -> Option<&str> {
        self.selected_language.as_deref()
    }

    /// Select a language. Unknown names are ignored so the invariant that
    /// the selection is always a known key cannot be broken from the UI.
    pub fn select_language(&mut self, language: &str) {
        if self.languages().iter().any(|known| known == language) {
            self.selected_language = Some(language.to_string());
        } else {
            warn!(language, "ignoring selection of unknown language");
        }
    }

    // ---- search ----

    /// Current filename filter, possibly empty.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replace the filename filter.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// The "clear search" affordance of the no-match empty state.
    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    // ---- AST visibility ----

    /// Flip the AST panel for exactly one path. Toggling twice restores the
    /// prior state; other paths are unaffected.
    pub fn toggle_ast(&mut self, path: &str) {
        if !self.ast_visible.remove(path) {
            self.ast_visible.insert(path.to_string());
        }
    }

    /// Default-false membership test.
    pub fn is_ast_visible(&self, path: &str) -> bool {
        self.ast_visible.contains(path)
    }

    // ---- derived projections ----

    /// Files of the selected language whose name contains the search term as
    /// a case-insensitive substring, in bucket order. An empty term yields
    /// the unfiltered bucket. Recomputed on every keystroke and every
    /// language change.
    pub fn visible_files(&self) -> Vec<&FileResult> {
        let bucket = self.selected_bucket();
        if self.search_term.is_empty() {
            return bucket.iter().collect();
        }
        let needle = self.search_term.to_lowercase();
        bucket
            .iter()
            .filter(|file| file.filename.to_lowercase().contains(&needle))
            .collect()
    }

    /// Which empty condition applies, if any. `None` means there are files
    /// to display.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.results.is_none() {
            return Some(EmptyState::NoResultsYet);
        }
        if self.selected_bucket().is_empty() {
            return Some(EmptyState::NoFiles);
        }
        if self.visible_files().is_empty() {
            return Some(EmptyState::NoMatch);
        }
        None
    }

    fn selected_bucket(&self) -> &[FileResult] {
        match (&self.results, &self.selected_language) {
            (Some(results), Some(language)) => results.files(language),
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::normalize::normalize_response;

    fn two_language_state() -> DisplayState {
        let raw = serde_json::from_value(json!({
            "languages": ["python", "java"],
            "results": {
                "python": [
                    {"filename": "a.py", "ast": {}, "rule_check": null},
                    {"filename": "b.py", "ast": {}},
                    {"filename": "src/B.py", "ast": {}},
                ],
                "java": [],
            },
        }))
        .unwrap();

        let mut state = DisplayState::new();
        assert!(state.begin_submit());
        state.apply_response(normalize_response(raw));
        state
    }

    #[test]
    fn response_selects_first_language_and_defaults_rule_check() {
        let state = two_language_state();
        assert_eq!(state.selected_language(), Some("python"));
        assert!(state.visible_files()[0].rule_check.vulnerabilities.is_empty());
        assert!(!state.loading());
    }

    #[test]
    fn loading_is_true_exactly_during_submission() {
        let mut state = DisplayState::new();
        assert!(!state.loading());
        assert!(state.begin_submit());
        assert!(state.loading());
        state.fail_submit();
        assert!(!state.loading());
    }

    #[test]
    fn reentrant_submissions_are_refused() {
        let mut state = DisplayState::new();
        assert!(state.begin_submit());
        assert!(!state.begin_submit());
        assert!(state.loading());
    }

    #[test]
    fn failure_preserves_prior_results() {
        let mut state = two_language_state();
        state.set_search_term("a");
        let before = state.visible_files().len();

        assert!(state.begin_submit());
        state.fail_submit();

        assert!(!state.loading());
        assert_eq!(state.selected_language(), Some("python"));
        assert_eq!(state.visible_files().len(), before);
    }

    #[test]
    fn search_filters_case_insensitive_substring() {
        let mut state = two_language_state();

        state.set_search_term("a.py");
        let names: Vec<_> = state.visible_files().iter().map(|f| &f.filename).collect();
        assert_eq!(names, vec!["a.py"]);

        state.set_search_term("B.PY");
        let names: Vec<_> = state.visible_files().iter().map(|f| &f.filename).collect();
        assert_eq!(names, vec!["b.py", "src/B.py"]);
    }

    #[test]
    fn empty_search_term_is_identity() {
        let mut state = two_language_state();
        state.set_search_term("b");
        state.clear_search();
        assert_eq!(state.visible_files().len(), 3);
    }

    #[test]
    fn toggle_is_an_involution_and_independent_per_path() {
        let mut state = two_language_state();

        assert!(!state.is_ast_visible("a.py"));
        state.toggle_ast("a.py");
        assert!(state.is_ast_visible("a.py"));
        assert!(!state.is_ast_visible("b.py"));
        state.toggle_ast("a.py");
        assert!(!state.is_ast_visible("a.py"));
    }

    #[test]
    fn visibility_keyed_by_full_path_survives_language_switches() {
        let mut state = two_language_state();
        state.toggle_ast("src/B.py");

        state.select_language("java");
        state.select_language("python");
        assert!(state.is_ast_visible("src/B.py"));
        assert!(!state.is_ast_visible("B.py"));
    }

    #[test]
    fn unknown_language_selection_is_ignored() {
        let mut state = two_language_state();
        state.select_language("cobol");
        assert_eq!(state.selected_language(), Some("python"));
    }

    #[test]
    fn empty_states_are_distinguishable() {
        let mut state = DisplayState::new();
        assert_eq!(state.empty_state(), Some(EmptyState::NoResultsYet));

        state = two_language_state();
        assert_eq!(state.empty_state(), None);

        state.select_language("java");
        assert_eq!(state.empty_state(), Some(EmptyState::NoFiles));

        state.select_language("python");
        state.set_search_term("no-such-file");
        assert_eq!(state.empty_state(), Some(EmptyState::NoMatch));
    }

    #[test]
    fn selection_does_not_disturb_search_or_visibility() {
        let mut state = two_language_state();
        state.set_search_term("a");
        state.toggle_ast("a.py");

        state.select_language("java");
        assert_eq!(state.search_term(), "a");
        assert!(state.is_ast_visible("a.py"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = two_language_state();
        state.set_search_term("a");
        state.toggle_ast("a.py");

        state.reset();
        assert!(state.results().is_none());
        assert_eq!(state.selected_language(), None);
        assert_eq!(state.search_term(), "");
        assert!(!state.is_ast_visible("a.py"));
        assert_eq!(state.empty_state(), Some(EmptyState::NoResultsYet));
    }
}
