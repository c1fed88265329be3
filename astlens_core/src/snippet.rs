//! State for the single-snippet analysis panel.
//!
//! A narrower sibling of [`crate::state::DisplayState`]: one code string
//! goes out, one [`SnippetResult`] comes back, and three named views render
//! different slices of that same result. Each explicit analyze action
//! triggers exactly one fresh request and replaces the cached result
//! wholesale; switching the rendered view never refetches by itself.

use crate::types::SnippetResult;

/// The three named views over one snippet result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnippetView {
    /// Pretty-printed abstract syntax tree.
    Ast,
    /// Syntax/semantic error lines.
    Errors,
    /// Detected language, vulnerabilities, and recommendations.
    Security,
}

/// Panel state: the most recent result, which view is active, and the
/// in-flight flag.
#[derive(Clone, Debug, Default)]
pub struct SnippetState {
    result: Option<SnippetResult>,
    view: Option<SnippetView>,
    loading: bool,
}

impl SnippetState {
    /// Fresh panel: no result, no active view, not loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an analyze action as started; refuses re-entrant requests like
    /// the batch controller does.
    pub fn begin_submit(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Install a fresh result and activate the view that requested it. The
    /// previous result is replaced wholesale, never merged.
    pub fn apply_result(&mut self, view: SnippetView, result: SnippetResult) {
        self.view = Some(view);
        self.result = Some(result);
        self.loading = false;
    }

    /// Release the loading flag after a failed request; the previously
    /// displayed result and view stay as they were.
    pub fn fail_submit(&mut self) {
        self.loading = false;
    }

    /// Whether an analyze request is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The view whose button most recently completed a request.
    pub fn view(&self) -> Option<SnippetView> {
        self.view
    }

    /// The cached result all three views render from.
    pub fn result(&self) -> Option<&SnippetResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(language: &str) -> SnippetResult {
        SnippetResult {
            language: language.into(),
            ast: serde_json::json!({"type": "Module"}),
            errors: vec![],
            vulnerabilities: vec![],
            recommendations: vec!["Pin dependencies".into()],
        }
    }

    #[test]
    fn result_is_replaced_wholesale() {
        let mut state = SnippetState::new();
        assert!(state.begin_submit());
        state.apply_result(SnippetView::Ast, sample("python"));
        assert_eq!(state.view(), Some(SnippetView::Ast));

        assert!(state.begin_submit());
        state.apply_result(SnippetView::Security, sample("javascript"));
        assert_eq!(state.view(), Some(SnippetView::Security));
        assert_eq!(state.result().unwrap().language, "javascript");
        assert!(!state.loading());
    }

    #[test]
    fn failure_keeps_previous_view_and_result() {
        let mut state = SnippetState::new();
        assert!(state.begin_submit());
        state.apply_result(SnippetView::Errors, sample("python"));

        assert!(state.begin_submit());
        state.fail_submit();
        assert!(!state.loading());
        assert_eq!(state.view(), Some(SnippetView::Errors));
        assert_eq!(state.result().unwrap().language, "python");
    }

    #[test]
    fn reentrant_analyze_is_refused_while_loading() {
        let mut state = SnippetState::new();
        assert!(state.begin_submit());
        assert!(!state.begin_submit());
    }
}
