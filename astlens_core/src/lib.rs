//! # astlens-core
//!
//! Upload orchestration and display state machine for the astlens analysis
//! client. The crate is platform-independent: no DOM, no network, no wasm
//! bindings — just the data model, the wire contract, the response
//! normalizer, and the state controllers the browser app drives from its
//! event handlers. Everything here is unit-tested off-wasm.
//!
//! ## Modules
//!
//! - [`types`] - canonical (normalized) data model
//! - [`protocol`] - endpoint routes and raw wire shapes
//! - [`normalize`] - the defaulting/repair pass applied to every response
//! - [`state`] - display state machine for the batch upload surfaces
//! - [`snippet`] - state for the single-snippet panel
//! - [`error`] - upload error taxonomy
//!
//! ## Quick start
//!
//! ```rust
//! use astlens_core::{normalize::normalize_response, state::DisplayState};
//!
//! let raw = serde_json::from_str(
//!     r#"{"languages": ["python"], "results": {"python": []}}"#,
//! )
//! .unwrap();
//!
//! let mut state = DisplayState::new();
//! assert!(state.begin_submit());
//! state.apply_response(normalize_response(raw));
//! assert_eq!(state.selected_language(), Some("python"));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod normalize;
pub mod protocol;
pub mod snippet;
pub mod state;
pub mod types;

pub use error::UploadError;
pub use normalize::{normalize_response, normalize_snippet};
pub use protocol::Endpoints;
pub use snippet::{SnippetState, SnippetView};
pub use state::{DisplayState, EmptyState};
pub use types::{AnalysisResponse, FileEntry, FileResult, RuleCheck, SnippetResult, Vulnerability};
