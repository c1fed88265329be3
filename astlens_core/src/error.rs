//! Error taxonomy for the upload paths.

use thiserror::Error;

/// Why a request produced no usable response.
///
/// Every variant is surfaced the same way: one user-visible notification,
/// the loading flag released, previously displayed results untouched. An
/// unparseable top-level body counts as a transport-class failure; field
/// level gaps are absorbed by normalization and never reach here.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The request never completed (network unreachable, CORS, aborted).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The body arrived but was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_one_liners() {
        assert_eq!(
            UploadError::Status(500).to_string(),
            "server returned HTTP 500"
        );
        assert_eq!(
            UploadError::Transport("connection refused".into()).to_string(),
            "request failed: connection refused"
        );
    }
}
