//! Error taxonomy for note data providers.
//!
//! Every variant is caught at the operation boundary in the event loop and
//! rendered as an inline error panel; none of them abort the UI.

use thiserror::Error;

/// Failure reported by a note source.
///
/// An empty result is not an error. Providers return empty collections for
/// "nothing matched" and the list widget renders a placeholder for them.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure: connection refused, timeout, broken body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code of the response
        status: reqwest::StatusCode,
        /// Response body text, if any
        body: String,
    },

    /// The response parsed as JSON but did not carry the expected fields.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// The local notes file could not be read.
    #[error("failed to load local notes: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message() {
        let err = SourceError::Shape("note carries no text field".to_string());
        assert_eq!(
            err.to_string(),
            "unexpected response shape: note carries no text field"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = SourceError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "gone".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("gone"));
    }
}
