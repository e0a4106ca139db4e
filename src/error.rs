use thiserror::Error;

/// Shown when the processing service gives no usable explanation.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred. Check the backend logs.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server returned HTTP {status}")]
    Server { status: u16, detail: Option<String> },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Resource error: {0}")]
    Resource(String),
}

impl SubmitError {
    /// Server-supplied explanation, if any. Only an empty string counts as absent.
    pub fn detail(&self) -> Option<&str> {
        match self {
            SubmitError::Server {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => Some(detail.as_str()),
            _ => None,
        }
    }

    /// The single line shown to the operator when a submission fails.
    pub fn user_message(&self) -> String {
        format!("Pipeline failed: {}", self.detail().unwrap_or(UNKNOWN_ERROR))
    }
}

impl From<gloo_net::Error> for SubmitError {
    fn from(err: gloo_net::Error) -> Self {
        SubmitError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_detail_is_surfaced_verbatim() {
        let err = SubmitError::Server {
            status: 422,
            detail: Some("Date range too large".to_string()),
        };
        assert_eq!(err.user_message(), "Pipeline failed: Date range too large");
    }

    #[test]
    fn test_missing_or_empty_detail_uses_fallback() {
        let missing = SubmitError::Server {
            status: 500,
            detail: None,
        };
        let empty = SubmitError::Server {
            status: 500,
            detail: Some(String::new()),
        };
        let expected = "Pipeline failed: An unknown error occurred. Check the backend logs.";
        assert_eq!(missing.user_message(), expected);
        assert_eq!(empty.user_message(), expected);
    }

    #[test]
    fn test_whitespace_detail_is_kept_verbatim() {
        let err = SubmitError::Server {
            status: 400,
            detail: Some("  ".to_string()),
        };
        assert_eq!(err.detail(), Some("  "));
        assert_eq!(err.user_message(), "Pipeline failed:   ");
    }

    #[test]
    fn test_transport_and_decode_errors_never_leak_internals() {
        let transport = SubmitError::Transport("NetworkError when attempting to fetch".into());
        let decode = SubmitError::Decode("expected value at line 1".into());
        assert!(transport.detail().is_none());
        assert!(!decode.user_message().contains("line 1"));
    }
}
