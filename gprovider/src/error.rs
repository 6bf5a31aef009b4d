//! Shared provider error kinds and error value helpers.
//!
//! ```rust
//! use gprovider::{HttpFailure, ProviderError, ProviderErrorKind};
//!
//! let auth = ProviderError::authentication("bad key");
//! assert!(!auth.retryable);
//!
//! let failed = ProviderError::transport("upstream exploded")
//!     .with_http_failure(HttpFailure::new(500, "{}", "oops"));
//! assert_eq!(failed.kind, ProviderErrorKind::Transport);
//! assert_eq!(failed.status(), Some(500));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Authentication,
    RateLimited,
    InvalidRequest,
    Timeout,
    Transport,
    Unavailable,
    Decode,
    Other,
}

/// Raw exchange captured when an endpoint answers with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFailure {
    pub status: u16,
    pub request_json: String,
    pub response_body: String,
}

impl HttpFailure {
    pub fn new(
        status: u16,
        request_json: impl Into<String>,
        response_body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            request_json: request_json.into(),
            response_body: response_body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    pub retryable: bool,
    pub http: Option<HttpFailure>,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
            http: None,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message, false)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message, true)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message, false)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message, true)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message, true)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message, true)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Decode, message, false)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message, false)
    }

    pub fn with_http_failure(mut self, failure: HttpFailure) -> Self {
        self.http = Some(failure);
        self
    }

    pub fn status(&self) -> Option<u16> {
        self.http.as_ref().map(|failure| failure.status)
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.http {
            Some(failure) => write!(
                f,
                "{:?} [status={}]: {}",
                self.kind, failure.status, self.message
            ),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_builders_assign_expected_retryability() {
        let auth = ProviderError::authentication("bad key");
        assert!(!auth.retryable);
        assert_eq!(auth.kind, ProviderErrorKind::Authentication);

        let timeout = ProviderError::timeout("request timed out");
        assert!(timeout.retryable);
        assert_eq!(timeout.kind, ProviderErrorKind::Timeout);

        let decode = ProviderError::decode("not json");
        assert!(!decode.retryable);
        assert_eq!(decode.status(), None);
    }

    #[test]
    fn display_includes_status_when_http_failure_is_attached() {
        let error = ProviderError::invalid_request("bad schema")
            .with_http_failure(HttpFailure::new(400, "{\"contents\":[]}", "{\"error\":{}}"));

        let rendered = error.to_string();
        assert!(rendered.contains("InvalidRequest"));
        assert!(rendered.contains("status=400"));
        assert!(rendered.contains("bad schema"));
    }
}
