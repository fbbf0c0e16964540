//! Error taxonomy shared by every remote provider port.

use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Classified failure kind of a remote provider call.
///
/// The wire code (`as_code`) is stable: adapters, events and API mappers
/// key off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// The call exceeded its deadline.
    Timeout,
    /// The call was cancelled by the caller before completing.
    Cancelled,
    /// The provider rejected the request as malformed.
    BadRequest,
    /// Missing or invalid credentials.
    Unauthorized,
    /// Valid credentials, insufficient permission.
    Forbidden,
    /// The provider throttled the call.
    TooManyRequests,
    /// The provider is down or overloaded.
    ServiceUnavailable,
    /// The provider answered with a payload we could not use.
    InvalidResponse,
    /// Anything not classified above.
    Unknown,
}

impl ProviderErrorKind {
    pub fn as_code(&self) -> &'static str {
        match self {
            ProviderErrorKind::Timeout => "TIMEOUT",
            ProviderErrorKind::Cancelled => "CANCELLED",
            ProviderErrorKind::BadRequest => "BAD_REQUEST",
            ProviderErrorKind::Unauthorized => "UNAUTHORIZED",
            ProviderErrorKind::Forbidden => "FORBIDDEN",
            ProviderErrorKind::TooManyRequests => "TOO_MANY_REQUESTS",
            ProviderErrorKind::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ProviderErrorKind::InvalidResponse => "INVALID_RESPONSE",
            ProviderErrorKind::Unknown => "UNKNOWN",
        }
    }

    /// Kinds that are a definitive verdict from the provider, never
    /// reinterpreted by the call executor.
    pub fn is_definitive(&self) -> bool {
        !matches!(
            self,
            ProviderErrorKind::Cancelled | ProviderErrorKind::Unknown
        )
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// A classified remote-call failure.
#[derive(Debug, Clone)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    /// Logical operation that failed, e.g. "transcribe_audio".
    pub method: String,
    pub message: String,
    pub details: HashMap<String, Value>,
    source: Option<Arc<dyn Error + Send + Sync>>,
}

impl ProviderError {
    pub fn new(
        kind: ProviderErrorKind,
        method: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            method: method.into(),
            message: message.into(),
            details: HashMap::new(),
            source: None,
        }
    }

    pub fn timeout(method: impl Into<String>, deadline_ms: u64) -> Self {
        Self::new(
            ProviderErrorKind::Timeout,
            method,
            format!("Call exceeded its {}ms deadline", deadline_ms),
        )
        .with_detail("deadline_ms", deadline_ms)
    }

    pub fn cancelled(method: impl Into<String>) -> Self {
        Self::new(
            ProviderErrorKind::Cancelled,
            method,
            "Call was cancelled before completing",
        )
    }

    pub fn invalid_response(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidResponse, method, message)
    }

    pub fn unknown(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unknown, method, message)
    }

    /// Classifies an HTTP-style status code.
    pub fn from_status(method: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        let kind = match status {
            400 => ProviderErrorKind::BadRequest,
            401 => ProviderErrorKind::Unauthorized,
            403 => ProviderErrorKind::Forbidden,
            408 => ProviderErrorKind::Timeout,
            429 => ProviderErrorKind::TooManyRequests,
            500..=599 => ProviderErrorKind::ServiceUnavailable,
            _ => ProviderErrorKind::Unknown,
        };
        Self::new(kind, method, message).with_detail("status", status)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.method, self.message)
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_covers_the_taxonomy() {
        assert_eq!(
            ProviderError::from_status("call", 400, "bad").kind,
            ProviderErrorKind::BadRequest
        );
        assert_eq!(
            ProviderError::from_status("call", 401, "no auth").kind,
            ProviderErrorKind::Unauthorized
        );
        assert_eq!(
            ProviderError::from_status("call", 403, "denied").kind,
            ProviderErrorKind::Forbidden
        );
        assert_eq!(
            ProviderError::from_status("call", 429, "slow down").kind,
            ProviderErrorKind::TooManyRequests
        );
        assert_eq!(
            ProviderError::from_status("call", 503, "down").kind,
            ProviderErrorKind::ServiceUnavailable
        );
        assert_eq!(
            ProviderError::from_status("call", 418, "teapot").kind,
            ProviderErrorKind::Unknown
        );
    }

    #[test]
    fn display_includes_kind_method_and_message() {
        let err = ProviderError::timeout("transcribe_audio", 30_000);
        assert_eq!(
            err.to_string(),
            "[TIMEOUT] transcribe_audio: Call exceeded its 30000ms deadline"
        );
    }

    #[test]
    fn definitive_kinds_exclude_cancelled_and_unknown() {
        assert!(ProviderErrorKind::Timeout.is_definitive());
        assert!(ProviderErrorKind::BadRequest.is_definitive());
        assert!(!ProviderErrorKind::Cancelled.is_definitive());
        assert!(!ProviderErrorKind::Unknown.is_definitive());
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = ProviderError::unknown("call", "boom").with_source(io);
        assert!(err.source().is_some());
    }
}
