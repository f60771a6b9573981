use chrono::{DateTime, Utc};

/// Status lookup error.
///
/// Every stage of the pipeline fails with one of these. A lookup either
/// produces a status or the first error encountered: there is no partial
/// result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatusError {
    /// The status list URI cannot be used as a request URL.
    #[error("invalid status list URL `{0}`")]
    BadUrl(String),

    /// CWT Status List Tokens are recognized but not supported.
    #[error("CWT status list tokens are not supported")]
    CwtNotSupported,

    /// The token header `typ` is not `statuslist+jwt`.
    #[error("unexpected JWT header type")]
    BadJwtHeader,

    /// The token subject does not match the status list URI.
    #[error("unexpected status list subject `{0}`")]
    BadSubject(String),

    /// The status list cannot be decoded, or does not contain the requested
    /// index.
    #[error("invalid status list bytes")]
    BadBytes,

    /// The token is not a well formed compact JWT.
    #[error("invalid JWT")]
    InvalidJwt,

    /// The status list could not be retrieved.
    #[error("network error: {0}")]
    Network(String),

    /// The response or its claims could not be decoded.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// The token expired before `now` (clock skew included).
    #[error("status list token expired at {expired_at} (now: {now})")]
    ExpiredToken {
        expired_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// The token claims to be issued after `now` (clock skew included).
    #[error("status list token issued in the future at {issued_at} (now: {now})")]
    InvalidIssueDate {
        issued_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// External capability failure, such as a rejected signature.
    #[error("{0}")]
    Other(String),
}

impl StatusError {
    pub fn decoding(e: impl ToString) -> Self {
        Self::Decoding(e.to_string())
    }

    pub fn other(e: impl ToString) -> Self {
        Self::Other(e.to_string())
    }
}
