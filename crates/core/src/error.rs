use symptom_types::TextError;

/// Failures reported by the chat-completion service.
///
/// Only `RateLimited` and `PaymentRequired` keep their meaning all the way to the
/// caller; the other variants carry diagnostics for logs only.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("completion service rate limited the request")]
    RateLimited(Option<String>),
    #[error("completion service requires payment")]
    PaymentRequired(Option<String>),
    #[error("completion service unavailable (status {status:?}): {body}")]
    Unavailable { status: Option<u16>, body: String },
    #[error("completion service returned a malformed payload: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// Upstream HTTP status, when the failure came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited(_) => Some(429),
            Self::PaymentRequired(_) => Some(402),
            Self::Unavailable { status, .. } => *status,
            Self::Malformed(_) => None,
        }
    }
}

/// Failures writing an audit record. Logged by the recorder, never surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("audit store request failed: {0}")]
    Transport(String),
    #[error("audit store rejected insert (status {status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("audit insert timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Validation(#[from] TextError),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
