use thiserror::Error;

/// Core access/session errors
///
/// The variants mirror how a failure should be presented: `Rejected` carries
/// the backend's own message and must not be retried automatically,
/// `Unreachable` is a transport-level failure that is safe to retry, and
/// `Validation` is caught locally before any request is dispatched.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{message}")]
    Rejected { message: String },

    #[error("Could not reach the server: {message}")]
    Unreachable { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AccessError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether retrying the same request could reasonably succeed.
    ///
    /// Only transport failures qualify; a `Rejected` response is a definitive
    /// answer from the backend.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_error_message_is_verbatim() {
        let error = AccessError::rejected("Invalid email or password");
        assert_eq!(error.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_unreachable_error() {
        let error = AccessError::unreachable("connection refused");
        assert_eq!(
            error.to_string(),
            "Could not reach the server: connection refused"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AccessError::unreachable("timeout").is_retryable());
        assert!(!AccessError::rejected("bad credentials").is_retryable());
        assert!(!AccessError::validation("email is required").is_retryable());
    }
}
