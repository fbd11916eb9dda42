//! Error types for the platform-access crate.

use std::fmt;

/// Errors from authentication operations.
///
/// These errors represent failures in establishing or verifying the
/// caller's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The token is structurally invalid or expired.
    InvalidToken { reason: String },
    /// The returned `state` does not match any pending login attempt.
    StateMismatch { state: String },
    /// The authorization-code exchange failed at the provider.
    ExchangeFailed { reason: String },
    /// ID-token signature/issuer/expiry verification failed.
    VerificationFailed { reason: String },
    /// The session store could not be read or written.
    SessionStore { reason: String },
    /// Failure talking to the provider (network, DNS, TLS).
    ProviderUnreachable { reason: String },
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { reason } => {
                write!(f, "invalid token: {reason}")
            }
            Self::StateMismatch { state } => {
                write!(f, "no pending login for state: {state}")
            }
            Self::ExchangeFailed { reason } => {
                write!(f, "authorization code exchange failed: {reason}")
            }
            Self::VerificationFailed { reason } => {
                write!(f, "id token verification failed: {reason}")
            }
            Self::SessionStore { reason } => {
                write!(f, "session store failure: {reason}")
            }
            Self::ProviderUnreachable { reason } => {
                write!(f, "identity provider unreachable: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_mismatch_display() {
        let err = AuthenticationError::StateMismatch {
            state: "abc123".to_string(),
        };
        assert!(err.to_string().contains("no pending login"));
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn verification_failed_display() {
        let err = AuthenticationError::VerificationFailed {
            reason: "signature mismatch".to_string(),
        };
        assert!(err.to_string().contains("verification failed"));
        assert!(err.to_string().contains("signature mismatch"));
    }

    #[test]
    fn provider_unreachable_display() {
        let err = AuthenticationError::ProviderUnreachable {
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("unreachable"));
    }
}
