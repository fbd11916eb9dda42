//! Verified ID-token projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The claims the gateway keeps from a verified OIDC ID token.
///
/// Only the subject is needed to resolve the caller's profile; issuer and
/// expiry are retained for diagnostics and re-validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// The subject claim, the provider's unique identifier for the user.
    subject: String,
    /// The issuer URL the token was verified against.
    issuer: String,
    /// When the ID token expires.
    expires_at: DateTime<Utc>,
}

impl IdTokenClaims {
    /// Creates a claims projection.
    #[must_use]
    pub fn new(subject: String, issuer: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            subject,
            issuer,
            expires_at,
        }
    }

    /// Returns the subject claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the issuer URL.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Returns the token's expiry instant.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the ID token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn claims_accessors() {
        let claims = IdTokenClaims::new(
            "sub_123".to_string(),
            "https://idp.example.com".to_string(),
            Utc::now() + Duration::hours(1),
        );
        assert_eq!(claims.subject(), "sub_123");
        assert_eq!(claims.issuer(), "https://idp.example.com");
        assert!(!claims.is_expired());
    }

    #[test]
    fn expired_claims() {
        let claims = IdTokenClaims::new(
            "sub_123".to_string(),
            "https://idp.example.com".to_string(),
            Utc::now() - Duration::seconds(1),
        );
        assert!(claims.is_expired());
    }

    #[test]
    fn serde_roundtrip() {
        let claims = IdTokenClaims::new(
            "sub_123".to_string(),
            "https://idp.example.com".to_string(),
            Utc::now() + Duration::hours(1),
        );
        let json = serde_json::to_string(&claims).expect("serialize");
        let parsed: IdTokenClaims = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(claims, parsed);
    }
}
