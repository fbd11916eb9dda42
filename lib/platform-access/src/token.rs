//! OAuth2 token-pair handling.
//!
//! A [`TokenPair`] is owned exclusively by one session. Its validity is
//! authoritative only via its embedded expiry; no revocation cache is
//! maintained.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Leeway subtracted from the expiry when judging validity, so a token is
/// not presented to a backend moments before it lapses in transit.
const EXPIRY_LEEWAY_SECONDS: i64 = 10;

/// An OAuth2 access/refresh token pair with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// The opaque access token value.
    access_token: String,
    /// Token type as issued, normally `bearer`.
    token_type: String,
    /// Refresh token, when the grant produced one.
    refresh_token: Option<String>,
    /// Instant the access token expires. Tokens without expiry information
    /// are presumed valid until proven otherwise by a backend.
    expires_at: Option<DateTime<Utc>>,
}

impl TokenPair {
    /// Creates a token pair.
    #[must_use]
    pub fn new(
        access_token: String,
        token_type: String,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token,
            token_type,
            refresh_token,
            expires_at,
        }
    }

    /// Creates a pair holding only a bearer access token, as parsed from an
    /// `Authorization` header.
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            refresh_token: None,
            expires_at: None,
        }
    }

    /// Returns the access token value.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the token type.
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Returns the refresh token, if present.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns the expiry instant, if known.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Carries the previous refresh token forward when a refresh response
    /// omitted one.
    pub fn inherit_refresh_token(&mut self, previous: &TokenPair) {
        if self.refresh_token.is_none() {
            self.refresh_token = previous.refresh_token.clone();
        }
    }

    /// Returns true if the pair holds a refresh token.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Returns true if the access token is non-empty and not expired
    /// (within the leeway window).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => {
                Utc::now() + Duration::seconds(EXPIRY_LEEWAY_SECONDS) < expires_at
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_expiring_in(seconds: i64) -> TokenPair {
        TokenPair::new(
            "access_123".to_string(),
            "bearer".to_string(),
            Some("refresh_456".to_string()),
            Some(Utc::now() + Duration::seconds(seconds)),
        )
    }

    #[test]
    fn fresh_token_is_valid() {
        assert!(pair_expiring_in(3600).is_valid());
    }

    #[test]
    fn expired_token_is_invalid() {
        assert!(!pair_expiring_in(-1).is_valid());
    }

    #[test]
    fn token_inside_leeway_window_is_invalid() {
        assert!(!pair_expiring_in(5).is_valid());
    }

    #[test]
    fn token_without_expiry_is_presumed_valid() {
        let pair = TokenPair::bearer("header_token".to_string());
        assert!(pair.is_valid());
        assert!(!pair.can_refresh());
    }

    #[test]
    fn empty_access_token_is_invalid() {
        let pair = TokenPair::bearer(String::new());
        assert!(!pair.is_valid());
    }

    #[test]
    fn refresh_token_carries_forward_when_absent() {
        let old = pair_expiring_in(-10);
        let mut refreshed = TokenPair::new(
            "access_789".to_string(),
            "bearer".to_string(),
            None,
            Some(Utc::now() + Duration::hours(1)),
        );
        refreshed.inherit_refresh_token(&old);
        assert_eq!(refreshed.refresh_token(), Some("refresh_456"));
    }

    #[test]
    fn refresh_token_not_overwritten_when_present() {
        let old = pair_expiring_in(-10);
        let mut refreshed = TokenPair::new(
            "access_789".to_string(),
            "bearer".to_string(),
            Some("refresh_new".to_string()),
            None,
        );
        refreshed.inherit_refresh_token(&old);
        assert_eq!(refreshed.refresh_token(), Some("refresh_new"));
    }

    #[test]
    fn serde_roundtrip() {
        let pair = pair_expiring_in(60);
        let json = serde_json::to_string(&pair).expect("serialize");
        let parsed: TokenPair = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(pair, parsed);
    }
}
