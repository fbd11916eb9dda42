//! Per-browser session records.
//!
//! A session is created the first time a browser hits a protected route and
//! lives for a fixed 24 hour window. It is the only place the gateway keeps
//! state between requests: the OAuth2 token pair, the verified ID token,
//! and the pending login attempts awaiting a provider callback.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::identity::IdTokenClaims;
use crate::token::TokenPair;

/// Unique identifier for a session.
///
/// Session IDs are opaque strings; the display form is the cookie value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new session ID from a string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A login attempt awaiting the provider's redirect back.
///
/// Keyed in the session by the outbound `state` value; consumed exactly
/// once when the callback validates the returned `state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    /// Where to send the browser after the detour completes.
    pub return_to: String,
    /// OIDC nonce bound into the authorization request, checked against the
    /// ID token at exchange time.
    pub nonce: String,
}

impl PendingLogin {
    /// Creates a pending login entry.
    #[must_use]
    pub fn new(return_to: String, nonce: String) -> Self {
        Self { return_to, nonce }
    }
}

/// The typed session record.
///
/// Replaces a string-keyed value bag with explicit fields so the session
/// store boundary is a single serde codec and no runtime type assertions
/// exist anywhere in the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,
    /// When the session was created.
    created_at: DateTime<Utc>,
    /// When the session (and its cookie) expires.
    expires_at: DateTime<Utc>,
    /// Pending login attempts keyed by `state` value.
    pending_logins: HashMap<String, PendingLogin>,
    /// The current OAuth2 token pair, once authenticated.
    tokens: Option<TokenPair>,
    /// The verified ID-token projection.
    id_token: Option<IdTokenClaims>,
    /// The raw encoded ID token, kept for the logout `id_token_hint`.
    raw_id_token: Option<String>,
}

impl Session {
    /// Creates an empty session valid for `ttl`.
    #[must_use]
    pub fn new(id: SessionId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            expires_at: now + ttl,
            pending_logins: HashMap::new(),
            tokens: None,
            id_token: None,
            raw_id_token: None,
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns the stored token pair, if any.
    #[must_use]
    pub fn tokens(&self) -> Option<&TokenPair> {
        self.tokens.as_ref()
    }

    /// Stores (or replaces) the token pair.
    pub fn set_tokens(&mut self, tokens: TokenPair) {
        self.tokens = Some(tokens);
    }

    /// Returns the verified ID-token claims, if any.
    #[must_use]
    pub fn id_token(&self) -> Option<&IdTokenClaims> {
        self.id_token.as_ref()
    }

    /// Returns the raw encoded ID token, if any.
    #[must_use]
    pub fn raw_id_token(&self) -> Option<&str> {
        self.raw_id_token.as_deref()
    }

    /// Stores the verified ID token alongside its raw encoded form.
    pub fn install_id_token(&mut self, claims: IdTokenClaims, raw: String) {
        self.id_token = Some(claims);
        self.raw_id_token = Some(raw);
    }

    /// Records a pending login attempt under its `state` value.
    pub fn add_pending_login(&mut self, state: String, pending: PendingLogin) {
        self.pending_logins.insert(state, pending);
    }

    /// Consumes the pending login recorded under `state`.
    ///
    /// The entry is removed so a replay of the same `state` fails.
    pub fn take_pending_login(&mut self, state: &str) -> Option<PendingLogin> {
        self.pending_logins.remove(state)
    }

    /// Returns the number of login attempts still pending.
    #[must_use]
    pub fn pending_login_count(&self) -> usize {
        self.pending_logins.len()
    }

    /// Returns true if the session holds a currently valid token pair.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.as_ref().is_some_and(TokenPair::is_valid)
    }

    /// Wipes everything except identity of the record itself.
    ///
    /// Used by the post-logout landing page.
    pub fn clear(&mut self) {
        self.pending_logins.clear();
        self.tokens = None;
        self.id_token = None;
        self.raw_id_token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session::new(SessionId::new("sess_test_123".to_string()), Duration::hours(24))
    }

    fn test_tokens() -> TokenPair {
        TokenPair::new(
            "access_123".to_string(),
            "bearer".to_string(),
            Some("refresh_456".to_string()),
            Some(Utc::now() + Duration::hours(1)),
        )
    }

    #[test]
    fn session_id_display() {
        let id = SessionId::new("sess_test_123".to_string());
        assert_eq!(id.to_string(), "sess_test_123");
    }

    #[test]
    fn new_session_is_empty() {
        let session = test_session();
        assert!(session.tokens().is_none());
        assert!(session.id_token().is_none());
        assert!(session.raw_id_token().is_none());
        assert_eq!(session.pending_login_count(), 0);
        assert!(!session.is_expired());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn pending_login_consumed_exactly_once() {
        let mut session = test_session();
        session.add_pending_login(
            "state-abc".to_string(),
            PendingLogin::new("/invites".to_string(), "nonce-1".to_string()),
        );

        let pending = session.take_pending_login("state-abc").expect("first take");
        assert_eq!(pending.return_to, "/invites");
        assert_eq!(pending.nonce, "nonce-1");

        // Replay must fail.
        assert!(session.take_pending_login("state-abc").is_none());
    }

    #[test]
    fn unknown_state_is_rejected() {
        let mut session = test_session();
        session.add_pending_login(
            "state-abc".to_string(),
            PendingLogin::new("/".to_string(), "nonce-1".to_string()),
        );
        assert!(session.take_pending_login("state-forged").is_none());
        // The legitimate entry is untouched.
        assert_eq!(session.pending_login_count(), 1);
    }

    #[test]
    fn session_with_valid_tokens_is_authenticated() {
        let mut session = test_session();
        session.set_tokens(test_tokens());
        assert!(session.is_authenticated());
    }

    #[test]
    fn session_with_expired_tokens_is_not_authenticated() {
        let mut session = test_session();
        session.set_tokens(TokenPair::new(
            "access_old".to_string(),
            "bearer".to_string(),
            Some("refresh_456".to_string()),
            Some(Utc::now() - Duration::seconds(1)),
        ));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn expired_session() {
        let session = Session::new(
            SessionId::new("sess_old".to_string()),
            Duration::seconds(-1),
        );
        assert!(session.is_expired());
    }

    #[test]
    fn clear_removes_all_state() {
        let mut session = test_session();
        session.set_tokens(test_tokens());
        session.install_id_token(
            IdTokenClaims::new(
                "sub_1".to_string(),
                "https://idp.example.com".to_string(),
                Utc::now() + Duration::hours(1),
            ),
            "raw.jwt.value".to_string(),
        );
        session.add_pending_login(
            "state-abc".to_string(),
            PendingLogin::new("/".to_string(), "n".to_string()),
        );

        session.clear();

        assert!(session.tokens().is_none());
        assert!(session.id_token().is_none());
        assert!(session.raw_id_token().is_none());
        assert_eq!(session.pending_login_count(), 0);
    }

    #[test]
    fn serde_roundtrip_preserves_pending_logins() {
        let mut session = test_session();
        session.set_tokens(test_tokens());
        session.add_pending_login(
            "state-abc".to_string(),
            PendingLogin::new("/clients".to_string(), "nonce-1".to_string()),
        );

        let json = serde_json::to_string(&session).expect("serialize");
        let mut parsed: Session = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(parsed.id(), session.id());
        assert_eq!(parsed.tokens(), session.tokens());
        let pending = parsed.take_pending_login("state-abc").expect("pending");
        assert_eq!(pending.return_to, "/clients");
    }
}
