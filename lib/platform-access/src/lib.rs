//! Session state, tokens, and provider configuration for the meui gateway.
//!
//! This crate provides:
//! - The typed per-browser session record (`Session`, `SessionId`) with its
//!   pending-login map and token storage
//! - OAuth2 token-pair handling (`TokenPair`)
//! - The verified ID-token projection (`IdTokenClaims`)
//! - Identity-provider configuration (`ProviderConfig`)
//! - Authentication error types
//!
//! # Session Model
//!
//! A browser is identified by an opaque session cookie whose value resolves
//! to a server-side [`Session`] record. The record owns the OAuth2 token
//! pair, the verified OIDC ID token (plus its raw encoded form, needed for
//! the provider's `id_token_hint` at logout), and a map of pending login
//! attempts keyed by the anti-replay `state` value. A pending entry is
//! consumed exactly once when the provider redirects back.
//!
//! # Example
//!
//! ```
//! use meui_platform_access::{PendingLogin, Session, SessionId};
//! use chrono::Duration;
//!
//! let mut session = Session::new(SessionId::new("sess_abc".to_string()), Duration::hours(24));
//!
//! // The gate records where to return to after the provider detour.
//! session.add_pending_login(
//!     "random-state".to_string(),
//!     PendingLogin::new("/clients".to_string(), "random-nonce".to_string()),
//! );
//!
//! // The callback consumes the entry exactly once.
//! let pending = session.take_pending_login("random-state").unwrap();
//! assert_eq!(pending.return_to, "/clients");
//! assert!(session.take_pending_login("random-state").is_none());
//! ```

pub mod error;
pub mod identity;
pub mod oidc;
pub mod session;
pub mod token;

// Re-export main types at crate root
pub use error::AuthenticationError;
pub use identity::IdTokenClaims;
pub use oidc::{ProviderConfig, ProviderConfigBuilder};
pub use session::{PendingLogin, Session, SessionId};
pub use token::TokenPair;
