//! Session state.

use serde::{Deserialize, Serialize};

use crate::api::UserProfile;
use crate::storage::TokenStore;

/// The process-wide authentication session.
///
/// `is_authenticated` is true iff a token is held. The token itself is
/// persisted through a [`TokenStore`] by the session reducer's effects,
/// never by the state directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The authenticated user's profile, once loaded.
    pub user: Option<UserProfile>,
    /// Bearer token for the remote API.
    pub token: Option<String>,
    /// Whether a token is held.
    pub is_authenticated: bool,
    /// Whether an auth or profile call is in flight.
    pub is_loading: bool,
    /// Message of the last failed operation, cleared on success.
    pub last_error: Option<String>,
}

impl SessionState {
    /// Creates a signed-out session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: false,
            last_error: None,
        }
    }

    /// Seeds the session from persisted storage at startup. A stored token
    /// makes the session authenticated; the profile is fetched lazily. An
    /// unreadable store is logged and treated as signed out.
    #[must_use]
    pub fn restore(tokens: &dyn TokenStore) -> Self {
        let token = match tokens.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted session, starting signed out");
                None
            }
        };
        Self {
            is_authenticated: token.is_some(),
            token,
            ..Self::new()
        }
    }
}
