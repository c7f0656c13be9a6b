//! Session reducer: login, registration, profile management, logout.
//!
//! State transitions are synchronous; every network call and every touch
//! of durable token storage happens inside an effect that feeds a
//! completion event back into the reducer.

use foodcourt_core::SmallVec;
use foodcourt_core::effect::Effect;
use foodcourt_core::reducer::Reducer;
use smallvec::smallvec;
use std::sync::Arc;

use super::types::SessionState;
use crate::api::{LoginRequest, ProfileUpdate, RegisterRequest, StorefrontApi, UserProfile};
use crate::environment::StorefrontEnvironment;
use crate::storage::TokenStore;

const LOGIN_FALLBACK: &str = "Login failed";
const REGISTER_FALLBACK: &str = "Registration failed";
const PROFILE_FETCH_FALLBACK: &str = "Failed to fetch profile";
const PROFILE_UPDATE_FALLBACK: &str = "Failed to update profile";
const AVATAR_FALLBACK: &str = "Failed to upload avatar";

/// An avatar image ready to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// Original file name, forwarded to the server.
    pub filename: String,
}

impl std::fmt::Debug for AvatarUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarUpload")
            .field("filename", &self.filename)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Everything that can happen to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Exchange credentials for a token.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// Create an account and sign in.
    Register {
        /// Display name.
        name: String,
        /// Account email.
        email: String,
        /// Phone number.
        phone: String,
        /// Account password.
        password: String,
    },
    /// Fetch the authenticated user's profile.
    FetchProfile,
    /// Apply a partial profile update.
    UpdateProfile {
        /// Fields to change.
        update: ProfileUpdate,
    },
    /// Upload a new avatar image.
    UploadAvatar {
        /// The image.
        upload: AvatarUpload,
    },
    /// Upload an avatar (when given) and then apply a profile update, in
    /// that order.
    SaveProfile {
        /// Optional new avatar.
        avatar: Option<AvatarUpload>,
        /// Fields to change.
        update: ProfileUpdate,
    },
    /// Sign out and forget the persisted token.
    Logout,
    /// Dismiss the last error.
    ClearError,

    /// A login or registration call succeeded.
    AuthSucceeded {
        /// The authenticated user.
        user: UserProfile,
        /// The new bearer token, already persisted.
        token: String,
    },
    /// A login or registration call failed.
    AuthFailed {
        /// User-facing message.
        message: String,
    },
    /// A profile call succeeded.
    ProfileLoaded {
        /// The fresh profile.
        user: UserProfile,
    },
    /// A profile call failed.
    ProfileFailed {
        /// User-facing message.
        message: String,
        /// Whether the server rejected the token.
        unauthorized: bool,
    },
    /// The server rejected the session token; sign out locally.
    Unauthorized,
}

/// Reducer over [`SessionState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = StorefrontEnvironment;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SessionAction::Login { email, password } => {
                state.is_loading = true;
                state.last_error = None;
                smallvec![auth_effect(
                    Arc::clone(&env.api),
                    Arc::clone(&env.tokens),
                    AuthCall::Login(LoginRequest { email, password }),
                )]
            }
            SessionAction::Register {
                name,
                email,
                phone,
                password,
            } => {
                state.is_loading = true;
                state.last_error = None;
                smallvec![auth_effect(
                    Arc::clone(&env.api),
                    Arc::clone(&env.tokens),
                    AuthCall::Register(RegisterRequest {
                        name,
                        email,
                        phone,
                        password,
                    }),
                )]
            }
            SessionAction::FetchProfile => {
                state.is_loading = true;
                state.last_error = None;
                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    Some(match api.get_profile().await {
                        Ok(user) => SessionAction::ProfileLoaded { user },
                        Err(e) => SessionAction::ProfileFailed {
                            message: e.user_message(PROFILE_FETCH_FALLBACK),
                            unauthorized: e.is_unauthorized(),
                        },
                    })
                }))]
            }
            SessionAction::UpdateProfile { update } => {
                state.is_loading = true;
                state.last_error = None;
                smallvec![update_profile_effect(Arc::clone(&env.api), update)]
            }
            SessionAction::UploadAvatar { upload } => {
                state.is_loading = true;
                state.last_error = None;
                smallvec![upload_avatar_effect(Arc::clone(&env.api), upload)]
            }
            SessionAction::SaveProfile { avatar, update } => {
                state.is_loading = true;
                state.last_error = None;
                match avatar {
                    // Avatar first, then the field update, strictly in order.
                    Some(upload) => smallvec![Effect::chain(vec![
                        upload_avatar_effect(Arc::clone(&env.api), upload),
                        update_profile_effect(Arc::clone(&env.api), update),
                    ])],
                    None => smallvec![update_profile_effect(Arc::clone(&env.api), update)],
                }
            }
            SessionAction::Logout | SessionAction::Unauthorized => {
                state.user = None;
                state.token = None;
                state.is_authenticated = false;
                state.is_loading = false;
                smallvec![clear_token_effect(Arc::clone(&env.tokens))]
            }
            SessionAction::ClearError => {
                state.last_error = None;
                SmallVec::new()
            }
            SessionAction::AuthSucceeded { user, token } => {
                state.user = Some(user);
                state.token = Some(token);
                state.is_authenticated = true;
                state.is_loading = false;
                state.last_error = None;
                SmallVec::new()
            }
            SessionAction::AuthFailed { message } => {
                state.is_loading = false;
                state.last_error = Some(message);
                SmallVec::new()
            }
            SessionAction::ProfileLoaded { user } => {
                state.user = Some(user);
                state.is_loading = false;
                SmallVec::new()
            }
            SessionAction::ProfileFailed {
                message,
                unauthorized,
            } => {
                state.is_loading = false;
                state.last_error = Some(message);
                if unauthorized {
                    tracing::warn!("Profile call rejected with 401, invalidating session");
                    state.user = None;
                    state.token = None;
                    state.is_authenticated = false;
                    smallvec![clear_token_effect(Arc::clone(&env.tokens))]
                } else {
                    SmallVec::new()
                }
            }
        }
    }
}

enum AuthCall {
    Login(LoginRequest),
    Register(RegisterRequest),
}

/// Runs a login or registration call, persists the token on success, and
/// feeds the outcome back as an event.
fn auth_effect(
    api: Arc<dyn StorefrontApi>,
    tokens: Arc<dyn TokenStore>,
    call: AuthCall,
) -> Effect<SessionAction> {
    Effect::Future(Box::pin(async move {
        let (result, fallback) = match call {
            AuthCall::Login(request) => (api.login(&request).await, LOGIN_FALLBACK),
            AuthCall::Register(request) => (api.register(&request).await, REGISTER_FALLBACK),
        };
        Some(match result {
            Ok(payload) => {
                if let Err(e) = tokens.save(&payload.token) {
                    // The in-memory session still works; only the next
                    // restart loses it.
                    tracing::warn!(error = %e, "Failed to persist session token");
                }
                SessionAction::AuthSucceeded {
                    user: payload.user,
                    token: payload.token,
                }
            }
            Err(e) => SessionAction::AuthFailed {
                message: e.user_message(fallback),
            },
        })
    }))
}

fn update_profile_effect(api: Arc<dyn StorefrontApi>, update: ProfileUpdate) -> Effect<SessionAction> {
    Effect::Future(Box::pin(async move {
        Some(match api.update_profile(&update).await {
            Ok(user) => SessionAction::ProfileLoaded { user },
            Err(e) => SessionAction::ProfileFailed {
                message: e.user_message(PROFILE_UPDATE_FALLBACK),
                unauthorized: e.is_unauthorized(),
            },
        })
    }))
}

fn upload_avatar_effect(api: Arc<dyn StorefrontApi>, upload: AvatarUpload) -> Effect<SessionAction> {
    Effect::Future(Box::pin(async move {
        Some(match api.upload_avatar(upload.bytes, upload.filename).await {
            Ok(user) => SessionAction::ProfileLoaded { user },
            Err(e) => SessionAction::ProfileFailed {
                message: e.user_message(AVATAR_FALLBACK),
                unauthorized: e.is_unauthorized(),
            },
        })
    }))
}

fn clear_token_effect(tokens: Arc<dyn TokenStore>) -> Effect<SessionAction> {
    Effect::Future(Box::pin(async move {
        if let Err(e) = tokens.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted session token");
        }
        None
    }))
}
