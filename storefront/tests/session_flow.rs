//! Session lifecycle through the store runtime: login, persistence,
//! restore, logout.

#![allow(clippy::unwrap_used)] // Test code
#![allow(clippy::panic)] // Test code

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{MockApi, auth_payload, mock_environment, profile};
use foodcourt_runtime::Store;
use foodcourt_storefront::api::{ApiError, ProfileUpdate};
use foodcourt_storefront::app::{AppAction, AppReducer, AppState};
use foodcourt_storefront::session::SessionAction;
use foodcourt_storefront::storage::TokenStore;

const WAIT: Duration = Duration::from_secs(5);

fn is_auth_result(action: &AppAction) -> bool {
    matches!(
        action,
        AppAction::Session(SessionAction::AuthSucceeded { .. } | SessionAction::AuthFailed { .. })
    )
}

fn is_profile_result(action: &AppAction) -> bool {
    matches!(
        action,
        AppAction::Session(
            SessionAction::ProfileLoaded { .. } | SessionAction::ProfileFailed { .. }
        )
    )
}

#[tokio::test]
async fn login_persists_the_token_and_a_restart_re_derives_authentication() {
    let api = Arc::new(MockApi::new());
    api.queue_login(Ok(auth_payload("Budi", "jwt-fresh")));
    let (env, tokens) = mock_environment(Arc::clone(&api));
    let store = Store::new(AppState::new(), AppReducer, env.clone());

    let result = store
        .send_and_wait_for(
            AppAction::Session(SessionAction::Login {
                email: "budi@example.com".to_string(),
                password: "hunter2".to_string(),
            }),
            is_auth_result,
            WAIT,
        )
        .await
        .unwrap();

    assert!(matches!(
        result,
        AppAction::Session(SessionAction::AuthSucceeded { .. })
    ));
    let state = store.state(std::clone::Clone::clone).await;
    assert!(state.session.is_authenticated);
    assert_eq!(state.session.user.as_ref().unwrap().name, "Budi");
    assert_eq!(tokens.load().unwrap().as_deref(), Some("jwt-fresh"));

    // Simulated restart: a new store seeded from the same token storage is
    // authenticated before any network call.
    let restarted = Store::new(AppState::restored(&*tokens), AppReducer, env);
    let restored = restarted.state(std::clone::Clone::clone).await;
    assert!(restored.session.is_authenticated);
    assert_eq!(restored.session.token.as_deref(), Some("jwt-fresh"));
    assert!(restored.session.user.is_none());
}

#[tokio::test]
async fn failed_login_surfaces_the_server_message() {
    let api = Arc::new(MockApi::new());
    api.queue_login(Err(ApiError::Unauthorized {
        message: "Invalid credentials".to_string(),
    }));
    let (env, tokens) = mock_environment(Arc::clone(&api));
    let store = Store::new(AppState::new(), AppReducer, env);

    store
        .send_and_wait_for(
            AppAction::Session(SessionAction::Login {
                email: "budi@example.com".to_string(),
                password: "wrong".to_string(),
            }),
            is_auth_result,
            WAIT,
        )
        .await
        .unwrap();

    let state = store.state(std::clone::Clone::clone).await;
    assert!(!state.session.is_authenticated);
    assert!(!state.session.is_loading);
    assert_eq!(
        state.session.last_error.as_deref(),
        Some("Invalid credentials")
    );
    assert_eq!(tokens.load().unwrap(), None);
}

#[tokio::test]
async fn logout_forgets_the_persisted_token() {
    let api = Arc::new(MockApi::new());
    let (env, tokens) = mock_environment(Arc::clone(&api));
    tokens.save("jwt-abc").unwrap();
    let store = Store::new(AppState::restored(&*tokens), AppReducer, env);

    let handle = store
        .send(AppAction::Session(SessionAction::Logout))
        .await
        .unwrap();
    handle.wait().await;

    let state = store.state(std::clone::Clone::clone).await;
    assert!(!state.session.is_authenticated);
    assert_eq!(tokens.load().unwrap(), None);

    // Logging out twice is harmless.
    let handle = store
        .send(AppAction::Session(SessionAction::Logout))
        .await
        .unwrap();
    handle.wait().await;
    assert_eq!(tokens.load().unwrap(), None);
}

#[tokio::test]
async fn profile_update_replaces_the_stored_user() {
    let api = Arc::new(MockApi::new());
    let mut updated = profile("Budi Santoso");
    updated.phone = "0812-9999-8888".to_string();
    api.queue_profile(Ok(updated));
    let (env, _tokens) = mock_environment(Arc::clone(&api));
    let store = Store::new(AppState::new(), AppReducer, env);

    store
        .send_and_wait_for(
            AppAction::Session(SessionAction::UpdateProfile {
                update: ProfileUpdate {
                    name: Some("Budi Santoso".to_string()),
                    phone: Some("0812-9999-8888".to_string()),
                    ..ProfileUpdate::default()
                },
            }),
            is_profile_result,
            WAIT,
        )
        .await
        .unwrap();

    let state = store.state(std::clone::Clone::clone).await;
    let user = state.session.user.unwrap();
    assert_eq!(user.name, "Budi Santoso");
    assert_eq!(user.phone, "0812-9999-8888");
    assert!(!state.session.is_loading);
}

#[tokio::test]
async fn save_profile_uploads_the_avatar_before_the_field_update() {
    let api = Arc::new(MockApi::new());
    let mut with_avatar = profile("Budi");
    with_avatar.avatar = Some("https://cdn.example.com/budi.jpg".to_string());
    let mut renamed = with_avatar.clone();
    renamed.name = "Budi Santoso".to_string();
    // First queued response answers the avatar upload, second the update.
    api.queue_profile(Ok(with_avatar));
    api.queue_profile(Ok(renamed));
    let (env, _tokens) = mock_environment(Arc::clone(&api));
    let store = Store::new(AppState::new(), AppReducer, env);

    let handle = store
        .send(AppAction::Session(SessionAction::SaveProfile {
            avatar: Some(foodcourt_storefront::session::AvatarUpload {
                bytes: vec![0xFF, 0xD8, 0xFF],
                filename: "budi.jpg".to_string(),
            }),
            update: ProfileUpdate {
                name: Some("Budi Santoso".to_string()),
                ..ProfileUpdate::default()
            },
        }))
        .await
        .unwrap();
    handle.wait().await;
    // Feedback actions are re-sent through the store; let them settle.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let state = store.state(std::clone::Clone::clone).await;
    let user = state.session.user.unwrap();
    assert_eq!(user.name, "Budi Santoso");
    assert_eq!(user.avatar.as_deref(), Some("https://cdn.example.com/budi.jpg"));
}

#[tokio::test]
async fn unauthorized_profile_fetch_invalidates_the_session() {
    let api = Arc::new(MockApi::new());
    api.queue_profile(Err(ApiError::Unauthorized {
        message: "Token expired".to_string(),
    }));
    let (env, tokens) = mock_environment(Arc::clone(&api));
    tokens.save("jwt-stale").unwrap();
    let store = Store::new(AppState::restored(&*tokens), AppReducer, env);

    store
        .send_and_wait_for(
            AppAction::Session(SessionAction::FetchProfile),
            is_profile_result,
            WAIT,
        )
        .await
        .unwrap();
    // The token-clearing effect runs async; give it a moment.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let state = store.state(std::clone::Clone::clone).await;
    assert!(!state.session.is_authenticated);
    assert_eq!(tokens.load().unwrap(), None);
}
