// crates/notebox-lib/tests/auth_flow.rs

//! Session lifecycle tests against the in-memory credential store.
use std::sync::Arc;

use notebox_lib::auth::session::SessionManager;
use notebox_lib::auth::token::TokenIssuer;
use notebox_lib::config::JwtSettings;
use notebox_lib::error::AppError;
use notebox_lib::store::{MemoryStore, UserStore};
use uuid::Uuid;

fn test_jwt() -> JwtSettings {
    JwtSettings {
        access_secret: "access-secret-for-tests".to_string(),
        refresh_secret: "refresh-secret-for-tests".to_string(),
        access_ttl_secs: 900,
        refresh_ttl_secs: 3600,
    }
}

fn manager() -> (Arc<SessionManager>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let issuer = TokenIssuer::new(&test_jwt());
    (
        Arc::new(SessionManager::new(store.clone(), issuer)),
        store,
    )
}

async fn user_id(store: &MemoryStore, email: &str) -> Uuid {
    store
        .find_by_email(email)
        .await
        .unwrap()
        .expect("user exists")
        .id
}

#[tokio::test]
async fn test_register_then_login() {
    let (sessions, _store) = manager();

    let registered = sessions
        .register("alice@example.com", "pw123", "Alice")
        .await
        .unwrap();
    assert!(!registered.access_token.is_empty());
    assert!(!registered.refresh_token.is_empty());

    let logged_in = sessions.login("alice@example.com", "pw123").await.unwrap();
    assert!(!logged_in.access_token.is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (sessions, _store) = manager();
    sessions
        .register("alice@example.com", "pw123", "Alice")
        .await
        .unwrap();

    let wrong_password = sessions
        .login("alice@example.com", "wrong")
        .await
        .unwrap_err();
    let unknown_email = sessions
        .login("nobody@example.com", "pw123")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_email, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let (sessions, store) = manager();

    let first = sessions
        .register("alice@example.com", "pw123", "Alice")
        .await
        .unwrap();

    let second = sessions
        .register("alice@example.com", "other-pw", "Mallory")
        .await
        .unwrap_err();
    assert!(matches!(second, AppError::CredentialsTaken));

    // the first registration's session is unaffected
    let id = user_id(&store, "alice@example.com").await;
    assert!(sessions.refresh(id, &first.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_refresh_rotates_and_old_token_locks_out() {
    let (sessions, store) = manager();

    let initial = sessions
        .register("alice@example.com", "pw123", "Alice")
        .await
        .unwrap();
    let id = user_id(&store, "alice@example.com").await;

    // the refresh token works exactly once
    let rotated = sessions.refresh(id, &initial.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, initial.refresh_token);

    // replaying the old token is denied and wipes the session
    let replay = sessions.refresh(id, &initial.refresh_token).await.unwrap_err();
    assert!(matches!(replay, AppError::AccessDenied));

    // fail-closed: even the freshly rotated token is now dead
    let after_wipe = sessions.refresh(id, &rotated.refresh_token).await.unwrap_err();
    assert!(matches!(after_wipe, AppError::AccessDenied));

    // a fresh login opens a new session
    let relogin = sessions.login("alice@example.com", "pw123").await.unwrap();
    assert!(sessions.refresh(id, &relogin.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_logout_then_refresh_denied() {
    let (sessions, store) = manager();

    let pair = sessions
        .register("alice@example.com", "pw123", "Alice")
        .await
        .unwrap();
    let id = user_id(&store, "alice@example.com").await;

    sessions.logout(id).await.unwrap();
    // logout is idempotent
    sessions.logout(id).await.unwrap();

    let denied = sessions.refresh(id, &pair.refresh_token).await.unwrap_err();
    assert!(matches!(denied, AppError::AccessDenied));
}

#[tokio::test]
async fn test_logout_for_vanished_user() {
    let (sessions, _store) = manager();
    let denied = sessions.logout(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(denied, AppError::NotFound(_)));
}

/// Two concurrent refreshes with the same token may both pass verification
/// (the read-then-write pair is not a transaction). Last write wins; the
/// accepted outcome is that at least one caller succeeds and the presented
/// token is dead afterwards.
#[tokio::test]
async fn test_concurrent_refresh_race() {
    let (sessions, store) = manager();

    let pair = sessions
        .register("alice@example.com", "pw123", "Alice")
        .await
        .unwrap();
    let id = user_id(&store, "alice@example.com").await;

    let a = {
        let sessions = sessions.clone();
        let token = pair.refresh_token.clone();
        tokio::spawn(async move { sessions.refresh(id, &token).await })
    };
    let b = {
        let sessions = sessions.clone();
        let token = pair.refresh_token.clone();
        tokio::spawn(async move { sessions.refresh(id, &token).await })
    };

    let a = a.await.unwrap();
    let b = b.await.unwrap();
    assert!(a.is_ok() || b.is_ok(), "at least one refresh must win");

    // the presented token has rotated away either way
    let replay = sessions.refresh(id, &pair.refresh_token).await;
    assert!(replay.is_err());
}
