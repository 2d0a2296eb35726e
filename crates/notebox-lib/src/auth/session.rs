// ============================
// crates/notebox-lib/src/auth/session.rs
// ============================
//! Register/login/refresh/logout orchestration with refresh-token rotation.
//!
//! Per-user session state lives entirely in the credential store as the
//! refresh-token hash: `None` is no session, `Some` is the one active
//! session. At most one refresh-token hash is valid per user at a time.
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{TokenIssuer, TokenPair};
use crate::error::AppError;
use crate::store::{StoreError, User, UserStore};

/// Orchestrates the session lifecycle over a credential store and a
/// token issuer, both wired once at startup.
pub struct SessionManager {
    store: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl SessionManager {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    /// Create an account and open its first session.
    ///
    /// A duplicate email surfaces as the store's conflict signal, not a
    /// pre-check, so two racing registrations cannot both win.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        firstname: &str,
    ) -> Result<TokenPair, AppError> {
        let password_hash = hash_password(password)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

        let user = match self.store.create(email, &password_hash, firstname).await {
            Ok(user) => user,
            Err(StoreError::Conflict) => {
                warn!(email, "registration rejected: email already in use");
                return Err(AppError::CredentialsTaken);
            },
            Err(e) => return Err(store_failure(e)),
        };

        info!(user_id = %user.id, "user registered");
        self.open_session(&user).await
    }

    /// Verify credentials and rotate in a fresh session.
    ///
    /// An unknown email and a wrong password produce the same error so
    /// callers cannot enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self.store.find_by_email(email).await.map_err(store_failure)?;

        let password_matches = user
            .as_ref()
            .is_some_and(|u| verify_password(&u.password_hash, password));

        let Some(user) = user.filter(|_| password_matches) else {
            warn!(email, "login failed: invalid credentials");
            return Err(AppError::InvalidCredentials);
        };

        let pair = self.open_session(&user).await?;
        info!(user_id = %user.id, "login succeeded");
        Ok(pair)
    }

    /// Exchange a valid refresh token for a brand-new pair (full rotation).
    ///
    /// Fail-closed: if there is no active session or the presented token
    /// does not match the stored hash, the session is destroyed and the
    /// caller must log in again. A stolen-and-reused old token therefore
    /// works at most once before lockout.
    pub async fn refresh(&self, user_id: Uuid, presented: &str) -> Result<TokenPair, AppError> {
        let user = self.store.find_by_id(user_id).await.map_err(store_failure)?;

        let Some(user) = user else {
            warn!(%user_id, "refresh rejected: user no longer exists");
            return Err(AppError::AccessDenied);
        };

        let Some(stored_hash) = user.refresh_token_hash.as_deref() else {
            warn!(%user_id, "refresh rejected: no active session");
            self.close_session(user_id).await;
            return Err(AppError::AccessDenied);
        };

        if !verify_password(stored_hash, presented) {
            warn!(%user_id, "refresh rejected: token mismatch, closing session");
            self.close_session(user_id).await;
            return Err(AppError::AccessDenied);
        }

        let pair = self.open_session(&user).await?;
        info!(%user_id, "refresh tokens rotated");
        Ok(pair)
    }

    /// Clear the stored refresh-token hash. Idempotent: logging out with
    /// no active session succeeds.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), AppError> {
        match self.store.update_refresh_hash(user_id, None).await {
            Ok(()) => {
                info!(%user_id, "session closed");
                Ok(())
            },
            Err(StoreError::NotFound) => Err(AppError::NotFound("user".to_string())),
            Err(e) => Err(store_failure(e)),
        }
    }

    /// Issue a fresh pair and persist the new refresh-token hash.
    ///
    /// Issuance and hashing happen before the store write, so a failure in
    /// either can never leave the store half-updated; a store-write failure
    /// after issuance only strands tokens that were never persisted.
    async fn open_session(&self, user: &User) -> Result<TokenPair, AppError> {
        let pair = self.tokens.issue_pair(user).await?;
        let refresh_hash = hash_password(&pair.refresh_token)
            .map_err(|e| AppError::Internal(format!("refresh token hashing failed: {e}")))?;

        match self.store.update_refresh_hash(user.id, Some(refresh_hash)).await {
            Ok(()) => Ok(pair),
            Err(StoreError::NotFound) => Err(AppError::NotFound("user".to_string())),
            Err(e) => Err(store_failure(e)),
        }
    }

    /// Best-effort fail-closed wipe; the refresh is denied regardless.
    async fn close_session(&self, user_id: Uuid) {
        if let Err(e) = self.store.update_refresh_hash(user_id, None).await {
            warn!(%user_id, error = %e, "failed to clear session state");
        }
    }
}

fn store_failure(e: StoreError) -> AppError {
    AppError::Internal(format!("credential store failure: {e}"))
}
