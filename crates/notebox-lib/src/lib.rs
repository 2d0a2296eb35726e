// ============================
// notebox-lib/src/lib.rs
// ============================
//! Core functionality for the Notebox note-taking API: credential-based
//! registration and login, rotating dual-token sessions, bearer guards and
//! owner-scoped note CRUD.

pub mod auth;
pub mod config;
pub mod error;
pub mod notes;
pub mod router;
pub mod store;
pub mod users;
pub mod validation;

use std::sync::Arc;

use crate::auth::session::SessionManager;
use crate::auth::token::TokenIssuer;
use crate::config::Settings;
use crate::store::{MemoryStore, NoteStore, UserStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Session lifecycle orchestration
    pub sessions: Arc<SessionManager>,
    /// Token mint/verify
    pub tokens: TokenIssuer,
    /// Credential store
    pub users: Arc<dyn UserStore>,
    /// Note store
    pub notes: Arc<dyn NoteStore>,
}

impl AppState {
    /// Wire the services once at startup. Everything downstream receives
    /// this state by parameter; there is no container.
    pub fn new(
        users: Arc<dyn UserStore>,
        notes: Arc<dyn NoteStore>,
        settings: &Settings,
    ) -> Self {
        let tokens = TokenIssuer::new(&settings.jwt);
        let sessions = Arc::new(SessionManager::new(users.clone(), tokens.clone()));
        Self {
            sessions,
            tokens,
            users,
            notes,
        }
    }

    /// State backed by the in-memory store, used by the binary and tests.
    pub fn in_memory(settings: &Settings) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, settings)
    }
}
