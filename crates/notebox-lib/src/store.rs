// ============================
// crates/notebox-lib/src/store.rs
// ============================
//! Repository traits with an in-memory implementation.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors surfaced by storage backends. These never cross the service
/// boundary: the session manager and note handlers translate them into
/// the application taxonomy.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate record")]
    Conflict,

    #[error("record not found")]
    NotFound,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// User role, defaulting to a regular user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Stored user record. Deliberately not `Serialize`: the password hash and
/// refresh-token hash must never leave the process, so outward views are
/// built field by field.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub firstname: String,
    pub password_hash: String,
    pub role: Role,
    /// One-way hash of the single outstanding refresh token.
    /// `None` means no active session.
    pub refresh_token_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credential store: user identity, password hash, current refresh-token hash.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user. Email uniqueness is enforced here, at the store
    /// boundary; a duplicate surfaces as [`StoreError::Conflict`] so callers
    /// never need a racy check-then-insert.
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        firstname: &str,
    ) -> Result<User, StoreError>;

    /// Look up a user by email (case-sensitive, as stored).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Set or clear the stored refresh-token hash.
    /// Fails with [`StoreError::NotFound`] if the id is absent.
    async fn update_refresh_hash(
        &self,
        id: Uuid,
        hash: Option<String>,
    ) -> Result<(), StoreError>;
}

/// Note record store, always scoped to an owner.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Note, StoreError>;

    /// All notes belonging to `user_id`, oldest first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<Note>, StoreError>;

    /// A single note; another user's note reads as absent.
    async fn get(&self, user_id: Uuid, note_id: Uuid) -> Result<Option<Note>, StoreError>;

    /// Patch title and/or content. [`StoreError::NotFound`] when the note
    /// does not exist or belongs to someone else.
    async fn update(
        &self,
        user_id: Uuid,
        note_id: Uuid,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Note, StoreError>;

    async fn delete(&self, user_id: Uuid, note_id: Uuid) -> Result<(), StoreError>;
}

/// In-memory implementation of both stores.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    notes: RwLock<HashMap<Uuid, Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        firstname: &str,
    ) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        // uniqueness check and insert under one write lock
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::Conflict);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            firstname: firstname.to_string(),
            password_hash: password_hash.to_string(),
            role: Role::default(),
            refresh_token_hash: None,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn update_refresh_hash(
        &self,
        id: Uuid,
        hash: Option<String>,
    ) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.refresh_token_hash = hash;
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Note, StoreError> {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut notes = self.notes.write().await;
        notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<Note>, StoreError> {
        let notes = self.notes.read().await;
        let mut owned: Vec<Note> = notes
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(owned)
    }

    async fn get(&self, user_id: Uuid, note_id: Uuid) -> Result<Option<Note>, StoreError> {
        let notes = self.notes.read().await;
        Ok(notes
            .get(&note_id)
            .filter(|n| n.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        user_id: Uuid,
        note_id: Uuid,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Note, StoreError> {
        let mut notes = self.notes.write().await;
        let note = notes
            .get_mut(&note_id)
            .filter(|n| n.user_id == user_id)
            .ok_or(StoreError::NotFound)?;

        if let Some(title) = title {
            note.title = title;
        }
        if let Some(content) = content {
            note.content = content;
        }
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    async fn delete(&self, user_id: Uuid, note_id: Uuid) -> Result<(), StoreError> {
        let mut notes = self.notes.write().await;
        let owned = notes
            .get(&note_id)
            .is_some_and(|n| n.user_id == user_id);
        if !owned {
            return Err(StoreError::NotFound);
        }
        notes.remove(&note_id);
        Ok(())
    }
}
