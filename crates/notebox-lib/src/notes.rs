// crates/notebox-lib/src/notes.rs

//! Note CRUD over the note store, always scoped to the authenticated owner.
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::middleware::{require_access, AuthClaims};
use crate::error::AppError;
use crate::store::{Note, StoreError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditNote {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Outward note shape; never exposes the owner id.
#[derive(Debug, Serialize)]
pub struct NoteView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

impl From<Note> for NoteView {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
        }
    }
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/note", post(create_note).get(list_notes))
        .route(
            "/note/{id}",
            get(get_note).patch(edit_note).delete(delete_note),
        )
        .route_layer(middleware::from_fn_with_state(state, require_access))
}

async fn create_note(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Json(body): Json<CreateNote>,
) -> Result<impl IntoResponse, AppError> {
    if body.title.trim().is_empty() || body.content.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "title and content are required".to_string(),
        ));
    }

    let user_id = claims.0.sub;
    let note = state
        .notes
        .create(user_id, &body.title, &body.content)
        .await
        .map_err(note_failure)?;

    info!(%user_id, note_id = %note.id, "note created");
    Ok((StatusCode::CREATED, Json(NoteView::from(note))))
}

async fn list_notes(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
) -> Result<Json<Vec<NoteView>>, AppError> {
    let user_id = claims.0.sub;
    let notes = state.notes.list(user_id).await.map_err(note_failure)?;

    debug!(%user_id, count = notes.len(), "notes listed");
    Ok(Json(notes.into_iter().map(NoteView::from).collect()))
}

async fn get_note(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Path(note_id): Path<Uuid>,
) -> Result<Json<NoteView>, AppError> {
    let note = state
        .notes
        .get(claims.0.sub, note_id)
        .await
        .map_err(note_failure)?
        .ok_or_else(|| AppError::NotFound("note".to_string()))?;

    Ok(Json(NoteView::from(note)))
}

async fn edit_note(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Path(note_id): Path<Uuid>,
    Json(body): Json<EditNote>,
) -> Result<Json<NoteView>, AppError> {
    let user_id = claims.0.sub;
    let note = state
        .notes
        .update(user_id, note_id, body.title, body.content)
        .await
        .map_err(note_failure)?;

    info!(%user_id, %note_id, "note updated");
    Ok(Json(NoteView::from(note)))
}

async fn delete_note(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Path(note_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let user_id = claims.0.sub;
    state
        .notes
        .delete(user_id, note_id)
        .await
        .map_err(note_failure)?;

    info!(%user_id, %note_id, "note deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn note_failure(e: StoreError) -> AppError {
    match e {
        StoreError::NotFound => AppError::NotFound("note".to_string()),
        other => AppError::Internal(format!("note store failure: {other}")),
    }
}
