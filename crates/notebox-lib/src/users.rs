// crates/notebox-lib/src/users.rs

//! Authenticated user profile endpoint.
use axum::{
    extract::State, middleware, routing::get, Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::middleware::{require_access, AuthClaims};
use crate::error::AppError;
use crate::store::Role;
use crate::AppState;

/// Outward user shape: carries neither the password hash nor the
/// refresh-token hash.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub firstname: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_access))
}

async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
) -> Result<Json<UserView>, AppError> {
    let user = state
        .users
        .find_by_id(claims.0.sub)
        .await
        .map_err(|e| AppError::Internal(format!("credential store failure: {e}")))?
        .ok_or_else(|| AppError::NotFound("user".to_string()))?;

    Ok(Json(UserView {
        id: user.id,
        email: user.email,
        firstname: user.firstname,
        role: user.role,
        created_at: user.created_at,
    }))
}
