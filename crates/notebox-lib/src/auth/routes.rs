// crates/notebox-lib/src/auth/routes.rs

//! HTTP surface for the auth lifecycle.
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::auth::middleware::{require_access, require_refresh, AuthClaims, RefreshContext};
use crate::auth::token::TokenPair;
use crate::error::AppError;
use crate::validation::valid_email;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub firstname: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route(
            "/auth/refresh",
            post(refresh).layer(middleware::from_fn_with_state(state.clone(), require_refresh)),
        )
        .route(
            "/auth/logout",
            post(logout).layer(middleware::from_fn_with_state(state, require_access)),
        )
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if body.password.is_empty() || body.firstname.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "email, password and firstname are required".to_string(),
        ));
    }
    if !valid_email(&body.email) {
        return Err(AppError::InvalidInput("invalid email address".to_string()));
    }

    debug!("processing new user registration");
    let tokens = state
        .sessions
        .register(&body.email, &body.password, &body.firstname)
        .await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AppError> {
    debug!("processing login attempt");
    let tokens = state.sessions.login(&body.email, &body.password).await?;
    Ok(Json(tokens))
}

async fn refresh(
    State(state): State<AppState>,
    Extension(ctx): Extension<RefreshContext>,
) -> Result<Json<TokenPair>, AppError> {
    debug!(user_id = %ctx.claims.sub, "refreshing tokens");
    let tokens = state.sessions.refresh(ctx.claims.sub, &ctx.token).await?;
    Ok(Json(tokens))
}

async fn logout(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!(user_id = %claims.0.sub, "logging out");
    state.sessions.logout(claims.0.sub).await?;
    Ok(Json(json!({ "message": "logged out" })))
}
