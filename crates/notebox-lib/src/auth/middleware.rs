// crates/notebox-lib/src/auth/middleware.rs

//! Bearer-token guards for protected routes.
//!
//! Two concrete middleware functions over one shared extraction primitive,
//! parameterized only by which secret verifies the token. On success the
//! decoded claims are written into the request extensions for downstream
//! handlers.
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::token::{Claims, TokenKind};
use crate::error::AppError;
use crate::AppState;

/// Claims attached to a request that passed the access-token guard.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

/// Claims plus the raw presented token, attached by the refresh guard.
/// The session manager needs the raw token to verify it against the
/// stored hash.
#[derive(Debug, Clone)]
pub struct RefreshContext {
    pub claims: Claims,
    pub token: String,
}

/// Guard for general protected routes: requires a valid access token.
pub async fn require_access(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::Unauthorized)?;

    let claims = state
        .tokens
        .verify(&token, TokenKind::Access)
        .inspect_err(|_| warn!("rejected access token"))?;

    request.extensions_mut().insert(AuthClaims(claims));
    Ok(next.run(request).await)
}

/// Guard for the refresh endpoint: requires a valid refresh token and
/// keeps the raw token alongside the claims.
pub async fn require_refresh(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::Unauthorized)?;

    let claims = state
        .tokens
        .verify(&token, TokenKind::Refresh)
        .inspect_err(|_| warn!("rejected refresh token"))?;

    request.extensions_mut().insert(RefreshContext { claims, token });
    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
/// Split on the first space; the scheme must be the literal `Bearer`.
fn bearer_token(request: &Request) -> Option<String> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    (scheme == "Bearer" && !token.is_empty()).then(|| token.to_string())
}
