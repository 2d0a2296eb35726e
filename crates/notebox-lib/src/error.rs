// crates/notebox-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Application error taxonomy with error codes and HTTP mappings.
#[derive(Error, Debug)]
pub enum AppError {
    /// Registration attempted with an email that is already in use.
    #[error("Credentials taken")]
    CredentialsTaken,

    /// Login failed. Deliberately covers both an unknown email and a wrong
    /// password so callers cannot enumerate accounts.
    #[error("Credentials incorrect")]
    InvalidCredentials,

    /// Bearer token missing, malformed, expired or signed with the wrong key.
    #[error("Unauthorized")]
    Unauthorized,

    /// Refresh rejected: no active session or the presented token does not
    /// match the stored hash. The session is closed as a side effect.
    #[error("Access denied")]
    AccessDenied,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::CredentialsTaken
            | AppError::InvalidCredentials
            | AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::CredentialsTaken => "AUTH_001",
            AppError::InvalidCredentials => "AUTH_002",
            AppError::Unauthorized => "AUTH_003",
            AppError::AccessDenied => "AUTH_004",
            AppError::NotFound(_) => "NF_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::CredentialsTaken => "Credentials taken".to_string(),
            AppError::InvalidCredentials => "Credentials incorrect".to_string(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::AccessDenied => "Access denied".to_string(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // The cause of a 500 is logged server-side and never returned verbatim
        if let AppError::Internal(detail) = &self {
            error!(detail = %detail, "internal error");
        }

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
