// ============================
// crates/notebox-lib/src/auth/token.rs
// ============================
//! Signed, expiring access and refresh tokens.
//!
//! The two kinds are signed with independent secrets: a leaked access
//! secret cannot forge refresh tokens and vice versa.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::error::AppError;
use crate::store::{Role, User};

/// Which signing secret a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by every token. Immutable once minted; expiry is
/// enforced by [`TokenIssuer::verify`], nothing downstream re-checks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// The pair returned by register, login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Mints and verifies both token kinds.
#[derive(Clone)]
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(settings.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(settings.access_secret.as_bytes()),
            access_ttl: Duration::seconds(settings.access_ttl_secs as i64),
            refresh_encoding: EncodingKey::from_secret(settings.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(settings.refresh_secret.as_bytes()),
            refresh_ttl: Duration::seconds(settings.refresh_ttl_secs as i64),
        }
    }

    /// Issue a single token of the given kind.
    pub fn issue(&self, kind: TokenKind, user: &User) -> Result<String, AppError> {
        let claims = self.claims_for(kind, user);
        self.sign(kind, &claims)
    }

    /// Issue both tokens for a user. The two signings are independent
    /// CPU-bound operations and run concurrently, joining before return.
    pub async fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_task = {
            let issuer = self.clone();
            let claims = self.claims_for(TokenKind::Access, user);
            tokio::task::spawn_blocking(move || issuer.sign(TokenKind::Access, &claims))
        };
        let refresh_task = {
            let issuer = self.clone();
            let claims = self.claims_for(TokenKind::Refresh, user);
            tokio::task::spawn_blocking(move || issuer.sign(TokenKind::Refresh, &claims))
        };

        let (access, refresh) = tokio::try_join!(access_task, refresh_task)
            .map_err(|e| AppError::Internal(format!("token signing task failed: {e}")))?;

        Ok(TokenPair {
            access_token: access?,
            refresh_token: refresh?,
        })
    }

    /// Verify a token against the secret for `kind` and decode its claims.
    ///
    /// Signature mismatch, elapsed expiry and malformed structure all
    /// collapse into [`AppError::Unauthorized`].
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, AppError> {
        let key = match kind {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    fn claims_for(&self, kind: TokenKind, user: &User) -> Claims {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    fn sign(&self, kind: TokenKind, claims: &Claims) -> Result<String, AppError> {
        let key = match kind {
            TokenKind::Access => &self.access_encoding,
            TokenKind::Refresh => &self.refresh_encoding,
        };
        encode(&Header::new(Algorithm::HS256), claims, key)
            .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&JwtSettings {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 3600,
        })
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            firstname: "Alice".to_string(),
            password_hash: "irrelevant".to_string(),
            role: Role::User,
            refresh_token_hash: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let issuer = issuer();
        let user = user();

        let token = issuer.issue(TokenKind::Access, &user).unwrap();
        let claims = issuer.verify(&token, TokenKind::Access).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_kind_separation() {
        let issuer = issuer();
        let user = user();

        let access = issuer.issue(TokenKind::Access, &user).unwrap();
        let refresh = issuer.issue(TokenKind::Refresh, &user).unwrap();

        assert!(issuer.verify(&access, TokenKind::Refresh).is_err());
        assert!(issuer.verify(&refresh, TokenKind::Access).is_err());
    }

    #[test]
    fn test_expired_token_rejected_despite_valid_signature() {
        let issuer = issuer();
        let user = user();

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = issuer.sign(TokenKind::Access, &claims).unwrap();

        assert!(matches!(
            issuer.verify(&token, TokenKind::Access),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let issuer = issuer();
        assert!(issuer.verify("not-a-token", TokenKind::Access).is_err());
        assert!(issuer.verify("", TokenKind::Refresh).is_err());
    }

    #[tokio::test]
    async fn test_issue_pair() {
        let issuer = issuer();
        let user = user();

        let pair = issuer.issue_pair(&user).await.unwrap();
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);

        assert!(issuer.verify(&pair.access_token, TokenKind::Access).is_ok());
        assert!(issuer.verify(&pair.refresh_token, TokenKind::Refresh).is_ok());
    }
}
