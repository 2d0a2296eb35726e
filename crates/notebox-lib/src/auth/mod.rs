// ============================
// crates/notebox-lib/src/auth/mod.rs
// ============================
//! Authentication & session lifecycle: password hashing, dual-token
//! issuance, bearer guards and the rotation state machine.

pub mod middleware;
pub mod password;
pub mod routes;
pub mod session;
pub mod token;

pub use middleware::{AuthClaims, RefreshContext};
pub use session::SessionManager;
pub use token::{Claims, TokenIssuer, TokenKind, TokenPair};
