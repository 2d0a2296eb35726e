// ============================
// crates/notebox-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Used for login passwords and for refresh tokens at rest, so a leaked
//! credential store exposes neither directly.
use scrypt::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
    Scrypt,
};

/// Hash a secret using scrypt with a fresh random salt.
///
/// The salt is embedded in the returned PHC digest, so two hashes of the
/// same input differ.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a secret against a stored digest.
///
/// Malformed digests verify as `false` rather than erroring.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}
