// crates/notebox-lib/src/validation.rs

//! Request payload checks shared by the handlers.
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
