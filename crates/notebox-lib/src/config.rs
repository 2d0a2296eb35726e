// ============================
// crates/notebox-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Token signing configuration
    pub jwt: JwtSettings,
}

/// Signing secrets and lifetimes for the two token kinds.
///
/// The secrets have no defaults: a deployment without them must fail at
/// startup, not per request.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret for short-lived access tokens
    pub access_secret: String,
    /// Secret for long-lived refresh tokens, independent of the access secret
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_secs: u64,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_access_ttl() -> u64 {
    15 * 60 // 15 minutes
}

fn default_refresh_ttl() -> u64 {
    60 * 60 * 24 * 7 // 7 days
}

impl Settings {
    /// Load settings from `config.toml` merged with `NOTEBOX_` environment
    /// variables (nested keys split on `__`, e.g. `NOTEBOX_JWT__ACCESS_SECRET`).
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("config.toml"))
                .merge(Env::prefixed("NOTEBOX_").split("__")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }
}
