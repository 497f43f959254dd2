//! # configs
//!
//! Layered runtime settings: an optional `config/default.toml` file, then
//! `QUILL__SECTION__KEY` environment overrides. Secrets never leave their
//! `SecretString` wrapper except at the single point of use.

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub media: MediaSettings,
    #[serde(default)]
    pub retention: RetentionSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct MediaSettings {
    #[serde(default = "default_media_root")]
    pub root: String,
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct RetentionSettings {
    /// How often the sweeper polls for due deletions.
    #[serde(default = "default_sweep_seconds")]
    pub sweep_seconds: u64,
    /// Post lifetime before the deferred deletion fires. Tunable so tests
    /// can compress time; production keeps the 24-hour default.
    #[serde(default = "default_post_ttl_hours")]
    pub post_ttl_hours: i64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_max_connections() -> u32 {
    5
}
fn default_media_root() -> String {
    "./data/uploads".to_string()
}
fn default_url_prefix() -> String {
    "/static/uploads".to_string()
}
fn default_sweep_seconds() -> u64 {
    60
}
fn default_post_ttl_hours() -> i64 {
    24
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            root: default_media_root(),
            url_prefix: default_url_prefix(),
        }
    }
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            sweep_seconds: default_sweep_seconds(),
            post_ttl_hours: default_post_ttl_hours(),
        }
    }
}

/// Loads settings from `config/default.toml` (if present) and the
/// environment. Call after `dotenvy::dotenv()` so `.env` counts.
pub fn load() -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("QUILL")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
