use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Path of the email layout shell (default: `templates/layout.html`).
    pub layout_path: PathBuf,
    /// Directory uploaded images are written to and served from (default: `uploads`).
    pub upload_dir: PathBuf,
    /// Maximum accepted upload request size in bytes (default: 5 MiB).
    pub max_upload_bytes: usize,
    /// Public origin used to build upload URLs. When unset, the request's
    /// `Host` header is used.
    pub public_base_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `LAYOUT_PATH`          | `templates/layout.html`    |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `MAX_UPLOAD_BYTES`     | `5242880`                  |
    /// | `PUBLIC_BASE_URL`      | unset                      |
    ///
    /// # Panics
    ///
    /// Panics if a numeric variable does not parse, or if the JWT
    /// configuration is incomplete.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 5000),
            cors_origins: parse_origins(&env_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            layout_path: PathBuf::from(env_or("LAYOUT_PATH", "templates/layout.html")),
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 5 * 1024 * 1024),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .ok()
                .and_then(|url| normalize_base_url(&url)),
        }
    }
}

/// Read an env var, falling back to `default` when unset.
pub(crate) fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an env var, falling back to `default` when unset.
///
/// # Panics
///
/// Panics with the variable name when the value is set but does not parse.
pub fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

/// Output format of the tracing subscriber, from `LOG_FORMAT` (`text` or `json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(&env_or("LOG_FORMAT", "text"))
    }

    /// Anything other than `json` falls back to text.
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Trim whitespace and trailing slashes; blank values count as unset.
fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
