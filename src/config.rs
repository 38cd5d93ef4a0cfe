use std::fmt;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;
pub const DEFAULT_ACCESS_COOKIE: &str = "sb-access-token";
pub const DEFAULT_SIGNIN_PATH: &str = "/signin";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, value, reason } => {
                write!(f, "{key}={value:?} is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Cookie and redirect settings used by the route guard.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSettings {
    pub access_cookie: String,
    pub signin_path: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            access_cookie: DEFAULT_ACCESS_COOKIE.to_string(),
            signin_path: DEFAULT_SIGNIN_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub auth: AuthSettings,
}

impl Config {
    /// Read configuration from the process environment.
    /// `.env` is loaded first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let database_url = non_empty("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
            return Err(ConfigError::Invalid {
                key: "DATABASE_URL",
                value: database_url,
                reason: "expected a postgres:// URL".to_string(),
            });
        }

        let max_connections = match non_empty("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        value: raw,
                        reason: "expected a positive integer".to_string(),
                    });
                }
            },
        };

        let signin_path =
            non_empty("SIGNIN_PATH").unwrap_or_else(|| DEFAULT_SIGNIN_PATH.to_string());
        if !signin_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "SIGNIN_PATH",
                value: signin_path,
                reason: "must start with '/'".to_string(),
            });
        }

        Ok(Config {
            database_url,
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_connections,
            auth: AuthSettings {
                access_cookie: non_empty("ACCESS_COOKIE")
                    .unwrap_or_else(|| DEFAULT_ACCESS_COOKIE.to_string()),
                signin_path,
            },
        })
    }
}
