use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_seconds: i64,
    pub secure_cookie: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub session: SessionConfig,
    pub static_dir: String,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let session = SessionConfig {
            ttl_seconds: parse_var("SESSION_TTL_SECONDS", 30 * 60)?,
            secure_cookie: parse_var("SESSION_SECURE_COOKIE", false)?,
        };
        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_var("APP_PORT", 8080)?,
            session,
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            session: SessionConfig {
                ttl_seconds: 30 * 60,
                secure_cookie: false,
            },
            static_dir: "static".into(),
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Unset falls back to `default`; set but unparsable is an error.
fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
