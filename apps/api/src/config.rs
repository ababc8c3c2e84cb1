use anyhow::{Context, Result};

/// Host configuration loaded from environment variables. Every key has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file replacing the built-in engine tables.
    pub engine_config_path: Option<String>,
    pub analysis_timeout_ms: u64,
    pub max_resume_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            engine_config_path: std::env::var("ENGINE_CONFIG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            analysis_timeout_ms: parse_env("ANALYSIS_TIMEOUT_MS", 5000)?,
            max_resume_bytes: parse_env("MAX_RESUME_BYTES", 200_000)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            engine_config_path: None,
            analysis_timeout_ms: 5000,
            max_resume_bytes: 200_000,
        }
    }
}
