use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::analysis::preprocess::PreprocessMode;

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// Job descriptions shorter than this (after trimming) are rejected.
    pub min_jd_chars: usize,
    pub preprocess_mode: PreprocessMode,
    /// Optional JSON skill table that replaces the bundled one.
    pub skill_db_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://resume_history.db".to_string(),
            database_max_connections: 5,
            port: 5000,
            rust_log: "info".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
            min_jd_chars: 20,
            preprocess_mode: PreprocessMode::default(),
            skill_db_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_env(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            min_jd_chars: parse_env("MIN_JD_CHARS", defaults.min_jd_chars)?,
            preprocess_mode: parse_env("SIMILARITY_PREPROCESSING", defaults.preprocess_mode)?,
            skill_db_path: std::env::var_os("SKILL_DB_PATH").map(PathBuf::from),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}
