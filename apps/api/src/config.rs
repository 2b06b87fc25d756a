use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a working default so a dev instance starts bare.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory for the on-disk analysis result cache.
    pub cache_dir: String,
    /// Upload size ceiling for the analyze endpoint.
    pub max_upload_bytes: usize,
    /// Fallback roots searched when a batch resume path does not resolve as given.
    pub resume_dirs: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cache_dir: std::env::var("CACHE_DIR").unwrap_or_else(|_| "cache".to_string()),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (5 * 1024 * 1024).to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            resume_dirs: std::env::var("RESUME_DIRS")
                .unwrap_or_else(|_| "uploads".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}
