//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Menu file (YAML or JSON). When None, the built-in menu is used.
    pub menu_config: Option<PathBuf>,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let menu_config = env::var("MENU_CONFIG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| vec!["*".to_string()]);

        Ok(Self {
            port,
            menu_config,
            cors_allowed_origins,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            menu_config: None,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
