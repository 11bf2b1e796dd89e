//! Env-var configuration, resolved once at startup.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

const POCKETPOST_DIR: &str = ".pocketpost";
const DB_FILE: &str = "pocketpost.db";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("POCKETPOST_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("POCKETPOST_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);
        let db_path = match env::var("POCKETPOST_DB") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_db_path()?,
        };
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        Ok(Self {
            host,
            port,
            db_path,
        })
    }
}

/// Default database location: ~/.pocketpost/pocketpost.db
fn default_db_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(POCKETPOST_DIR).join(DB_FILE))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}
