use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_refresh_seconds")]
    pub cache_refresh_seconds: u64,
    /// Bearer value for /admin/cache/reload. Empty disables the endpoint.
    #[serde(default)]
    pub admin_token: String,
}

fn default_port() -> u16 {
    3000
}

fn default_database_path() -> String {
    "catalog.db".to_string()
}

fn default_refresh_seconds() -> u64 {
    600
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
