//! Server Configuration
//!
//! All settings come from the environment with sensible development
//! defaults. The config is constructed once in `main` and carried
//! inside `ServerState`, never read from globals.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub environment: String,

    pub holiday_api_url: String,
    pub holiday_country: String,

    /// Credentials seeded when the user table is empty.
    pub default_admin_username: String,
    pub default_admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            holiday_api_url: std::env::var("HOLIDAY_API_URL")
                .unwrap_or_else(|_| "https://date.nager.at".into()),
            holiday_country: std::env::var("HOLIDAY_COUNTRY").unwrap_or_else(|_| "MX".into()),
            default_admin_username: std::env::var("DEFAULT_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".into()),
            default_admin_password: std::env::var("DEFAULT_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".into()),
        }
    }

    /// Path of the SQLite file inside the work directory.
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("tutoria.db")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
