//! Server configuration from the environment.
//!
//! `HOST` (default `0.0.0.0`), `PORT` (default `8080`), `RPS_DATA_FILE` and
//! `RPS_BACKUP_FILE` (save file and its backup, relative to the working directory).

use crate::storage::Storage;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_FILE: &str = "leaderboard_data.json";
pub const DEFAULT_BACKUP_FILE: &str = "leaderboard_data.backup.json";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: String,
    pub backup_file: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing or unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            data_file: lookup("RPS_DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
            backup_file: lookup("RPS_BACKUP_FILE")
                .unwrap_or_else(|| DEFAULT_BACKUP_FILE.to_string()),
        }
    }

    pub fn storage(&self) -> Storage {
        Storage::new(&self.data_file, &self.backup_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
