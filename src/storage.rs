//! JSON save file for the player store, with a SHA-256 checksum and a backup copy.
//!
//! Layout:
//! ```json
//! { "leaderboard": { "<player id>": { ... } }, "checksum": "<hex>", "saved_at": "<rfc3339>" }
//! ```
//! The checksum covers the compact, key-sorted encoding of `leaderboard`. Before each write the
//! current file is copied to the backup path. Loading falls back to the backup when the main
//! file is missing, unreadable or fails verification, and to an empty store when both do.

use crate::models::{Player, PlayerId, PlayerStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("checksum mismatch (stored {stored}, computed {computed})")]
    ChecksumMismatch { stored: String, computed: String },
}

#[derive(Serialize)]
struct SaveFileOut<'a> {
    leaderboard: &'a PlayerStore,
    checksum: String,
    saved_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct SaveFileIn {
    #[serde(default)]
    leaderboard: serde_json::Value,
    #[serde(default)]
    checksum: String,
}

/// SHA-256 over the compact JSON text of `value`. Object keys come out sorted, so equal
/// content always hashes the same regardless of map iteration order.
pub fn checksum(value: &serde_json::Value) -> String {
    format!("{:x}", Sha256::digest(value.to_string().as_bytes()))
}

/// Checksum of a store as it would be written.
pub fn store_checksum(players: &PlayerStore) -> Result<String, StorageError> {
    Ok(checksum(&serde_json::to_value(players)?))
}

/// Where the save file and its backup live.
#[derive(Clone, Debug)]
pub struct Storage {
    data_path: PathBuf,
    backup_path: PathBuf,
}

impl Storage {
    pub fn new(data_path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            backup_path: backup_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Write `players`, keeping the previous file as backup.
    pub fn save(&self, players: &PlayerStore) -> Result<(), StorageError> {
        if self.data_path.exists() {
            if let Err(e) = fs::copy(&self.data_path, &self.backup_path) {
                log::warn!(
                    "Could not back up {} to {}: {}",
                    self.data_path.display(),
                    self.backup_path.display(),
                    e
                );
            }
        }

        let out = SaveFileOut {
            leaderboard: players,
            checksum: store_checksum(players)?,
            saved_at: Utc::now(),
        };
        let body = serde_json::to_string_pretty(&out)?;

        let tmp = self.data_path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.data_path).map_err(|source| StorageError::Io {
            path: self.data_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Load the store, recovering from the backup or starting empty as needed. Never fails.
    pub fn load(&self) -> PlayerStore {
        let data_exists = self.data_path.exists();
        if !data_exists && !self.backup_path.exists() {
            log::info!(
                "No save file at {}, starting with an empty leaderboard",
                self.data_path.display()
            );
            return PlayerStore::new();
        }

        if data_exists {
            match read_verified(&self.data_path) {
                Ok(store) => {
                    log::info!("Leaderboard loaded successfully ({} players)", store.len());
                    return store;
                }
                Err(e) => log::warn!(
                    "Could not load {} ({}), attempting backup restore",
                    self.data_path.display(),
                    e
                ),
            }
        } else {
            log::warn!(
                "Save file {} is missing, attempting backup restore",
                self.data_path.display()
            );
        }

        if !self.backup_path.exists() {
            log::error!("No backup available, starting with an empty leaderboard");
            return PlayerStore::new();
        }

        match read_verified(&self.backup_path) {
            Ok(store) => {
                log::info!("Restored from backup successfully ({} players)", store.len());
                store
            }
            Err(e) => {
                log::error!(
                    "Backup restore from {} failed ({}), starting with an empty leaderboard",
                    self.backup_path.display(),
                    e
                );
                PlayerStore::new()
            }
        }
    }
}

/// Read one save file, verify its checksum, and decode the records.
fn read_verified(path: &Path) -> Result<PlayerStore, StorageError> {
    let raw = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: SaveFileIn = serde_json::from_str(&raw)?;

    let computed = checksum(&file.leaderboard);
    if computed != file.checksum {
        return Err(StorageError::ChecksumMismatch {
            stored: file.checksum,
            computed,
        });
    }

    let records: HashMap<PlayerId, Player> = if file.leaderboard.is_null() {
        HashMap::new()
    } else {
        serde_json::from_value(file.leaderboard)?
    };
    Ok(PlayerStore::from_records(records))
}
