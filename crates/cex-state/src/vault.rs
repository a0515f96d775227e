//! # JSON Snapshot Vault
//!
//! Directory-backed key → JSON-document storage. Each collection is one
//! file (`<key>.json`) written wholesale on every save — the server-side
//! rendering of the browser local-storage model the demo persists into.
//!
//! Writes go to a temporary sibling file first and are renamed into
//! place, so a crash mid-write leaves the previous snapshot intact.
//! Absent keys load as the collection's default value.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use cex_core::StorageError;

/// A directory of JSON collection snapshots.
#[derive(Debug, Clone)]
pub struct JsonVault {
    dir: PathBuf,
}

impl JsonVault {
    /// Open a vault at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::DirUnavailable {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Path of the snapshot file for `key`.
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Write a collection snapshot wholesale.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })?;

        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let write_err = |source| StorageError::WriteFailed {
            key: key.to_string(),
            source,
        };
        fs::write(&tmp, bytes).map_err(write_err)?;
        fs::rename(&tmp, self.path_for(key)).map_err(write_err)?;
        Ok(())
    }

    /// Load a collection snapshot; absent keys yield `T::default()`.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StorageError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    key: key.to_string(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
    }
}
