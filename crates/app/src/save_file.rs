//! File-backed key/value store for engine saves.
//! The engine writes whole JSON blobs by key; this adapter keeps them in memory and only
//! touches disk on `flush`, which replaces the file atomically.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use battle_core::KeyValueStore;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format_snapshot_hash;

pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SaveFileError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("save file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("save file format {found} is not supported (expected {})", SAVE_FORMAT_VERSION)]
    UnsupportedVersion { found: u32 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    pub format_version: u32,
    pub seed: Option<u64>,
    pub snapshot_hash_hex: String,
    pub updated_at_unix_ms: u64,
    pub entries: BTreeMap<String, String>,
}

impl Default for SaveFile {
    fn default() -> Self {
        Self {
            format_version: SAVE_FORMAT_VERSION,
            seed: None,
            snapshot_hash_hex: format_snapshot_hash(0),
            updated_at_unix_ms: 0,
            entries: BTreeMap::new(),
        }
    }
}

impl SaveFile {
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SaveFileError> {
        let content = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&content)
            .map_err(|source| SaveFileError::Parse { path: path.to_path_buf(), source })?;
        if file.format_version != SAVE_FORMAT_VERSION {
            return Err(SaveFileError::UnsupportedVersion { found: file.format_version });
        }
        Ok(file)
    }
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    file: SaveFile,
}

impl FileStore {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("save.json");
            path
        })
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SaveFileError> {
        let path = path.into();
        let file = match SaveFile::load(&path) {
            Ok(file) => file,
            Err(SaveFileError::Io(err)) if err.kind() == io::ErrorKind::NotFound => SaveFile::default(),
            Err(err) => return Err(err),
        };
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn seed(&self) -> Option<u64> {
        self.file.seed
    }

    pub fn is_empty(&self) -> bool {
        self.file.entries.is_empty()
    }

    pub fn flush(&mut self, seed: u64, snapshot_hash: u64) -> Result<(), SaveFileError> {
        self.file.seed = Some(seed);
        self.file.snapshot_hash_hex = format_snapshot_hash(snapshot_hash);
        self.file.updated_at_unix_ms = unix_millis();
        self.file.write_atomic(&self.path)?;
        debug!(path = %self.path.display(), keys = self.file.entries.len(), "save flushed");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.file.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.file.entries.insert(key.to_string(), value);
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_opens_as_empty_store() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.seed(), None);
    }

    #[test]
    fn flush_writes_atomically_and_reopens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("save.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("ledger", "{\"coins\":5}".to_string());
        store.flush(99, 0xDEADBEEF).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.seed(), Some(99));
        assert_eq!(reopened.get("ledger").as_deref(), Some("{\"coins\":5}"));
        assert_eq!(SaveFile::load(&path).unwrap().snapshot_hash_hex, "0x00000000deadbeef");
    }

    #[test]
    fn unset_keys_are_not_written_until_flush() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("counters", "{}".to_string());
        assert!(!path.exists());
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStore::open(&path), Err(SaveFileError::Parse { .. })));
    }

    #[test]
    fn future_format_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save.json");
        let file = SaveFile { format_version: 9, ..SaveFile::default() };
        file.write_atomic(&path).unwrap();
        assert!(matches!(FileStore::open(&path), Err(SaveFileError::UnsupportedVersion { found: 9 })));
    }
}
