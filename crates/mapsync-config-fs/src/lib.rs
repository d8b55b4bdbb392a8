// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem [`ConfigStore`]: one JSON file per key in a single directory.
//!
//! Saves write a hidden sibling temp file and rename it over the target, so
//! a reader sees either the old blob or the new one, never a torn write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use mapsync_app_core::config::{validate_key, ConfigError, ConfigStore};
use tracing::debug;

const EXT: &str = "json";

/// Directory of `<key>.json` files.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    dir: PathBuf,
}

impl FsConfigStore {
    /// Store in the platform config directory (e.g. `~/.config/mapsync`).
    pub fn user() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("dev", "flyingrobots", "mapsync")
            .ok_or_else(|| ConfigError::Backend("no home directory for config".into()))?;
        Self::open(dirs.config_dir())
    }

    /// Store in `dir`, creating it when missing.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "config store opened");
        Ok(Self { dir })
    }

    /// Backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys with a stored file, sorted. Files that are not `<valid-key>.json`
    /// are ignored.
    pub fn keys(&self) -> Result<Vec<String>, ConfigError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_owned());
                }
            }
        }
        keys.sort_unstable();
        Ok(keys)
    }

    fn file(&self, key: &str) -> Result<PathBuf, ConfigError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXT}")))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.file(key)?) {
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ConfigError::NotFound(key.to_owned()))
            }
            other => other.map_err(ConfigError::from),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let target = self.file(key)?;
        let staging = self.dir.join(format!(".{key}.{EXT}.tmp"));
        fs::write(&staging, data)?;
        if let Err(err) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        debug!(key, bytes = data.len(), "config saved");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        match fs::remove_file(self.file(key)?) {
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            other => other.map_err(ConfigError::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, FsConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::open(dir.path().join("mapsync")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_nested_dir() {
        let (dir, store) = store();
        assert!(dir.path().join("mapsync").is_dir());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn save_replaces_without_leaving_staging_files() {
        let (_dir, store) = store();
        store.save_raw("map-settings", b"{\"debug\":false}").unwrap();
        store.save_raw("map-settings", b"{\"debug\":true}").unwrap();
        assert_eq!(store.load_raw("map-settings").unwrap(), b"{\"debug\":true}");
        let names: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["map-settings.json"]);
    }

    #[test]
    fn missing_key_is_not_found_with_key() {
        let (_dir, store) = store();
        assert!(matches!(
            store.load_raw("style-catalog"),
            Err(ConfigError::NotFound(k)) if k == "style-catalog"
        ));
    }

    #[test]
    fn keys_cannot_escape_dir() {
        let (dir, store) = store();
        for key in ["../escape", "nested/key", ""] {
            assert!(matches!(store.save_raw(key, b"{}"), Err(ConfigError::InvalidKey(_))));
            assert!(matches!(store.load_raw(key), Err(ConfigError::InvalidKey(_))));
        }
        assert!(!dir.path().join("escape.json").exists());
    }

    #[test]
    fn remove_is_idempotent() {
        let (_dir, store) = store();
        store.save_raw("a", b"1").unwrap();
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert!(matches!(store.load_raw("a"), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn keys_skip_foreign_files() {
        let (_dir, store) = store();
        store.save_raw("style-catalog", b"{}").unwrap();
        store.save_raw("map-settings", b"{}").unwrap();
        fs::write(store.dir().join("notes.txt"), "x").unwrap();
        fs::write(store.dir().join("Bad Name.json"), "{}").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["map-settings", "style-catalog"]);
    }
}
