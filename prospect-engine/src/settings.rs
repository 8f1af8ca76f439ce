//! Persistence for lightweight per-user settings
//!
//! Settings are a flat string-to-string map. The file store writes the
//! whole map on every put; the payloads are tiny and whole-file writes
//! keep the on-disk shape trivially inspectable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key-value store for user preferences.
pub trait SettingsStore: Send {
    /// Read a value, `None` when the key has never been written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value durably.
    fn put(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Volatile store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store.
///
/// An unreadable or malformed file degrades to an empty map rather
/// than failing the session; preferences are never worth blocking a
/// login over.
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileSettings {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match load_map(&path) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "settings unreadable, starting empty");
                HashMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        save_map(&self.path, &self.values)
    }
}

fn load_map(path: &Path) -> Result<HashMap<String, String>, SettingsError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let contents = std::fs::read_to_string(path)?;
    let values = serde_json::from_str::<HashMap<String, String>>(&contents)?;
    Ok(values)
}

fn save_map(path: &Path, values: &HashMap<String, String>) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(values)?;
    std::fs::write(path, contents)?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemorySettings::new();
        assert_eq!(store.get("k"), None);
        store.put("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut store = FileSettings::open(&path);
        store.put("columns", "[\"name\",\"email\"]").unwrap();
        drop(store);

        let store = FileSettings::open(&path);
        assert_eq!(store.get("columns").as_deref(), Some("[\"name\",\"email\"]"));
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettings::open(dir.path().join("never-written.json"));
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all {{{").unwrap();

        let store = FileSettings::open(&path);
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_put_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/settings.json");

        let mut store = FileSettings::open(&path);
        store.put("k", "v").unwrap();
        assert!(path.exists());
    }
}
