//! Last interactive selection, cached between runs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ScaffoldResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub preset: String,
    #[serde(default)]
    pub options: BTreeMap<String, bool>,
    #[serde(default)]
    pub updated_at: String,
}

impl Preferences {
    pub fn new(preset: impl Into<String>, options: BTreeMap<String, bool>) -> Self {
        Self {
            preset: preset.into(),
            options,
            updated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Reads and writes the preferences file.
///
/// A disabled store never touches the filesystem.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
    enabled: bool,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when caching is off or nothing has been cached yet; an
    /// error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> ScaffoldResult<Option<Preferences>> {
        if !self.enabled || !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let preferences: Preferences = serde_json::from_str(&content)?;
        debug!("Loaded cached preset '{}'", preferences.preset);
        Ok(Some(preferences))
    }

    /// Returns whether anything was written.
    pub fn save(&self, preferences: &Preferences) -> ScaffoldResult<bool> {
        if !self.enabled {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(preferences)?;
        std::fs::write(&self.path, json)?;
        debug!("Cached preferences at {}", self.path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Preferences {
        let mut options = BTreeMap::new();
        options.insert("api".to_string(), true);
        options.insert("model".to_string(), false);
        Preferences::new("api-complete", options)
    }

    #[test]
    fn test_save_creates_directory_and_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage/app/prefs.json");
        let store = PreferencesStore::new(&path, true);

        assert!(store.save(&sample()).unwrap());
        assert!(path.exists());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.preset, "api-complete");
        assert_eq!(loaded.options.get("api"), Some(&true));
        assert!(!loaded.updated_at.is_empty());
    }

    #[test]
    fn test_disabled_store_ignores_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"preset":"minimal","options":{}}"#).unwrap();

        let store = PreferencesStore::new(&path, false);
        assert!(store.load().unwrap().is_none());

        std::fs::remove_file(&path).unwrap();
        assert!(!store.save(&sample()).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_is_no_preferences() {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferencesStore::new(temp_dir.path().join("none.json"), true);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, "invalid json content {]").unwrap();

        let store = PreferencesStore::new(&path, true);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_missing_fields_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"preset":"minimal"}"#).unwrap();

        let loaded = PreferencesStore::new(&path, true).load().unwrap().unwrap();
        assert_eq!(loaded.preset, "minimal");
        assert!(loaded.options.is_empty());
    }
}
