use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Project-scoped key/value preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;

    /// Reads `key` as a boolean, falling back to `default` when unset or unparsable.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).as_deref().map(str::trim) {
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                warn!("Ignoring non-boolean value '{}' for {}", other, key);
                default
            }
            None => default,
        }
    }
}

/// Preferences persisted as a flat JSON object.
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonPreferenceStore {
    /// Loads the store at `path`. A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::try_load(&path) {
            Ok(values) => values,
            Err(e) => {
                warn!(
                    "Failed to load preferences from {}, using defaults: {}",
                    path.display(),
                    e
                );
                BTreeMap::new()
            }
        };
        debug!("Loaded {} preferences from {}", values.len(), path.display());
        Self { path, values }
    }

    fn try_load(path: &Path) -> io::Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)?;
        debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::InMemoryPreferenceStore;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonPreferenceStore::open(temp_dir.path().join("preferences.json"));
        assert_eq!(store.get("custom-output-dir"), None);
        assert_eq!(store.entries().count(), 0);
    }

    #[test]
    fn test_set_persists_across_opens() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".promptpilot").join("preferences.json");

        let mut store = JsonPreferenceStore::open(&path);
        store.set("custom-output-filename", "ctx.md").unwrap();
        store.set("patch-mode-enabled", "false").unwrap();

        let reopened = JsonPreferenceStore::open(&path);
        assert_eq!(
            reopened.get("custom-output-filename"),
            Some("ctx.md".to_string())
        );
        assert!(!reopened.get_bool("patch-mode-enabled", true));
    }

    #[test]
    fn test_remove_unsets_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");

        let mut store = JsonPreferenceStore::open(&path);
        store.set("custom-output-dir", "out").unwrap();
        store.remove("custom-output-dir").unwrap();

        let reopened = JsonPreferenceStore::open(&path);
        assert_eq!(reopened.get("custom-output-dir"), None);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonPreferenceStore::open(&path);
        assert_eq!(store.entries().count(), 0);
    }

    #[test]
    fn test_get_bool_defaults() {
        let store = InMemoryPreferenceStore::new()
            .with("on", "true")
            .with("off", " false ")
            .with("junk", "yes")
            .with("blank", "   ");

        assert!(store.get_bool("on", false));
        assert!(!store.get_bool("off", true));
        assert!(store.get_bool("junk", true));
        assert!(!store.get_bool("blank", false));
        assert!(store.get_bool("missing", true));
    }
}
