//! Desktop preferences persisted in a small key-value store.
//!
//! The store mirrors browser local storage: string keys mapping to string
//! values. Preferences are one JSON record under [`SETTINGS_KEY`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::SETTINGS_KEY;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait KvStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn set_item(&mut self, key: &str, value: String) -> Result<(), SettingsError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }
}

/// Key-value store backed by one JSON object on disk.
///
/// Every write rewrites the whole file; a missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, SettingsError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(self.io_error(err)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

impl KvStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        // a corrupt file is replaced rather than blocking every later save
        let mut items = self.read_all().unwrap_or_default();
        items.insert(key.to_string(), value);
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let json = serde_json::to_string_pretty(&items)?;
        fs::write(&self.path, json).map_err(|err| self.io_error(err))
    }
}

/// Fields absent from a stored record take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesktopSettings {
    pub language: String,
    pub sound: bool,
    pub high_contrast: bool,
    pub reduce_motion: bool,
    pub advanced_warnings: bool,
    pub require_access: bool,
    pub auto_lock_secret: bool,
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            sound: true,
            high_contrast: false,
            reduce_motion: false,
            advanced_warnings: true,
            require_access: true,
            auto_lock_secret: false,
        }
    }
}

/// Languages offered by the settings panel.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("de", "Deutsch"),
];

impl DesktopSettings {
    pub fn language_label(&self) -> &str {
        LANGUAGES
            .iter()
            .find(|(code, _)| *code == self.language)
            .map(|(_, label)| *label)
            .unwrap_or(self.language.as_str())
    }

    pub fn cycle_language(&mut self) {
        let next = LANGUAGES
            .iter()
            .position(|(code, _)| *code == self.language)
            .map(|idx| (idx + 1) % LANGUAGES.len())
            .unwrap_or(0);
        self.language = LANGUAGES[next].0.to_string();
    }
}

/// Read preferences, falling back to defaults when the record is missing or
/// unreadable.
pub fn load_settings(store: &dyn KvStore) -> DesktopSettings {
    match try_load_settings(store) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(%err, "using default settings");
            DesktopSettings::default()
        }
    }
}

pub fn try_load_settings(store: &dyn KvStore) -> Result<DesktopSettings, SettingsError> {
    match store.get_item(SETTINGS_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(DesktopSettings::default()),
    }
}

/// Persist preferences. Failures are logged and otherwise ignored.
pub fn save_settings(store: &mut dyn KvStore, settings: &DesktopSettings) {
    let result = serde_json::to_string(settings)
        .map_err(SettingsError::from)
        .and_then(|json| store.set_item(SETTINGS_KEY, json));
    if let Err(err) = result {
        tracing::warn!(%err, "failed to save settings");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_yields_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_settings(&store), DesktopSettings::default());
    }

    #[test]
    fn partial_record_merges_with_defaults() {
        let mut store = MemoryStore::new();
        store
            .set_item(SETTINGS_KEY, r#"{"highContrast":true}"#.to_string())
            .unwrap();
        let settings = load_settings(&store);
        assert!(settings.high_contrast);
        assert!(settings.sound);
        assert_eq!(settings.language, "en");
    }

    #[test]
    fn corrupt_record_yields_defaults() {
        let mut store = MemoryStore::new();
        store.set_item(SETTINGS_KEY, "{not json".to_string()).unwrap();
        assert!(try_load_settings(&store).is_err());
        assert_eq!(load_settings(&store), DesktopSettings::default());
    }

    #[test]
    fn saved_record_uses_camel_case_keys() {
        let mut store = MemoryStore::new();
        let settings = DesktopSettings {
            reduce_motion: true,
            ..DesktopSettings::default()
        };
        save_settings(&mut store, &settings);
        let raw = store.get_item(SETTINGS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"reduceMotion\":true"));
        assert_eq!(load_settings(&store), settings);
    }

    #[test]
    fn cycle_language_wraps() {
        let mut settings = DesktopSettings::default();
        for _ in 0..LANGUAGES.len() {
            settings.cycle_language();
        }
        assert_eq!(settings.language, "en");
        settings.language = "xx".into();
        settings.cycle_language();
        assert_eq!(settings.language, "en");
        assert_eq!(settings.language_label(), "English");
    }
}
