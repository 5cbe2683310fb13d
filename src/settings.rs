//! Display settings and preferences
//!
//! Persisted separately from the best score, as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::persistence::ScoreStore;

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen shake on hits and shots
    pub screen_shake: bool,
    /// Blink the ship while invulnerable and the bonus while live
    pub flicker: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no flicker)
    pub reduced_motion: bool,
    /// Pure black ink instead of the green-tinted default
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            flicker: true,
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective flicker (respects reduced_motion)
    pub fn effective_flicker(&self) -> bool {
        self.flicker && !self.reduced_motion
    }

    /// Parse settings from JSON; unknown fields are ignored, missing ones default
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Key under which settings live in a key-value store
    pub const STORAGE_KEY: &'static str = "gb_galattica_settings";

    /// Load settings from a key-value store (LocalStorage on wasm); absent
    /// or malformed entries fall back to defaults
    pub fn load_from_store<S: ScoreStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY).map(|json| Self::from_json(&json)) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from store");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Bad stored settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as JSON under `STORAGE_KEY`
    pub fn save_to_store<S: ScoreStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_reduced_motion_overrides() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(!settings.effective_flicker());
        assert!(Settings::default().effective_screen_shake());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"high_contrast": true}"#).unwrap();
        assert!(settings.high_contrast);
        assert!(settings.screen_shake);
        assert!(settings.flicker);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("[1, 2").is_err());
    }

    #[test]
    fn test_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load_from_store(&store), Settings::default());
        let settings = Settings {
            high_contrast: true,
            ..Default::default()
        };
        settings.save_to_store(&mut store).unwrap();
        assert_eq!(Settings::load_from_store(&store), settings);
    }

    #[test]
    fn test_malformed_store_entry_defaults() {
        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, "{oops");
        assert_eq!(Settings::load_from_store(&store), Settings::default());
    }

    struct ReadOnlyStore;

    impl ScoreStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_save_failure_is_reported() {
        let result = Settings::default().save_to_store(&mut ReadOnlyStore);
        assert!(matches!(result, Err(StoreError::Unavailable)));
    }

    #[test]
    fn test_missing_file_defaults() {
        let path = std::env::temp_dir().join("galattica_no_such_settings.json");
        let _ = fs::remove_file(&path);
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("galattica_settings_{}.json", std::process::id()));
        let settings = Settings {
            flicker: false,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = fs::remove_file(&path);
    }
}
