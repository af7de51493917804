//! Player settings and keybindings
//!
//! Persisted as JSON: a file next to the native binary, LocalStorage in the
//! browser. Missing or malformed documents fall back to defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Action;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("browser storage unavailable: {0}")]
    Storage(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    /// Target frame rate
    pub fps: u32,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Debug overlays ===
    pub show_fps: bool,
    pub show_hitboxes: bool,

    /// Key names bound to each action
    pub keybindings: BTreeMap<Action, Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            title: "Ridiculously Overpowered".to_string(),
            fps: 60,

            music_volume: 0.7,
            sfx_volume: 0.8,

            show_fps: false,
            show_hitboxes: false,

            keybindings: default_keybindings(),
        }
    }
}

fn default_keybindings() -> BTreeMap<Action, Vec<String>> {
    let keys = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Action::ALL
        .iter()
        .map(|&action| {
            let bound = match action {
                Action::NavigateUp => keys(&["ArrowUp"]),
                Action::NavigateDown => keys(&["ArrowDown"]),
                Action::NavigateLeft => keys(&["ArrowLeft"]),
                Action::NavigateRight => keys(&["ArrowRight"]),
                Action::Confirm => keys(&["Space", "Enter"]),
                Action::Cancel => keys(&["Escape"]),
                Action::Menu => keys(&["m"]),
                Action::ToggleShop => keys(&["Tab"]),
                Action::WaveSelect => keys(&["s"]),
                Action::Continue => keys(&["c"]),
                Action::ToggleFps => keys(&["F3"]),
                Action::ToggleHitboxes => keys(&["F4"]),
            };
            (action, bound)
        })
        .collect()
}

impl Settings {
    /// Native settings file
    pub const DEFAULT_PATH: &'static str = "config.json";

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "ridiculously_overpowered_settings";

    /// Parse a (possibly partial) settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.normalized())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp volumes and restore bindings for actions the document left out
    pub fn normalized(mut self) -> Self {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.fps = self.fps.max(1);
        for (action, keys) in default_keybindings() {
            self.keybindings.entry(action).or_insert(keys);
        }
        self
    }

    /// Actions bound to a key name (letters match case-insensitively)
    pub fn actions_for_key(&self, key: &str) -> Vec<Action> {
        self.keybindings
            .iter()
            .filter(|(_, keys)| keys.iter().any(|k| k.eq_ignore_ascii_case(key)))
            .map(|(action, _)| *action)
            .collect()
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// Load from a file; defaults when missing or malformed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("{}: {e}; using default settings", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {e}; using default settings", path.display());
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(Self::DEFAULT_PATH)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(Self::DEFAULT_PATH)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings ignored: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), SettingsError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| SettingsError::Storage("no LocalStorage".to_string()))?;

        storage
            .set_item(Self::STORAGE_KEY, &self.to_json()?)
            .map_err(|e| SettingsError::Storage(format!("{e:?}")))?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_merges_defaults() {
        let settings = Settings::from_json(r#"{ "fps": 30, "music_volume": 3.0 }"#).unwrap();
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.music_volume, 1.0);
        assert_eq!(settings.window_width, 1280);
        assert_eq!(settings.keybindings.len(), Action::ALL.len());
    }

    #[test]
    fn test_partial_keybindings_keep_other_actions() {
        let settings =
            Settings::from_json(r#"{ "keybindings": { "Confirm": ["x"] } }"#).unwrap();
        assert_eq!(settings.actions_for_key("x"), vec![Action::Confirm]);
        assert!(settings.actions_for_key("Enter").is_empty());
        assert_eq!(settings.actions_for_key("Tab"), vec![Action::ToggleShop]);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(matches!(
            Settings::from_json("[1, 2"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_key_lookup_ignores_case() {
        let settings = Settings::default();
        assert_eq!(settings.actions_for_key("M"), vec![Action::Menu]);
        assert_eq!(settings.actions_for_key("Space"), vec![Action::Confirm]);
        assert!(settings.actions_for_key("q").is_empty());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("ro_settings_missing_does_not_exist.json");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("ro_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.set_sfx_volume(0.25);
        settings.show_hitboxes = true;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
