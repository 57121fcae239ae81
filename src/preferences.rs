use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::model::{Preferences, Theme};
use crate::util::{read_json, write_json_pretty};

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "preferences missing, using defaults");
            return Ok(Preferences::default());
        }
        read_json(&self.path)
    }

    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        write_json_pretty(&self.path, preferences)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Preferences> {
        let mut preferences = self.load()?;
        preferences.theme = theme;
        self.save(&preferences)?;
        Ok(preferences)
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        let current = self.load()?.theme;
        let preferences = self.set_theme(current.toggled())?;
        Ok(preferences.theme)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn temp_store(label: &str) -> PreferenceStore {
        PreferenceStore::new(std::env::temp_dir().join(format!(
            "handover_prefs_{}_{}_{}/preferences.json",
            label,
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        )))
    }

    fn cleanup(store: &PreferenceStore) {
        if let Some(parent) = store.path().parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn load_defaults_to_light_when_missing() {
        let store = temp_store("missing");
        let preferences = store.load().expect("load defaults");
        assert_eq!(preferences.theme, Theme::Light);
        assert!(!store.path().exists());
    }

    #[test]
    fn toggle_theme_flips_and_persists() {
        let store = temp_store("toggle");

        assert_eq!(store.toggle_theme().expect("toggle"), Theme::Dark);
        assert_eq!(store.load().expect("reload").theme, Theme::Dark);
        assert_eq!(store.toggle_theme().expect("toggle back"), Theme::Light);

        let raw = fs::read_to_string(store.path()).expect("stored file");
        assert!(raw.contains("\"light\""));
        cleanup(&store);
    }

    #[test]
    fn set_theme_overwrites_previous_value() {
        let store = temp_store("set");
        store.set_theme(Theme::Dark).expect("set dark");
        store.set_theme(Theme::Dark).expect("set dark again");
        assert_eq!(store.load().expect("reload").theme, Theme::Dark);
        cleanup(&store);
    }
}
