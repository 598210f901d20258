//! Cosmetic settings use-case service.
//!
//! # Responsibility
//! - Toggle theme and cycle background skins with persistence.
//! - Toggle compact density for the current session only.
//!
//! # Invariants
//! - Settings changes never touch task data.
//! - In-memory settings stay applied even when a store write fails.

use crate::model::settings::{Background, CosmeticSettings, Theme};
use crate::repo::settings_repo::{load_settings, save_background, save_theme};
use crate::store::{KeyValueStore, StoreError, StoreResult};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Settings write failure. Carries the setting name for diagnostics.
#[derive(Debug)]
pub struct SettingsError {
    pub setting: &'static str,
    pub source: StoreError,
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to persist {}: {}", self.setting, self.source)
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Cosmetic settings controller.
///
/// Holds only the settings values; the store is passed per call so one store
/// can back both settings and the task list.
#[derive(Debug, Clone, Default)]
pub struct SettingsService {
    settings: CosmeticSettings,
}

impl SettingsService {
    /// Loads persisted theme and background; compact mode starts off.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<Self> {
        let settings = load_settings(store)?;
        info!(
            "event=settings_open module=service status=ok theme={} background={}",
            settings.theme.as_str(),
            settings.background.name()
        );
        Ok(Self { settings })
    }

    pub fn settings(&self) -> CosmeticSettings {
        self.settings
    }

    /// Switches light/dark and persists the new theme.
    pub fn toggle_theme<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Theme, SettingsError> {
        self.settings.theme = self.settings.theme.toggled();
        let theme = self.settings.theme;
        persist("theme", save_theme(store, theme))?;
        Ok(theme)
    }

    /// Flips compact density. Never persisted.
    pub fn toggle_compact(&mut self) -> bool {
        self.settings.compact_mode = !self.settings.compact_mode;
        self.settings.compact_mode
    }

    /// Advances to the next background skin (wrapping) and persists its name.
    pub fn cycle_background<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Background, SettingsError> {
        self.settings.background = self.settings.background.next();
        let background = self.settings.background;
        persist("background", save_background(store, background))?;
        Ok(background)
    }
}

fn persist(setting: &'static str, result: StoreResult<()>) -> Result<(), SettingsError> {
    result.map_err(|source| {
        error!("event=settings_persist module=service status=error setting={setting} error={source}");
        SettingsError { setting, source }
    })
}

#[cfg(test)]
mod tests {
    use super::SettingsService;
    use crate::model::settings::{Background, Theme};
    use crate::store::{KeyValueStore, MemoryKeyValueStore, BACKGROUND_KEY, THEME_KEY};

    #[test]
    fn defaults_when_store_is_empty() {
        let store = MemoryKeyValueStore::new();
        let settings = SettingsService::load(&store).unwrap().settings();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.background, Background::Default);
        assert!(!settings.compact_mode);
    }

    #[test]
    fn theme_toggle_persists_name() {
        let mut store = MemoryKeyValueStore::new();
        let mut service = SettingsService::load(&store).unwrap();

        assert_eq!(service.toggle_theme(&mut store).unwrap(), Theme::Dark);
        assert_eq!(store.load(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(service.toggle_theme(&mut store).unwrap(), Theme::Light);
        assert_eq!(store.load(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn background_cycle_wraps_and_persists() {
        let mut store = MemoryKeyValueStore::new();
        let mut service = SettingsService::load(&store).unwrap();

        for _ in 0..Background::ALL.len() - 1 {
            service.cycle_background(&mut store).unwrap();
        }
        assert_eq!(service.settings().background, Background::GradientFun);
        assert_eq!(
            service.cycle_background(&mut store).unwrap(),
            Background::Default
        );
        assert_eq!(
            store.load(BACKGROUND_KEY).unwrap().as_deref(),
            Some("background-default")
        );
    }

    #[test]
    fn compact_mode_is_not_persisted() {
        let mut store = MemoryKeyValueStore::new();
        let mut service = SettingsService::load(&store).unwrap();
        assert!(service.toggle_compact());
        service.toggle_theme(&mut store).unwrap();

        let reloaded = SettingsService::load(&store).unwrap().settings();
        assert!(!reloaded.compact_mode);
        assert_eq!(reloaded.theme, Theme::Dark);
    }

    #[test]
    fn saved_background_is_restored() {
        let mut store = MemoryKeyValueStore::new();
        store.insert_raw(BACKGROUND_KEY, "background-galaxy");
        let settings = SettingsService::load(&store).unwrap().settings();
        assert_eq!(settings.background, Background::Galaxy);
    }
}
