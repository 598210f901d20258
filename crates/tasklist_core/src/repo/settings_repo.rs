//! Cosmetic settings persistence.
//!
//! # Invariants
//! - Only theme and background are persisted; compact mode is session-only.
//! - Unknown stored values fall back to defaults instead of failing.

use crate::model::settings::{Background, CosmeticSettings, Theme};
use crate::store::{KeyValueStore, StoreResult, BACKGROUND_KEY, THEME_KEY};
use log::warn;

/// Loads persisted settings; compact mode always starts off.
pub fn load_settings<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<CosmeticSettings> {
    let theme = Theme::from_stored(store.load(THEME_KEY)?.as_deref());
    let background = match store.load(BACKGROUND_KEY)? {
        Some(name) => Background::from_name(name.as_str()).unwrap_or_else(|| {
            warn!(
                "event=settings_load module=repo status=ok fallback=background unknown_len={}",
                name.len()
            );
            Background::default()
        }),
        None => Background::default(),
    };

    Ok(CosmeticSettings {
        theme,
        compact_mode: false,
        background,
    })
}

pub fn save_theme<S: KeyValueStore + ?Sized>(store: &mut S, theme: Theme) -> StoreResult<()> {
    store.save(THEME_KEY, theme.as_str())
}

pub fn save_background<S: KeyValueStore + ?Sized>(
    store: &mut S,
    background: Background,
) -> StoreResult<()> {
    store.save(BACKGROUND_KEY, background.name())
}
