//! Cosmetic settings model.
//!
//! # Invariants
//! - Settings never reference task data.
//! - `Background::ALL` order defines the cycling order.

use serde::{Deserialize, Serialize};

/// Two-valued color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored theme name. Anything but `"dark"` reads as light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Fixed set of background skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    #[default]
    Default,
    Sunset,
    Galaxy,
    GradientFun,
}

impl Background {
    pub const ALL: [Background; 4] = [
        Background::Default,
        Background::Sunset,
        Background::Galaxy,
        Background::GradientFun,
    ];

    /// Stored and rendered class name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "background-default",
            Self::Sunset => "background-sunset",
            Self::Galaxy => "background-galaxy",
            Self::GradientFun => "background-gradientfun",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|skin| skin.name() == value)
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|skin| *skin == self)
            .unwrap_or_default()
    }

    /// Next skin, wrapping to the first after the last.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Display-only preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CosmeticSettings {
    pub theme: Theme,
    /// Session-only; never persisted.
    pub compact_mode: bool,
    pub background: Background,
}
