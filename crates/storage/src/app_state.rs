//! Persisted application settings schema
//!
//! This module defines the keys and value types the app persists in the
//! device store: the color mode preference and the onboarding flag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage keys used by the app, relative to the device scope
pub mod keys {
    /// Persisted color mode (`light`, `dark` or `system`), stored raw
    pub const THEME_MODE: &str = "theme-mode";
    /// Whether the onboarding flow has been completed
    pub const ONBOARDING_COMPLETED: &str = "onboarding-completed";
    /// Session cookie issued by the auth backend
    pub const SESSION_COOKIE: &str = "cookie";
}

/// Color mode preference
///
/// `System` is stored as-is and resolved against the host's reported
/// color scheme every time the theme is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Follow system color scheme
    #[default]
    System,
    /// Always use light mode
    Light,
    /// Always use dark mode
    Dark,
}

impl ColorMode {
    /// The raw value written to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::System => "system",
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    /// All modes, in the order a picker shows them
    pub fn all() -> [ColorMode; 3] {
        [ColorMode::Light, ColorMode::Dark, ColorMode::System]
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown color mode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown color mode: {0}")]
pub struct UnknownColorMode(pub String);

impl FromStr for ColorMode {
    type Err = UnknownColorMode;

    // Exact match only; stored values are always written lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(ColorMode::System),
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(UnknownColorMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_default_is_system() {
        assert_eq!(ColorMode::default(), ColorMode::System);
    }

    #[test]
    fn test_color_mode_parse() {
        assert_eq!("light".parse::<ColorMode>(), Ok(ColorMode::Light));
        assert_eq!("dark".parse::<ColorMode>(), Ok(ColorMode::Dark));
        assert_eq!("system".parse::<ColorMode>(), Ok(ColorMode::System));
        assert!("Dark".parse::<ColorMode>().is_err());
        assert!("sepia".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_color_mode_display_matches_storage_value() {
        for mode in ColorMode::all() {
            assert_eq!(mode.to_string().parse::<ColorMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_color_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ColorMode::Dark).unwrap(), "\"dark\"");
        let mode: ColorMode = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(mode, ColorMode::System);
    }
}
