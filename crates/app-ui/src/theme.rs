//! Theme definitions and the theme store
//!
//! Two fixed color sets (light and dark) and a tri-state [`ColorMode`]. The
//! `system` mode is kept as-is and resolved against the host's color scheme
//! every time the theme is read.
//!
//! ```rust
//! use app_ui::theme::{resolve, ColorScheme};
//! use storage::ColorMode;
//!
//! let theme = resolve(ColorMode::System, ColorScheme::Dark);
//! assert!(theme.is_dark);
//! assert_eq!(theme.colors.primary, "#0A84FF");
//! ```

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use storage::{keys, ColorMode, DeviceStore};
use tokio::sync::watch;

// =============================================================================
// Color Types
// =============================================================================

/// A color as a hex or `rgba()` string
pub type Color = String;

/// Semantic color tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Brand color for primary actions
    pub primary: Color,
    /// Pressed/emphasized primary
    pub primary_dark: Color,
    /// Secondary accent
    pub secondary: Color,
    /// Screen background
    pub background: Color,
    /// Grouped/secondary background
    pub background_secondary: Color,
    /// Body text
    pub text: Color,
    /// Secondary text
    pub text_secondary: Color,
    /// Placeholder and hint text
    pub text_tertiary: Color,
    /// Borders
    pub border: Color,
    /// Hairline separators
    pub border_light: Color,
    /// Success state
    pub success: Color,
    /// Error state
    pub error: Color,
    /// Warning state
    pub warning: Color,
    /// Informational state
    pub info: Color,
    /// Card surface
    pub card: Color,
    /// Shadow color
    pub shadow: Color,
}

impl ThemeColors {
    /// Light color set
    pub fn light() -> Self {
        Self {
            primary: "#007AFF".to_string(),
            primary_dark: "#0051D5".to_string(),
            secondary: "#5856D6".to_string(),
            background: "#FFFFFF".to_string(),
            background_secondary: "#F2F2F7".to_string(),
            text: "#000000".to_string(),
            text_secondary: "#3C3C43".to_string(),
            text_tertiary: "#8E8E93".to_string(),
            border: "#C6C6C8".to_string(),
            border_light: "#E5E5EA".to_string(),
            success: "#34C759".to_string(),
            error: "#FF3B30".to_string(),
            warning: "#FF9500".to_string(),
            info: "#007AFF".to_string(),
            card: "#FFFFFF".to_string(),
            shadow: "rgba(0, 0, 0, 0.1)".to_string(),
        }
    }

    /// Dark color set
    pub fn dark() -> Self {
        Self {
            primary: "#0A84FF".to_string(),
            primary_dark: "#0066CC".to_string(),
            secondary: "#5E5CE6".to_string(),
            background: "#000000".to_string(),
            background_secondary: "#1C1C1E".to_string(),
            text: "#FFFFFF".to_string(),
            text_secondary: "#EBEBF5".to_string(),
            text_tertiary: "#8E8E93".to_string(),
            border: "#38383A".to_string(),
            border_light: "#48484A".to_string(),
            success: "#32D74B".to_string(),
            error: "#FF453A".to_string(),
            warning: "#FF9F0A".to_string(),
            info: "#0A84FF".to_string(),
            card: "#1C1C1E".to_string(),
            shadow: "rgba(0, 0, 0, 0.3)".to_string(),
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Color scheme reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light appearance (also used when the host reports nothing)
    #[default]
    Light,
    /// Dark appearance
    Dark,
}

/// Theme after resolving the mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTheme {
    /// Mode the theme was resolved from
    pub mode: ColorMode,
    /// Active colors
    pub colors: ThemeColors,
    /// Whether the dark set is active
    pub is_dark: bool,
}

/// Resolve a mode against the host's color scheme
pub fn resolve(mode: ColorMode, system_scheme: ColorScheme) -> ResolvedTheme {
    let is_dark = match mode {
        ColorMode::System => system_scheme == ColorScheme::Dark,
        ColorMode::Dark => true,
        ColorMode::Light => false,
    };

    ResolvedTheme {
        mode,
        colors: if is_dark { ThemeColors::dark() } else { ThemeColors::light() },
        is_dark,
    }
}

// =============================================================================
// Theme Store
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct ThemeInputs {
    mode: ColorMode,
    system_scheme: ColorScheme,
}

/// Theme state container
///
/// Holds the user's [`ColorMode`] and the last host color scheme. Subscribers
/// receive a fresh [`ResolvedTheme`] whenever either changes.
pub struct ThemeStore {
    store: DeviceStore,
    inputs: RwLock<ThemeInputs>,
    theme_tx: watch::Sender<ResolvedTheme>,
}

impl ThemeStore {
    /// Create a store in `system` mode
    pub fn new(store: DeviceStore) -> Self {
        let inputs = ThemeInputs { mode: ColorMode::System, system_scheme: ColorScheme::default() };
        let (theme_tx, _) = watch::channel(resolve(inputs.mode, inputs.system_scheme));
        Self { store, inputs: RwLock::new(inputs), theme_tx }
    }

    /// Set the initial host color scheme
    pub fn with_system_scheme(self, scheme: ColorScheme) -> Self {
        self.set_system_scheme(scheme);
        self
    }

    /// Read the persisted mode
    ///
    /// Missing or unrecognized values leave the mode at `system`.
    pub fn load(&self) -> ColorMode {
        let mode = match self.store.get_raw(keys::THEME_MODE) {
            Ok(Some(raw)) => raw.parse::<ColorMode>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored theme mode: {}", e);
                ColorMode::System
            }),
            Ok(None) => ColorMode::System,
            Err(e) => {
                tracing::warn!("Failed to load theme mode: {}", e);
                ColorMode::System
            }
        };

        self.update(|inputs| inputs.mode = mode);
        mode
    }

    /// Change and persist the mode
    ///
    /// The mode changes in memory even if it cannot be saved.
    pub fn set_mode(&self, mode: ColorMode) {
        if let Err(e) = self.store.set_raw(keys::THEME_MODE, mode.as_str()) {
            tracing::warn!("Failed to save theme mode: {}", e);
        }
        self.update(|inputs| inputs.mode = mode);
    }

    /// Record a host color scheme change
    pub fn set_system_scheme(&self, scheme: ColorScheme) {
        self.update(|inputs| inputs.system_scheme = scheme);
    }

    /// Current resolved theme
    pub fn get_theme(&self) -> ResolvedTheme {
        let inputs = *self.inputs.read();
        resolve(inputs.mode, inputs.system_scheme)
    }

    /// Current mode
    pub fn mode(&self) -> ColorMode {
        self.inputs.read().mode
    }

    /// Whether the dark colors are active
    pub fn is_dark(&self) -> bool {
        self.get_theme().is_dark
    }

    /// Subscribe to theme changes
    pub fn subscribe(&self) -> watch::Receiver<ResolvedTheme> {
        self.theme_tx.subscribe()
    }

    fn update(&self, apply: impl FnOnce(&mut ThemeInputs)) {
        let theme = {
            let mut inputs = self.inputs.write();
            apply(&mut inputs);
            resolve(inputs.mode, inputs.system_scheme)
        };

        self.theme_tx.send_if_modified(|current| {
            if *current == theme {
                return false;
            }
            *current = theme;
            true
        });
    }
}
