//! UI component models
//!
//! Components are plain serializable structs with builder-style setters. Each
//! one computes its concrete styles from a [`ResolvedTheme`]; the host toolkit
//! only has to paint the result.
//!
//! # Available Components
//!
//! - [`Button`] - Pressable button with five variants and three sizes
//! - [`Card`] - Surface with optional shadow
//! - [`Input`] - Labeled text field with error and helper text
//! - [`IconButton`] - Square icon-only button
//! - [`Screen`] - Screen container with loading and error states
//! - [`ToastView`] - Styles for one toast in the overlay

use crate::theme::{Color, ResolvedTheme};
use crate::tokens::{font_size, radius, shadows, spacing, FontWeight, Shadow};
use app_state::toast::{ToastSeverity, ToastSnapshot};
use serde::{Deserialize, Serialize};

// =============================================================================
// Common Types
// =============================================================================

/// Event handler callback, as an identifier the host resolves
pub type EventHandler = String;

/// Text color used on filled backgrounds
pub const ON_FILL_COLOR: &str = "#FFFFFF";

/// Transparent color
pub const TRANSPARENT: &str = "transparent";

/// Opacity while pressed
pub const PRESSED_OPACITY: f32 = 0.7;

/// Opacity while disabled
pub const DISABLED_OPACITY: f32 = 0.5;

fn interaction_opacity(pressed: bool, disabled: bool) -> f32 {
    if pressed {
        PRESSED_OPACITY
    } else if disabled {
        DISABLED_OPACITY
    } else {
        1.0
    }
}

/// Named spacing step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingSize {
    /// 4pt
    Xs,
    /// 8pt
    Sm,
    /// 16pt
    Md,
    /// 24pt
    Lg,
    /// 32pt
    Xl,
    /// 48pt
    Xxl,
}

impl SpacingSize {
    /// Size in points
    pub fn value(&self) -> f32 {
        match self {
            SpacingSize::Xs => spacing::XS,
            SpacingSize::Sm => spacing::SM,
            SpacingSize::Md => spacing::MD,
            SpacingSize::Lg => spacing::LG,
            SpacingSize::Xl => spacing::XL,
            SpacingSize::Xxl => spacing::XXL,
        }
    }
}

// =============================================================================
// Button Component
// =============================================================================

/// Button style variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Filled with the primary color
    #[default]
    Primary,
    /// Filled with the secondary color
    Secondary,
    /// Primary-colored border, no fill
    Outline,
    /// Text only
    Ghost,
    /// Filled with the error color
    Danger,
}

/// Button sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    /// Small
    Sm,
    /// Medium
    #[default]
    Md,
    /// Large
    Lg,
}

/// Button component properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    /// Label
    pub title: String,
    /// Style variant
    #[serde(default)]
    pub variant: ButtonVariant,
    /// Size
    #[serde(default)]
    pub size: ButtonSize,
    /// Show a spinner instead of the label
    #[serde(default)]
    pub loading: bool,
    /// Stretch to the container width
    #[serde(default)]
    pub full_width: bool,
    /// Whether the button is disabled
    #[serde(default)]
    pub disabled: bool,
    /// Icon name shown before the label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// On press event handler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_press: Option<EventHandler>,
}

impl Button {
    /// Create a primary, medium button
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            loading: false,
            full_width: false,
            disabled: false,
            icon: None,
            on_press: None,
        }
    }

    /// Set the variant
    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the size
    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Set loading state
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Stretch to full width
    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    /// Set icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set on press handler
    pub fn on_press(mut self, handler: impl Into<String>) -> Self {
        self.on_press = Some(handler.into());
        self
    }

    /// Whether presses reach the handler
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.loading
    }

    /// Compute styles for the current theme
    pub fn styles(&self, theme: &ResolvedTheme, pressed: bool) -> ButtonStyles {
        let colors = &theme.colors;

        let (padding_vertical, padding_horizontal, font_size) = match self.size {
            ButtonSize::Sm => (spacing::XS, spacing::MD, font_size::SM),
            ButtonSize::Md => (spacing::SM, spacing::MD, font_size::MD),
            ButtonSize::Lg => (spacing::MD, spacing::LG, font_size::MD),
        };

        let (background, border_color, text_color) = match self.variant {
            ButtonVariant::Primary => (colors.primary.clone(), TRANSPARENT.to_string(), ON_FILL_COLOR.to_string()),
            ButtonVariant::Secondary => (colors.secondary.clone(), TRANSPARENT.to_string(), ON_FILL_COLOR.to_string()),
            ButtonVariant::Outline => (TRANSPARENT.to_string(), colors.primary.clone(), colors.primary.clone()),
            ButtonVariant::Ghost => (TRANSPARENT.to_string(), TRANSPARENT.to_string(), colors.primary.clone()),
            ButtonVariant::Danger => (colors.error.clone(), TRANSPARENT.to_string(), ON_FILL_COLOR.to_string()),
        };

        ButtonStyles {
            background,
            border_color,
            text_color,
            border_width: 1.0,
            border_radius: radius::MD,
            padding_vertical,
            padding_horizontal,
            font_size,
            font_weight: FontWeight::Semibold,
            label_margin_left: if self.icon.is_some() { spacing::SM } else { 0.0 },
            opacity: interaction_opacity(pressed, !self.is_interactive()),
            full_width: self.full_width,
            show_spinner: self.loading,
        }
    }
}

/// Computed button styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyles {
    /// Background color
    pub background: Color,
    /// Border color
    pub border_color: Color,
    /// Label and spinner color
    pub text_color: Color,
    /// Border width
    pub border_width: f32,
    /// Border radius
    pub border_radius: f32,
    /// Vertical padding
    pub padding_vertical: f32,
    /// Horizontal padding
    pub padding_horizontal: f32,
    /// Label font size
    pub font_size: f32,
    /// Label font weight
    pub font_weight: FontWeight,
    /// Gap between icon and label
    pub label_margin_left: f32,
    /// Opacity
    pub opacity: f32,
    /// Stretch to the container width
    pub full_width: bool,
    /// Render a spinner instead of the label
    pub show_spinner: bool,
}

// =============================================================================
// Card Component
// =============================================================================

/// Card elevation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardShadow {
    /// Flat
    None,
    /// Small
    Sm,
    /// Medium
    #[default]
    Md,
    /// Large
    Lg,
}

/// Card component properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Drop the inner padding
    #[serde(default)]
    pub no_padding: bool,
    /// Elevation
    #[serde(default)]
    pub shadow: CardShadow,
}

impl Card {
    /// Create a padded card with a medium shadow
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the inner padding
    pub fn no_padding(mut self) -> Self {
        self.no_padding = true;
        self
    }

    /// Set the elevation
    pub fn with_shadow(mut self, shadow: CardShadow) -> Self {
        self.shadow = shadow;
        self
    }

    /// Compute styles for the current theme
    pub fn styles(&self, theme: &ResolvedTheme) -> CardStyles {
        CardStyles {
            background: theme.colors.card.clone(),
            padding: if self.no_padding { 0.0 } else { spacing::MD },
            border_radius: radius::LG,
            shadow: match self.shadow {
                CardShadow::None => None,
                CardShadow::Sm => Some(shadows::sm()),
                CardShadow::Md => Some(shadows::md()),
                CardShadow::Lg => Some(shadows::lg()),
            },
        }
    }
}

/// Computed card styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStyles {
    /// Background color
    pub background: Color,
    /// Inner padding
    pub padding: f32,
    /// Border radius
    pub border_radius: f32,
    /// Drop shadow
    pub shadow: Option<Shadow>,
}

// =============================================================================
// Input Component
// =============================================================================

/// Text input properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// Label above the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Current value
    #[serde(default)]
    pub value: String,
    /// Placeholder text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Validation error; takes precedence over the helper text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Helper text under the field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    /// Whether the field accepts edits
    pub editable: bool,
    /// Mask the value
    #[serde(default)]
    pub secure: bool,
    /// Whether the field has focus
    #[serde(default)]
    pub focused: bool,
    /// Icon before the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_icon: Option<String>,
    /// Icon after the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_icon: Option<String>,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            label: None,
            value: String::new(),
            placeholder: None,
            error: None,
            helper_text: None,
            editable: true,
            secure: false,
            focused: false,
            left_icon: None,
            right_icon: None,
        }
    }
}

impl Input {
    /// Create an editable field
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the current value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the placeholder
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set or clear the error
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    /// Set the helper text
    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    /// Mask the value
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    /// Set whether the field accepts edits
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Set the icon before the text
    pub fn with_left_icon(mut self, icon: impl Into<String>) -> Self {
        self.left_icon = Some(icon.into());
        self
    }

    /// Set the icon after the text
    pub fn with_right_icon(mut self, icon: impl Into<String>) -> Self {
        self.right_icon = Some(icon.into());
        self
    }

    /// Record a focus change
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Text shown under the field
    pub fn footnote(&self) -> Option<&str> {
        self.error.as_deref().or(self.helper_text.as_deref())
    }

    /// Compute styles for the current theme
    pub fn styles(&self, theme: &ResolvedTheme) -> InputStyles {
        let colors = &theme.colors;
        let has_error = self.error.is_some();

        let border_color = if has_error {
            colors.error.clone()
        } else if self.focused {
            colors.primary.clone()
        } else {
            colors.border.clone()
        };

        InputStyles {
            label_color: if has_error { colors.error.clone() } else { colors.text.clone() },
            label_font_size: font_size::SM,
            border_color,
            background: if self.editable {
                colors.background.clone()
            } else {
                colors.background_secondary.clone()
            },
            text_color: colors.text.clone(),
            placeholder_color: colors.text_tertiary.clone(),
            font_size: font_size::MD,
            border_radius: radius::MD,
            padding_horizontal: spacing::MD,
            padding_vertical: spacing::MD,
            footnote_color: if has_error { colors.error.clone() } else { colors.text_secondary.clone() },
            footnote_font_size: font_size::XS,
        }
    }
}

/// Computed input styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputStyles {
    /// Label color
    pub label_color: Color,
    /// Label font size
    pub label_font_size: f32,
    /// Border color
    pub border_color: Color,
    /// Field background
    pub background: Color,
    /// Value color
    pub text_color: Color,
    /// Placeholder color
    pub placeholder_color: Color,
    /// Value font size
    pub font_size: f32,
    /// Border radius
    pub border_radius: f32,
    /// Horizontal padding
    pub padding_horizontal: f32,
    /// Vertical padding
    pub padding_vertical: f32,
    /// Error or helper text color
    pub footnote_color: Color,
    /// Error or helper text font size
    pub footnote_font_size: f32,
}

// =============================================================================
// Icon Button Component
// =============================================================================

/// Icon button sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconButtonSize {
    /// 32pt
    Sm,
    /// 40pt
    #[default]
    Md,
    /// 48pt
    Lg,
}

impl IconButtonSize {
    /// Edge length in points
    pub fn dimension(&self) -> f32 {
        match self {
            IconButtonSize::Sm => 32.0,
            IconButtonSize::Md => 40.0,
            IconButtonSize::Lg => 48.0,
        }
    }
}

/// Icon button variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconButtonVariant {
    /// Secondary background
    #[default]
    Default,
    /// Primary background
    Filled,
    /// Bordered
    Outline,
    /// Transparent
    Ghost,
}

/// Icon-only button properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconButton {
    /// Icon name
    pub icon: String,
    /// Size
    #[serde(default)]
    pub size: IconButtonSize,
    /// Variant
    #[serde(default)]
    pub variant: IconButtonVariant,
    /// Circular instead of rounded square
    #[serde(default)]
    pub rounded: bool,
    /// Whether the button is disabled
    #[serde(default)]
    pub disabled: bool,
}

impl IconButton {
    /// Create a medium, default-variant button
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            size: IconButtonSize::default(),
            variant: IconButtonVariant::default(),
            rounded: false,
            disabled: false,
        }
    }

    /// Set the size
    pub fn with_size(mut self, size: IconButtonSize) -> Self {
        self.size = size;
        self
    }

    /// Set the variant
    pub fn with_variant(mut self, variant: IconButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Make it circular
    pub fn rounded(mut self) -> Self {
        self.rounded = true;
        self
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Compute styles for the current theme
    pub fn styles(&self, theme: &ResolvedTheme, pressed: bool) -> IconButtonStyles {
        let colors = &theme.colors;
        let dimension = self.size.dimension();

        let (background, border_color, border_width) = match self.variant {
            IconButtonVariant::Default => (colors.background_secondary.clone(), None, 0.0),
            IconButtonVariant::Filled => (colors.primary.clone(), None, 0.0),
            IconButtonVariant::Outline => (TRANSPARENT.to_string(), Some(colors.border.clone()), 1.0),
            IconButtonVariant::Ghost => (TRANSPARENT.to_string(), None, 0.0),
        };

        IconButtonStyles {
            width: dimension,
            height: dimension,
            background,
            border_color,
            border_width,
            border_radius: if self.rounded { dimension / 2.0 } else { radius::MD },
            opacity: interaction_opacity(pressed, self.disabled),
        }
    }
}

/// Computed icon button styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconButtonStyles {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Background color
    pub background: Color,
    /// Border color
    pub border_color: Option<Color>,
    /// Border width
    pub border_width: f32,
    /// Border radius
    pub border_radius: f32,
    /// Opacity
    pub opacity: f32,
}

// =============================================================================
// Screen Component
// =============================================================================

/// Requested status bar appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBarMode {
    /// Follow the theme
    #[default]
    Auto,
    /// Light content
    Light,
    /// Dark content
    Dark,
    /// No status bar
    Hidden,
}

/// Status bar content style handed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarStyle {
    /// Light glyphs, for dark backgrounds
    LightContent,
    /// Dark glyphs, for light backgrounds
    DarkContent,
}

/// Label of the retry button in the error state
pub const RETRY_LABEL: &str = "Réessayer";

/// What the screen body shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScreenContent {
    /// Spinner with optional text
    Loading {
        /// Text under the spinner
        text: Option<String>,
    },
    /// Error message with optional retry button
    Error {
        /// Message
        message: String,
        /// Whether a retry handler is attached
        can_retry: bool,
    },
    /// The screen's own children
    Children,
}

/// Screen container properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    /// Header title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Status bar appearance
    #[serde(default)]
    pub status_bar: StatusBarMode,
    /// Background override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    /// Horizontal padding step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_horizontal: Option<SpacingSize>,
    /// Vertical padding step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_vertical: Option<SpacingSize>,
    /// Drop all padding
    #[serde(default)]
    pub no_padding: bool,
    /// Scrollable body
    #[serde(default)]
    pub scroll: bool,
    /// Avoid the keyboard
    #[serde(default)]
    pub keyboard_aware: bool,
    /// Show the loading state
    #[serde(default)]
    pub loading: bool,
    /// Loading text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_text: Option<String>,
    /// Error message; shows the error state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Retry handler for the error state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_retry: Option<EventHandler>,
}

impl Screen {
    /// Create a screen with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the status bar appearance
    pub fn with_status_bar(mut self, mode: StatusBarMode) -> Self {
        self.status_bar = mode;
        self
    }

    /// Set padding steps
    pub fn with_padding(mut self, horizontal: Option<SpacingSize>, vertical: Option<SpacingSize>) -> Self {
        self.padding_horizontal = horizontal;
        self.padding_vertical = vertical;
        self
    }

    /// Make the body scrollable and keyboard aware, as forms do
    pub fn form(mut self) -> Self {
        self.scroll = true;
        self.keyboard_aware = true;
        self
    }

    /// Set the loading state
    pub fn loading(mut self, loading: bool, text: Option<String>) -> Self {
        self.loading = loading;
        self.loading_text = text;
        self
    }

    /// Set the error state
    pub fn with_error(mut self, error: Option<String>, on_retry: Option<EventHandler>) -> Self {
        self.error = error;
        self.on_retry = on_retry;
        self
    }

    /// Body content; loading wins over error
    pub fn content(&self) -> ScreenContent {
        if self.loading {
            ScreenContent::Loading { text: self.loading_text.clone() }
        } else if let Some(message) = &self.error {
            ScreenContent::Error { message: message.clone(), can_retry: self.on_retry.is_some() }
        } else {
            ScreenContent::Children
        }
    }

    /// Status bar style, `None` when hidden
    pub fn bar_style(&self, theme: &ResolvedTheme) -> Option<BarStyle> {
        match self.status_bar {
            StatusBarMode::Hidden => None,
            StatusBarMode::Auto if theme.is_dark => Some(BarStyle::LightContent),
            StatusBarMode::Auto => Some(BarStyle::DarkContent),
            StatusBarMode::Light => Some(BarStyle::LightContent),
            StatusBarMode::Dark => Some(BarStyle::DarkContent),
        }
    }

    /// Compute styles for the current theme
    pub fn styles(&self, theme: &ResolvedTheme) -> ScreenStyles {
        let pad = |step: Option<SpacingSize>| match step {
            Some(step) if !self.no_padding => step.value(),
            _ => 0.0,
        };

        ScreenStyles {
            background: self.background.clone().unwrap_or_else(|| theme.colors.background.clone()),
            padding_horizontal: pad(self.padding_horizontal),
            padding_vertical: pad(self.padding_vertical),
            bar_style: self.bar_style(theme),
            header_border_color: theme.colors.border.clone(),
            header_title_font_size: font_size::LG,
        }
    }
}

/// Computed screen styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenStyles {
    /// Background color
    pub background: Color,
    /// Horizontal padding
    pub padding_horizontal: f32,
    /// Vertical padding
    pub padding_vertical: f32,
    /// Status bar style
    pub bar_style: Option<BarStyle>,
    /// Header bottom border color
    pub header_border_color: Color,
    /// Header title font size
    pub header_title_font_size: f32,
}

// =============================================================================
// Toast View
// =============================================================================

/// Distance of the toast stack from the top of the screen
pub const TOAST_CONTAINER_TOP: f32 = 50.0;

/// Widest a toast gets
pub const TOAST_MAX_WIDTH: f32 = 500.0;

/// Icon size inside a toast
pub const TOAST_ICON_SIZE: f32 = 22.0;

/// Close icon size
pub const TOAST_CLOSE_ICON_SIZE: f32 = 18.0;

/// Message lines before truncation
pub const TOAST_MAX_LINES: u8 = 2;

/// Background color for a severity
pub fn severity_color(theme: &ResolvedTheme, severity: ToastSeverity) -> Color {
    match severity {
        ToastSeverity::Success => theme.colors.success.clone(),
        ToastSeverity::Error => theme.colors.error.clone(),
        ToastSeverity::Warning => theme.colors.warning.clone(),
        ToastSeverity::Info => theme.colors.info.clone(),
    }
}

/// Render model for one toast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastView {
    /// Toast state
    pub toast: ToastSnapshot,
    /// Computed styles
    pub styles: ToastStyles,
}

impl ToastView {
    /// Build the view for a toast on a screen of the given width
    pub fn new(toast: ToastSnapshot, theme: &ResolvedTheme, screen_width: f32) -> Self {
        let styles = ToastStyles {
            background: severity_color(theme, toast.severity),
            icon: toast.icon.clone(),
            icon_color: ON_FILL_COLOR.to_string(),
            icon_size: TOAST_ICON_SIZE,
            text_color: ON_FILL_COLOR.to_string(),
            font_size: font_size::MD + 1.0,
            font_weight: FontWeight::Medium,
            max_lines: TOAST_MAX_LINES,
            padding_vertical: spacing::MD + 2.0,
            padding_horizontal: spacing::LG + 2.0,
            border_radius: radius::LG,
            width: (screen_width - spacing::MD * 2.0).clamp(0.0, TOAST_MAX_WIDTH),
            translate_x: toast.offset.x,
            translate_y: toast.offset.y,
            shadow: shadows::toast(),
        };

        Self { toast, styles }
    }

    /// Build views for every visible toast, in display order
    pub fn stack(toasts: Vec<ToastSnapshot>, theme: &ResolvedTheme, screen_width: f32) -> Vec<Self> {
        toasts
            .into_iter()
            .map(|toast| Self::new(toast, theme, screen_width))
            .collect()
    }
}

/// Computed toast styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastStyles {
    /// Background color
    pub background: Color,
    /// Icon name
    pub icon: String,
    /// Icon color
    pub icon_color: Color,
    /// Icon size
    pub icon_size: f32,
    /// Message color
    pub text_color: Color,
    /// Message font size
    pub font_size: f32,
    /// Message font weight
    pub font_weight: FontWeight,
    /// Message lines before truncation
    pub max_lines: u8,
    /// Vertical padding
    pub padding_vertical: f32,
    /// Horizontal padding
    pub padding_horizontal: f32,
    /// Border radius
    pub border_radius: f32,
    /// Width
    pub width: f32,
    /// Drag offset, x
    pub translate_x: f32,
    /// Drag offset, y
    pub translate_y: f32,
    /// Drop shadow
    pub shadow: Shadow,
}
