//! User interface layer for the mobile starter
//!
//! Everything here is headless: components compute their styles from the
//! active theme, screens hold form state, and navigation is a plain route
//! stack. A host toolkit renders the results.
//!
//! # Modules
//!
//! - [`theme`] - Light/dark palettes, mode resolution and the theme store
//! - [`tokens`] - Spacing, typography, radius and shadow scales
//! - [`components`] - Buttons, cards, inputs, icon buttons, screens, toasts
//! - [`modal`] - Alert modals, permission cards and their animations
//! - [`navigation`] - Routes, the stack, redirect guards, navigator layouts
//! - [`onboarding`] - The onboarding pager
//! - [`screens`] - Sign-in and sign-up screens and the auth flow
//!
//! # Example
//!
//! ```rust
//! use app_ui::theme::{resolve, ColorScheme};
//! use app_ui::components::{Button, ButtonVariant};
//! use storage::ColorMode;
//!
//! let theme = resolve(ColorMode::System, ColorScheme::Dark);
//! assert!(theme.is_dark);
//!
//! let styles = Button::new("Save").with_variant(ButtonVariant::Outline).styles(&theme, false);
//! assert_eq!(styles.border_color, theme.colors.primary);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
pub mod modal;
pub mod navigation;
pub mod onboarding;
pub mod screens;
pub mod theme;
pub mod tokens;

pub use components::{
    Button, ButtonSize, ButtonVariant, Card, CardShadow, EventHandler, IconButton, Input, Screen,
    ToastView,
};
pub use modal::{AlertButton, AlertButtonStyle, AlertModal, PermissionCard, PermissionPrompt, PermissionType};
pub use navigation::{
    auth_redirect, index_redirect, NavigationError, NavigationStack, Navigator, NavigatorKind,
    NavigatorLayout, Route,
};
pub use onboarding::{OnboardingPager, PagerStep};
pub use screens::{AuthFlow, SignInScreen, SignUpScreen, SubmitOutcome};
pub use theme::{resolve, ColorScheme, ResolvedTheme, ThemeColors, ThemeStore};
