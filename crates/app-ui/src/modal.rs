//! Alert modal, permission card and the permission prompt state
//!
//! Both modals fade and spring-scale in over a dimmed overlay and fade and
//! shrink out. Button presses resolve to the caller's handler, then the modal
//! dismisses itself.

use crate::components::{Button, ButtonVariant, EventHandler};
use crate::theme::{Color, ResolvedTheme};
use app_core::push::PushPlatform;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

// =============================================================================
// Animation
// =============================================================================

/// Scale a modal grows from and shrinks to
pub const MODAL_START_SCALE: f32 = 0.9;

/// Alert modal fade-in
pub const ALERT_ENTER_MS: u64 = 200;

/// Alert modal fade-out
pub const ALERT_EXIT_MS: u64 = 150;

/// Permission card fade-in
pub const PERMISSION_ENTER_MS: u64 = 250;

/// Permission card fade-out
pub const PERMISSION_EXIT_MS: u64 = 200;

// Spring with friction 8 and tension 40, as stiffness/damping on unit mass.
const SPRING_STIFFNESS: f32 = 230.2;
const SPRING_DAMPING: f32 = 25.0;
const SPRING_REST_THRESHOLD: f32 = 0.001;

/// Displacement of the scale spring from its target after `elapsed_ms`
fn spring_displacement(elapsed_ms: u64) -> f32 {
    let t = elapsed_ms as f32 / 1000.0;
    let omega = SPRING_STIFFNESS.sqrt();
    let zeta = SPRING_DAMPING / (2.0 * omega);
    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let x0 = MODAL_START_SCALE - 1.0;

    (-zeta * omega * t).exp() * (x0 * (omega_d * t).cos() + (zeta * omega * x0 / omega_d) * (omega_d * t).sin())
}

/// Direction of a modal transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalTransition {
    /// Appearing
    Enter,
    /// Disappearing
    Exit,
}

/// One frame of a modal transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalFrame {
    /// Opacity of the card and the overlay
    pub opacity: f32,
    /// Scale of the card
    pub scale: f32,
}

/// Modal transition, sampled by elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalAnimation {
    /// Direction
    pub transition: ModalTransition,
    /// Fade length in milliseconds
    pub duration_ms: u64,
}

impl ModalAnimation {
    /// Fade in over `duration_ms` while the scale springs to 1
    pub fn enter(duration_ms: u64) -> Self {
        Self { transition: ModalTransition::Enter, duration_ms }
    }

    /// Fade out and shrink over `duration_ms`
    pub fn exit(duration_ms: u64) -> Self {
        Self { transition: ModalTransition::Exit, duration_ms }
    }

    fn progress(&self, elapsed_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
    }

    /// Sample the transition
    pub fn frame(&self, elapsed_ms: u64) -> ModalFrame {
        let progress = self.progress(elapsed_ms);
        match self.transition {
            ModalTransition::Enter => ModalFrame {
                opacity: progress,
                scale: 1.0 + spring_displacement(elapsed_ms),
            },
            ModalTransition::Exit => ModalFrame {
                opacity: 1.0 - progress,
                scale: 1.0 - (1.0 - MODAL_START_SCALE) * progress,
            },
        }
    }

    /// Whether the transition has settled
    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        match self.transition {
            ModalTransition::Enter => {
                elapsed_ms >= self.duration_ms
                    && spring_displacement(elapsed_ms).abs() < SPRING_REST_THRESHOLD
            }
            ModalTransition::Exit => elapsed_ms >= self.duration_ms,
        }
    }
}

// =============================================================================
// Alert Modal
// =============================================================================

/// Alert button role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertButtonStyle {
    /// Confirm
    #[default]
    Default,
    /// Back out
    Cancel,
    /// Irreversible
    Destructive,
}

impl AlertButtonStyle {
    /// Button variant used to draw this role
    pub fn variant(&self) -> ButtonVariant {
        match self {
            AlertButtonStyle::Default => ButtonVariant::Primary,
            AlertButtonStyle::Cancel => ButtonVariant::Outline,
            AlertButtonStyle::Destructive => ButtonVariant::Danger,
        }
    }
}

/// Alert button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertButton {
    /// Label
    pub text: String,
    /// Role
    #[serde(default)]
    pub style: AlertButtonStyle,
    /// Handler to run before dismissing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_press: Option<EventHandler>,
}

impl AlertButton {
    /// Create a button with the default role
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: AlertButtonStyle::Default, on_press: None }
    }

    /// Set the role
    pub fn with_style(mut self, style: AlertButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the handler
    pub fn on_press(mut self, handler: impl Into<String>) -> Self {
        self.on_press = Some(handler.into());
        self
    }

    /// Render as a full-width medium [`Button`]
    pub fn to_button(&self) -> Button {
        let mut button = Button::new(&self.text)
            .with_variant(self.style.variant())
            .full_width(true);
        button.on_press = self.on_press.clone();
        button
    }
}

/// Result of interacting with a modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalOutcome {
    /// Handler the host should run, if any
    pub action: Option<EventHandler>,
    /// Whether the modal closed
    pub dismissed: bool,
}

impl ModalOutcome {
    fn dismissed(action: Option<EventHandler>) -> Self {
        Self { action, dismissed: true }
    }

    fn ignored() -> Self {
        Self { action: None, dismissed: false }
    }
}

/// Alert dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertModal {
    /// Whether the modal is shown
    pub visible: bool,
    /// Title
    pub title: String,
    /// Optional body text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Buttons, left to right
    pub buttons: Vec<AlertButton>,
}

impl AlertModal {
    /// Create a hidden alert with a single `OK` button
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            visible: false,
            title: title.into(),
            message: None,
            buttons: vec![AlertButton::new("OK")],
        }
    }

    /// Set the body text
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Replace the buttons; an empty list keeps the default `OK`
    pub fn with_buttons(mut self, buttons: Vec<AlertButton>) -> Self {
        if !buttons.is_empty() {
            self.buttons = buttons;
        }
        self
    }

    /// Show the modal, returning its entrance transition
    pub fn show(&mut self) -> ModalAnimation {
        self.visible = true;
        ModalAnimation::enter(ALERT_ENTER_MS)
    }

    /// Hide the modal, returning its exit transition
    pub fn dismiss(&mut self) -> ModalAnimation {
        self.visible = false;
        ModalAnimation::exit(ALERT_EXIT_MS)
    }

    /// Press a button by index
    ///
    /// Returns the button's handler and dismisses. Out-of-range indices and
    /// presses on a hidden modal are ignored.
    pub fn press(&mut self, index: usize) -> ModalOutcome {
        if !self.visible {
            return ModalOutcome::ignored();
        }
        let Some(button) = self.buttons.get(index) else {
            return ModalOutcome::ignored();
        };

        let action = button.on_press.clone();
        self.dismiss();
        ModalOutcome::dismissed(action)
    }

    /// Tap on the dimmed overlay
    pub fn tap_overlay(&mut self) -> ModalOutcome {
        if !self.visible {
            return ModalOutcome::ignored();
        }
        self.dismiss();
        ModalOutcome::dismissed(None)
    }

    /// Compute styles for the current theme
    pub fn styles(&self, theme: &ResolvedTheme) -> ModalStyles {
        ModalStyles {
            overlay: "rgba(0, 0, 0, 0.5)".to_string(),
            background: theme.colors.card.clone(),
            title_color: theme.colors.text.clone(),
            message_color: theme.colors.text_secondary.clone(),
            accent: None,
            max_width: 320.0,
        }
    }
}

/// Computed modal styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalStyles {
    /// Overlay color
    pub overlay: Color,
    /// Card background
    pub background: Color,
    /// Title color
    pub title_color: Color,
    /// Body text color
    pub message_color: Color,
    /// Header band color
    pub accent: Option<Color>,
    /// Maximum card width
    pub max_width: f32,
}

// =============================================================================
// Permission Card
// =============================================================================

/// Permission a card can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionType {
    /// Push notifications
    #[default]
    Notifications,
    /// Location
    Location,
    /// Camera
    Camera,
    /// Microphone
    Microphone,
    /// Photo library
    Photos,
    /// Contacts
    Contacts,
    /// Calendar
    Calendar,
}

impl PermissionType {
    /// Header band color
    pub fn accent_color(&self) -> &'static str {
        match self {
            PermissionType::Notifications => "#007AFF",
            PermissionType::Location => "#34C759",
            PermissionType::Camera => "#FF9500",
            PermissionType::Microphone => "#FF3B30",
            PermissionType::Photos => "#5856D6",
            PermissionType::Contacts => "#0A84FF",
            PermissionType::Calendar => "#FF2D55",
        }
    }

    /// Header icon name
    pub fn icon(&self) -> &'static str {
        match self {
            PermissionType::Notifications => "bell",
            PermissionType::Location => "map-pin",
            PermissionType::Camera => "camera",
            PermissionType::Microphone => "mic",
            PermissionType::Photos => "image",
            PermissionType::Contacts => "users",
            PermissionType::Calendar => "calendar",
        }
    }
}

/// Label of the dismiss button
pub const LATER_LABEL: &str = "Plus tard";

/// Label of the settings button
pub const SETTINGS_LABEL: &str = "Paramètres";

/// Card asking the user to grant a permission in the system settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCard {
    /// Whether the card is shown
    pub visible: bool,
    /// Permission asked for
    #[serde(rename = "type")]
    pub permission: PermissionType,
    /// Title
    pub title: String,
    /// Body text
    pub message: String,
    /// Handler replacing the system settings jump
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_open_settings: Option<EventHandler>,
}

impl PermissionCard {
    /// The two buttons: later (outline) and settings (primary)
    pub fn buttons(&self) -> [Button; 2] {
        [
            Button::new(LATER_LABEL).with_variant(ButtonVariant::Outline).full_width(true),
            Button::new(SETTINGS_LABEL).with_variant(ButtonVariant::Primary).full_width(true),
        ]
    }

    /// Entrance transition
    pub fn enter_animation(&self) -> ModalAnimation {
        ModalAnimation::enter(PERMISSION_ENTER_MS)
    }

    /// Exit transition
    pub fn exit_animation(&self) -> ModalAnimation {
        ModalAnimation::exit(PERMISSION_EXIT_MS)
    }

    /// Compute styles for the current theme
    pub fn styles(&self, theme: &ResolvedTheme) -> ModalStyles {
        ModalStyles {
            overlay: "rgba(0, 0, 0, 0.6)".to_string(),
            background: theme.colors.card.clone(),
            title_color: theme.colors.text.clone(),
            message_color: theme.colors.text_secondary.clone(),
            accent: Some(self.permission.accent_color().to_string()),
            max_width: 340.0,
        }
    }
}

// =============================================================================
// Permission Prompt
// =============================================================================

/// Shared holder for the app-wide permission card
///
/// Hiding keeps the contents so the exit transition can still draw them.
pub struct PermissionPrompt {
    card: RwLock<PermissionCard>,
    card_tx: watch::Sender<PermissionCard>,
}

impl PermissionPrompt {
    /// Create a hidden prompt
    pub fn new() -> Self {
        let (card_tx, _) = watch::channel(PermissionCard::default());
        Self { card: RwLock::new(PermissionCard::default()), card_tx }
    }

    /// Show a card
    pub fn show(&self, permission: PermissionType, title: impl Into<String>, message: impl Into<String>) {
        self.update(|card| {
            *card = PermissionCard {
                visible: true,
                permission,
                title: title.into(),
                message: message.into(),
                on_open_settings: None,
            };
        });
    }

    /// Hide the card, keeping its contents
    pub fn hide(&self) {
        self.update(|card| card.visible = false);
    }

    /// "Later" pressed
    pub fn later(&self) -> ModalOutcome {
        if !self.is_visible() {
            return ModalOutcome::ignored();
        }
        self.hide();
        ModalOutcome::dismissed(None)
    }

    /// "Settings" pressed
    ///
    /// Runs the card's own handler when it has one, otherwise opens the app's
    /// system settings page. The card hides either way.
    pub async fn open_settings(&self, platform: &dyn PushPlatform) -> ModalOutcome {
        let card = self.card();
        if !card.visible {
            return ModalOutcome::ignored();
        }

        if card.on_open_settings.is_none() {
            if let Err(e) = platform.open_settings().await {
                tracing::warn!("Failed to open settings: {}", e);
            }
        }

        self.hide();
        ModalOutcome::dismissed(card.on_open_settings)
    }

    /// Current card
    pub fn card(&self) -> PermissionCard {
        self.card.read().clone()
    }

    /// Whether the card is shown
    pub fn is_visible(&self) -> bool {
        self.card.read().visible
    }

    /// Subscribe to card changes
    pub fn subscribe(&self) -> watch::Receiver<PermissionCard> {
        self.card_tx.subscribe()
    }

    fn update(&self, apply: impl FnOnce(&mut PermissionCard)) {
        let card = {
            let mut card = self.card.write();
            apply(&mut card);
            card.clone()
        };
        self.card_tx.send_replace(card);
    }
}

impl Default for PermissionPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{resolve, ColorScheme};
    use app_core::push::{NotificationChannel, OsKind, PermissionStatus, PushError, Result as PushResult};
    use async_trait::async_trait;
    use mockall::mock;
    use storage::ColorMode;

    mock! {
        pub Platform {}

        #[async_trait]
        impl PushPlatform for Platform {
            fn os(&self) -> OsKind;
            fn is_physical_device(&self) -> bool;
            fn project_id(&self) -> Option<String>;
            async fn set_notification_channel(&self, channel: &NotificationChannel) -> PushResult<()>;
            async fn permission_status(&self) -> PushResult<PermissionStatus>;
            async fn request_permission(&self) -> PushResult<PermissionStatus>;
            async fn push_token(&self, project_id: &str) -> PushResult<String>;
            async fn open_settings(&self) -> PushResult<()>;
        }
    }

    // ==========================================================================
    // Animation Tests
    // ==========================================================================

    #[test]
    fn test_enter_animation_frames() {
        let anim = ModalAnimation::enter(ALERT_ENTER_MS);
        let start = anim.frame(0);
        assert_eq!(start.opacity, 0.0);
        assert!((start.scale - MODAL_START_SCALE).abs() < 1e-6);

        let mid = anim.frame(100);
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert!(mid.scale > MODAL_START_SCALE);

        assert_eq!(anim.frame(200).opacity, 1.0);
        assert!(!anim.is_finished(100));
        assert!(anim.is_finished(1000));
        assert!((anim.frame(1000).scale - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_exit_animation_frames() {
        let anim = ModalAnimation::exit(ALERT_EXIT_MS);
        assert_eq!(anim.frame(0), ModalFrame { opacity: 1.0, scale: 1.0 });

        let end = anim.frame(150);
        assert_eq!(end.opacity, 0.0);
        assert!((end.scale - MODAL_START_SCALE).abs() < 1e-6);
        assert!(anim.is_finished(150));
        assert!(!anim.is_finished(149));
    }

    // ==========================================================================
    // Alert Modal Tests
    // ==========================================================================

    #[test]
    fn test_alert_defaults_to_ok() {
        let alert = AlertModal::new("Info");
        assert_eq!(alert.buttons, vec![AlertButton::new("OK")]);
        assert_eq!(alert.buttons[0].to_button().variant, ButtonVariant::Primary);
        assert!(!alert.visible);
    }

    #[test]
    fn test_button_style_mapping() {
        assert_eq!(AlertButtonStyle::Default.variant(), ButtonVariant::Primary);
        assert_eq!(AlertButtonStyle::Cancel.variant(), ButtonVariant::Outline);
        assert_eq!(AlertButtonStyle::Destructive.variant(), ButtonVariant::Danger);
    }

    #[test]
    fn test_press_runs_action_then_dismisses() {
        let mut alert = AlertModal::new("Supprimer ?").with_buttons(vec![
            AlertButton::new("Annuler").with_style(AlertButtonStyle::Cancel),
            AlertButton::new("Supprimer")
                .with_style(AlertButtonStyle::Destructive)
                .on_press("delete-account"),
        ]);
        assert_eq!(alert.show(), ModalAnimation::enter(200));

        let outcome = alert.press(1);
        assert_eq!(outcome.action.as_deref(), Some("delete-account"));
        assert!(outcome.dismissed);
        assert!(!alert.visible);

        assert_eq!(alert.press(1), ModalOutcome::ignored());
    }

    #[test]
    fn test_overlay_tap_dismisses() {
        let mut alert = AlertModal::new("Info").with_message("Done");
        alert.show();
        assert!(alert.tap_overlay().dismissed);
        assert!(!alert.visible);
    }

    #[test]
    fn test_press_out_of_range_is_ignored() {
        let mut alert = AlertModal::new("Info");
        alert.show();
        assert!(!alert.press(3).dismissed);
        assert!(alert.visible);
    }

    #[test]
    fn test_empty_buttons_keep_default() {
        let alert = AlertModal::new("Info").with_buttons(Vec::new());
        assert_eq!(alert.buttons.len(), 1);
    }

    // ==========================================================================
    // Permission Tests
    // ==========================================================================

    #[test]
    fn test_permission_colors() {
        assert_eq!(PermissionType::Notifications.accent_color(), "#007AFF");
        assert_eq!(PermissionType::Calendar.accent_color(), "#FF2D55");
        assert_eq!(PermissionType::Camera.accent_color(), "#FF9500");
    }

    #[test]
    fn test_permission_card_styles_and_buttons() {
        let card = PermissionCard { permission: PermissionType::Location, ..Default::default() };
        let styles = card.styles(&resolve(ColorMode::Dark, ColorScheme::Light));
        assert_eq!(styles.accent.as_deref(), Some("#34C759"));
        assert_eq!(styles.background, "#1C1C1E");

        let [later, settings] = card.buttons();
        assert_eq!(later.title, LATER_LABEL);
        assert_eq!(later.variant, ButtonVariant::Outline);
        assert_eq!(settings.title, SETTINGS_LABEL);
        assert_eq!(card.enter_animation().duration_ms, 250);
        assert_eq!(card.exit_animation().duration_ms, 200);
    }

    #[test]
    fn test_prompt_hide_keeps_contents() {
        let prompt = PermissionPrompt::new();
        let mut rx = prompt.subscribe();
        prompt.show(PermissionType::Notifications, "Activer les notifications", "Dans les paramètres");
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().visible);

        prompt.hide();
        let card = prompt.card();
        assert!(!card.visible);
        assert_eq!(card.title, "Activer les notifications");
        assert_eq!(card.permission, PermissionType::Notifications);
    }

    #[test]
    fn test_later_hides() {
        let prompt = PermissionPrompt::new();
        assert!(!prompt.later().dismissed);

        prompt.show(PermissionType::Camera, "Caméra", "");
        assert!(prompt.later().dismissed);
        assert!(!prompt.is_visible());
    }

    #[tokio::test]
    async fn test_open_settings_uses_platform() {
        let mut platform = MockPlatform::new();
        platform.expect_open_settings().times(1).returning(|| Ok(()));

        let prompt = PermissionPrompt::new();
        prompt.show(PermissionType::Notifications, "Activer les notifications", "");

        let outcome = prompt.open_settings(&platform).await;
        assert!(outcome.dismissed);
        assert!(outcome.action.is_none());
        assert!(!prompt.is_visible());
    }

    #[tokio::test]
    async fn test_open_settings_failure_still_hides() {
        let mut platform = MockPlatform::new();
        platform
            .expect_open_settings()
            .returning(|| Err(PushError::Unsupported("web".to_string())));

        let prompt = PermissionPrompt::new();
        prompt.show(PermissionType::Photos, "Photos", "");
        assert!(prompt.open_settings(&platform).await.dismissed);
        assert!(!prompt.is_visible());
    }

    #[tokio::test]
    async fn test_hidden_prompt_ignores_settings() {
        let mut platform = MockPlatform::new();
        platform.expect_open_settings().never();

        let prompt = PermissionPrompt::new();
        assert!(!prompt.open_settings(&platform).await.dismissed);
    }
}
