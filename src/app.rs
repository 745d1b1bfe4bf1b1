//! Composition root
//!
//! [`App`] owns every state container and client, wires them together and
//! runs the startup sequence: hydrate persisted state, pick the first route,
//! fetch the session, then register for push notifications.

use anyhow::Context;
use app_core::{register_for_push_notifications, ApiClient, AuthClient, HttpAuthClient, PushPlatform};
use app_state::{OnboardingStore, PushTokenStore, SessionStore, ToastService};
use app_ui::modal::{PermissionPrompt, PermissionType};
use app_ui::navigation::{index_redirect, Navigator, Route};
use app_ui::screens::AuthFlow;
use app_ui::theme::{ColorScheme, ThemeStore};
use std::sync::Arc;
use storage::{DeviceStore, KvStore, SecureStore};

use crate::config::AppConfig;

/// Title of the prompt shown when notifications are denied
pub const NOTIFICATIONS_PROMPT_TITLE: &str = "Activer les notifications";
/// Message of the prompt shown when notifications are denied
pub const NOTIFICATIONS_PROMPT_MESSAGE: &str = "Pour recevoir des notifications importantes, veuillez activer les notifications dans les paramètres de votre appareil.";

/// What startup decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    /// First route shown
    pub route: Route,
    /// Whether a session was restored
    pub signed_in: bool,
    /// Push token, when registration succeeded
    pub push_token: Option<String>,
}

/// The assembled application
pub struct App {
    config: AppConfig,
    /// Device key-value store
    pub device: DeviceStore,
    /// Theme mode and resolution
    pub theme: Arc<ThemeStore>,
    /// Onboarding flag
    pub onboarding: Arc<OnboardingStore>,
    /// Auth session
    pub session: Arc<SessionStore>,
    /// Toast queue
    pub toasts: ToastService,
    /// Push token
    pub push_tokens: Arc<PushTokenStore>,
    /// Permission prompt
    pub permission_prompt: Arc<PermissionPrompt>,
    /// Route stack
    pub navigator: Arc<Navigator>,
    /// Backend REST client
    pub api: ApiClient,
    /// Auth screens' glue
    pub auth: AuthFlow,
}

impl App {
    /// Open the on-disk store named in the config and assemble the app
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store = KvStore::new(config.storage.clone())
            .with_context(|| format!("opening store at {}", config.storage.path))?;
        Self::with_store(config, Arc::new(store))
    }

    /// Assemble the app over an existing store
    pub fn with_store(config: AppConfig, store: Arc<dyn SecureStore>) -> anyhow::Result<Self> {
        let http_auth = HttpAuthClient::new(config.auth.clone(), store.clone())
            .context("building auth client")?;
        let api = ApiClient::new(config.api.clone())
            .context("building API client")?
            .with_cookies(http_auth.cookies().clone());

        Ok(Self::assemble(config, store, Arc::new(http_auth), api))
    }

    /// Assemble the app around any auth client
    pub fn with_auth_client(
        config: AppConfig,
        store: Arc<dyn SecureStore>,
        client: Arc<dyn AuthClient>,
    ) -> anyhow::Result<Self> {
        let api = ApiClient::new(config.api.clone()).context("building API client")?;
        Ok(Self::assemble(config, store, client, api))
    }

    fn assemble(
        config: AppConfig,
        store: Arc<dyn SecureStore>,
        client: Arc<dyn AuthClient>,
        api: ApiClient,
    ) -> Self {
        let device = DeviceStore::new(store);
        let session = Arc::new(SessionStore::new());
        let toasts = ToastService::new();
        let navigator = Arc::new(Navigator::new(Route::Index));
        let auth = AuthFlow::new(client, session.clone(), toasts.clone(), navigator.clone());

        Self {
            config,
            theme: Arc::new(ThemeStore::new(device.clone())),
            onboarding: Arc::new(OnboardingStore::new(device.clone())),
            device,
            session,
            toasts,
            push_tokens: Arc::new(PushTokenStore::new()),
            permission_prompt: Arc::new(PermissionPrompt::new()),
            navigator,
            api,
            auth,
        }
    }

    /// Configuration the app was built with
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the startup sequence
    pub async fn start(&self, platform: &dyn PushPlatform, scheme: ColorScheme) -> StartupReport {
        self.theme.set_system_scheme(scheme);
        let mode = self.theme.load();
        let seen = self.onboarding.load();
        tracing::debug!(?mode, seen, "hydrated device state");

        let first = index_redirect(self.onboarding.status()).unwrap_or(Route::Onboarding);
        self.navigator.reset(first);

        self.auth.refresh_session().await;
        self.auth.guard();

        let push_token = self.register_push(platform).await;
        let report = StartupReport {
            route: self.navigator.current(),
            signed_in: self.session.is_signed_in(),
            push_token,
        };
        tracing::info!(path = %report.route.to_path(), signed_in = report.signed_in, "app started");
        report
    }

    /// Register for push notifications, prompting on denial
    pub async fn register_push(&self, platform: &dyn PushPlatform) -> Option<String> {
        let prompt = self.permission_prompt.clone();
        register_for_push_notifications(
            platform,
            self.config.project_id.as_deref(),
            &self.push_tokens,
            &self.api,
            move || {
                prompt.show(
                    PermissionType::Notifications,
                    NOTIFICATIONS_PROMPT_TITLE,
                    NOTIFICATIONS_PROMPT_MESSAGE,
                )
            },
        )
        .await
    }
}
