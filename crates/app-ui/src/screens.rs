//! Authentication screens and the session-aware flow behind them
//!
//! [`AuthFlow`] ties the auth client to the session container, the toast
//! service and the navigator. The sign-in and sign-up screens hold form state
//! and call into it on submit.

use crate::components::{Button, ButtonSize, Input};
use crate::navigation::{auth_redirect, Navigator, Route};
use app_core::{
    AuthClient, AuthError, FormErrors, FormField, SignInForm, SignInRequest, SignUpForm,
    SignUpRequest,
};
use app_state::{SessionState, SessionStore, ToastService};
use std::sync::Arc;

/// Toast texts
pub mod messages {
    /// Sign-in succeeded
    pub const SIGN_IN_SUCCESS: &str = "Connexion réussie !";
    /// Sign-up succeeded
    pub const SIGN_UP_SUCCESS: &str = "Inscription réussie ! Bienvenue 🎉";
    /// Sign-in rejected without a message
    pub const SIGN_IN_FAILED: &str = "Échec de la connexion";
    /// Sign-up rejected without a message
    pub const SIGN_UP_FAILED: &str = "Échec de l'inscription";
    /// Transport or decode failure
    pub const UNEXPECTED_ERROR: &str = "Une erreur est survenue";
}

/// Outcome of submitting a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the client was not called
    Invalid,
    /// Signed in and routed to the demo
    Succeeded,
    /// The client failed; an error toast was shown
    Failed,
}

fn error_toast(error: &AuthError, fallback: &str) -> String {
    match error {
        AuthError::Rejected { .. } => error.server_message().unwrap_or(fallback).to_string(),
        _ => messages::UNEXPECTED_ERROR.to_string(),
    }
}

// =============================================================================
// Auth Flow
// =============================================================================

/// Session-aware glue between the auth client and the UI
#[derive(Clone)]
pub struct AuthFlow {
    client: Arc<dyn AuthClient>,
    session: Arc<SessionStore>,
    toasts: ToastService,
    navigator: Arc<Navigator>,
}

impl AuthFlow {
    /// Create a flow over shared containers
    pub fn new(
        client: Arc<dyn AuthClient>,
        session: Arc<SessionStore>,
        toasts: ToastService,
        navigator: Arc<Navigator>,
    ) -> Self {
        Self { client, session, toasts, navigator }
    }

    /// Session container
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Toast service
    pub fn toasts(&self) -> &ToastService {
        &self.toasts
    }

    /// Navigator
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Fetch the session from the backend into the session container
    ///
    /// A failed fetch counts as signed out.
    pub async fn refresh_session(&self) -> SessionState {
        match self.client.get_session().await {
            Ok(session) => self.session.set_session(session),
            Err(e) => {
                tracing::warn!("Failed to fetch session: {}", e);
                self.session.set_session(None);
            }
        }
        self.session.state()
    }

    /// Leave the auth screens when a session exists
    ///
    /// Does nothing while the session is still pending. Returns the route it
    /// redirected to.
    pub fn guard(&self) -> Option<Route> {
        let target = auth_redirect(&self.session.state(), &self.navigator.current())?;
        self.navigator.replace(target.clone());
        Some(target)
    }

    /// Sign out and go to sign-in
    ///
    /// The local session is dropped even when the backend call fails.
    pub async fn sign_out(&self) {
        if let Err(e) = self.client.sign_out().await {
            tracing::warn!("Sign-out request failed: {}", e);
        }
        self.session.sign_out();
        self.navigator.replace(Route::SignIn);
    }

    async fn on_authenticated(&self, message: &str) {
        self.toasts.success(message, None);
        self.refresh_session().await;
        self.navigator.replace(Route::Demo);
    }

    async fn sign_in(&self, form: &SignInForm) -> SubmitOutcome {
        let request = SignInRequest {
            email: form.email.clone(),
            password: form.password.clone(),
            callback_url: Some(Route::Demo.to_path()),
        };

        match self.client.sign_in_email(request).await {
            Ok(response) => {
                tracing::debug!(user_id = %response.user.id, "signed in");
                self.on_authenticated(messages::SIGN_IN_SUCCESS).await;
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!("Sign-in failed: {}", e);
                self.toasts.error(error_toast(&e, messages::SIGN_IN_FAILED), None);
                SubmitOutcome::Failed
            }
        }
    }

    async fn sign_up(&self, form: &SignUpForm) -> SubmitOutcome {
        let request = SignUpRequest {
            name: form.name.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            callback_url: Some(Route::Demo.to_path()),
        };

        match self.client.sign_up_email(request).await {
            Ok(response) => {
                tracing::debug!(user_id = %response.user.id, "signed up");
                self.on_authenticated(messages::SIGN_UP_SUCCESS).await;
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!("Sign-up failed: {}", e);
                self.toasts.error(error_toast(&e, messages::SIGN_UP_FAILED), None);
                SubmitOutcome::Failed
            }
        }
    }
}

// =============================================================================
// Sign In
// =============================================================================

/// Footer link to the other auth screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthLink {
    /// Lead-in text
    pub prompt: &'static str,
    /// Link text
    pub label: &'static str,
    /// Destination
    pub route: Route,
}

/// Sign-in screen state
#[derive(Debug, Clone, Default)]
pub struct SignInScreen {
    form: SignInForm,
    errors: FormErrors,
    loading: bool,
}

impl SignInScreen {
    /// Title
    pub const TITLE: &'static str = "Connexion";
    /// Subtitle
    pub const SUBTITLE: &'static str = "Connectez-vous à votre compte";

    /// Create an empty screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Form contents
    pub fn form(&self) -> &SignInForm {
        &self.form
    }

    /// Current field errors
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Whether a submit is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Edit the email; clears its error
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
        self.errors.clear(FormField::Email);
    }

    /// Edit the password; clears its error
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        self.errors.clear(FormField::Password);
    }

    /// Validate and, when valid, sign in
    pub async fn submit(&mut self, flow: &AuthFlow) -> SubmitOutcome {
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return SubmitOutcome::Invalid;
        }

        self.loading = true;
        let outcome = flow.sign_in(&self.form).await;
        self.loading = false;
        outcome
    }

    /// Field models
    pub fn inputs(&self) -> [Input; 2] {
        [
            Input::new()
                .with_label("Email")
                .with_placeholder("votre@email.com")
                .with_value(&self.form.email)
                .with_left_icon("mail")
                .with_error(self.errors.email.clone()),
            Input::new()
                .with_label("Mot de passe")
                .with_placeholder("••••••••")
                .with_value(&self.form.password)
                .with_left_icon("lock")
                .secure()
                .with_error(self.errors.password.clone()),
        ]
    }

    /// Submit button
    pub fn button(&self) -> Button {
        Button::new("Se connecter")
            .with_size(ButtonSize::Lg)
            .full_width(true)
            .loading(self.loading)
            .on_press("sign-in:submit")
    }

    /// Link to sign-up
    pub fn link(&self) -> AuthLink {
        AuthLink { prompt: "Pas encore de compte ?", label: "S'inscrire", route: Route::SignUp }
    }
}

// =============================================================================
// Sign Up
// =============================================================================

/// Sign-up screen state
#[derive(Debug, Clone, Default)]
pub struct SignUpScreen {
    form: SignUpForm,
    errors: FormErrors,
    loading: bool,
}

impl SignUpScreen {
    /// Title
    pub const TITLE: &'static str = "Inscription";
    /// Subtitle
    pub const SUBTITLE: &'static str = "Créez votre compte";

    /// Create an empty screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Form contents
    pub fn form(&self) -> &SignUpForm {
        &self.form
    }

    /// Current field errors
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Whether a submit is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Edit a field; clears its error
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.form.name = value,
            FormField::Email => self.form.email = value,
            FormField::Password => self.form.password = value,
            FormField::ConfirmPassword => self.form.confirm_password = value,
        }
        self.errors.clear(field);
    }

    /// Validate and, when valid, create the account
    pub async fn submit(&mut self, flow: &AuthFlow) -> SubmitOutcome {
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return SubmitOutcome::Invalid;
        }

        self.loading = true;
        let outcome = flow.sign_up(&self.form).await;
        self.loading = false;
        outcome
    }

    /// Field models
    pub fn inputs(&self) -> [Input; 4] {
        let field = |label: &str, placeholder: &str, icon: &str, value: &str, error: &Option<String>| {
            Input::new()
                .with_label(label)
                .with_placeholder(placeholder)
                .with_value(value)
                .with_left_icon(icon)
                .with_error(error.clone())
        };

        [
            field("Nom complet", "John Doe", "user", &self.form.name, &self.errors.name),
            field("Email", "votre@email.com", "mail", &self.form.email, &self.errors.email),
            field("Mot de passe", "••••••••", "lock", &self.form.password, &self.errors.password)
                .secure(),
            field(
                "Confirmer le mot de passe",
                "••••••••",
                "lock",
                &self.form.confirm_password,
                &self.errors.confirm_password,
            )
            .secure(),
        ]
    }

    /// Submit button
    pub fn button(&self) -> Button {
        Button::new("S'inscrire")
            .with_size(ButtonSize::Lg)
            .full_width(true)
            .loading(self.loading)
            .on_press("sign-up:submit")
    }

    /// Link to sign-in
    pub fn link(&self) -> AuthLink {
        AuthLink { prompt: "Déjà un compte ?", label: "Se connecter", route: Route::SignIn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::AuthResponse;
    use app_state::{AuthSession, SessionInfo, SessionUser, ToastSeverity};
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Auth {}

        #[async_trait]
        impl AuthClient for Auth {
            async fn sign_in_email(&self, request: SignInRequest) -> app_core::auth::Result<AuthResponse>;
            async fn sign_up_email(&self, request: SignUpRequest) -> app_core::auth::Result<AuthResponse>;
            async fn sign_out(&self) -> app_core::auth::Result<()>;
            async fn get_session(&self) -> app_core::auth::Result<Option<AuthSession>>;
            fn cookie(&self) -> Option<String>;
        }
    }

    fn user() -> SessionUser {
        SessionUser {
            id: "u1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            email_verified: true,
            image: None,
            created_at: None,
        }
    }

    fn session() -> AuthSession {
        AuthSession {
            session: SessionInfo {
                id: "s1".to_string(),
                user_id: "u1".to_string(),
                token: None,
                expires_at: chrono::Utc::now() + chrono::Duration::days(7),
            },
            user: user(),
        }
    }

    fn flow(client: MockAuth, route: Route) -> AuthFlow {
        AuthFlow::new(
            Arc::new(client),
            Arc::new(SessionStore::new()),
            ToastService::new(),
            Arc::new(Navigator::new(route)),
        )
    }

    fn last_toast(flow: &AuthFlow) -> (ToastSeverity, String) {
        let toast = flow.toasts.snapshot().pop().unwrap();
        (toast.severity, toast.message)
    }

    fn filled_sign_in() -> SignInScreen {
        let mut screen = SignInScreen::new();
        screen.set_email("alice@example.com");
        screen.set_password("password123");
        screen
    }

    #[tokio::test]
    async fn test_invalid_form_skips_client() {
        let mut client = MockAuth::new();
        client.expect_sign_in_email().never();
        let flow = flow(client, Route::SignIn);

        let mut screen = SignInScreen::new();
        screen.set_email("nope");
        assert_eq!(screen.submit(&flow).await, SubmitOutcome::Invalid);
        assert_eq!(screen.errors().email.as_deref(), Some("Email invalide"));
        assert!(screen.inputs()[1].error.is_some());
        assert!(flow.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let mut client = MockAuth::new();
        client
            .expect_sign_in_email()
            .withf(|req| req.email == "alice@example.com" && req.callback_url.as_deref() == Some("/(demo)"))
            .times(1)
            .returning(|_| Ok(AuthResponse { token: Some("tok".to_string()), user: user() }));
        client.expect_get_session().times(1).returning(|| Ok(Some(session())));
        let flow = flow(client, Route::SignIn);

        let mut screen = filled_sign_in();
        assert_eq!(screen.submit(&flow).await, SubmitOutcome::Succeeded);
        assert!(!screen.is_loading());
        assert_eq!(
            last_toast(&flow),
            (ToastSeverity::Success, messages::SIGN_IN_SUCCESS.to_string())
        );
        assert!(flow.session().is_signed_in());
        assert_eq!(flow.navigator().current(), Route::Demo);
    }

    #[tokio::test]
    async fn test_sign_in_rejected_shows_server_message() {
        let mut client = MockAuth::new();
        client.expect_sign_in_email().returning(|_| {
            Err(AuthError::Rejected {
                status: 401,
                code: Some("INVALID_EMAIL_OR_PASSWORD".to_string()),
                message: "Invalid email or password".to_string(),
            })
        });
        let flow = flow(client, Route::SignIn);

        let mut screen = filled_sign_in();
        assert_eq!(screen.submit(&flow).await, SubmitOutcome::Failed);
        assert_eq!(
            last_toast(&flow),
            (ToastSeverity::Error, "Invalid email or password".to_string())
        );
        assert_eq!(flow.navigator().current(), Route::SignIn);
    }

    #[tokio::test]
    async fn test_sign_in_rejected_without_message_uses_fallback() {
        let mut client = MockAuth::new();
        client.expect_sign_in_email().returning(|_| {
            Err(AuthError::Rejected { status: 500, code: None, message: String::new() })
        });
        let flow = flow(client, Route::SignIn);

        filled_sign_in().submit(&flow).await;
        assert_eq!(last_toast(&flow).1, messages::SIGN_IN_FAILED);
    }

    #[tokio::test]
    async fn test_sign_in_decode_failure_is_generic() {
        let mut client = MockAuth::new();
        client.expect_sign_in_email().returning(|_| {
            Err(AuthError::Serialization(serde_json::from_str::<u8>("x").unwrap_err()))
        });
        let flow = flow(client, Route::SignIn);

        filled_sign_in().submit(&flow).await;
        assert_eq!(last_toast(&flow).1, messages::UNEXPECTED_ERROR);
    }

    #[tokio::test]
    async fn test_sign_up_success() {
        let mut client = MockAuth::new();
        client
            .expect_sign_up_email()
            .withf(|req| req.name == "Alice")
            .times(1)
            .returning(|_| Ok(AuthResponse { token: None, user: user() }));
        client.expect_get_session().returning(|| Ok(Some(session())));
        let flow = flow(client, Route::SignUp);

        let mut screen = SignUpScreen::new();
        screen.set_field(FormField::Name, "Alice");
        screen.set_field(FormField::Email, "alice@example.com");
        screen.set_field(FormField::Password, "password123");
        screen.set_field(FormField::ConfirmPassword, "password123");

        assert_eq!(screen.submit(&flow).await, SubmitOutcome::Succeeded);
        assert_eq!(last_toast(&flow).1, messages::SIGN_UP_SUCCESS);
        assert_eq!(flow.navigator().current(), Route::Demo);
    }

    #[tokio::test]
    async fn test_sign_up_mismatch_and_clear_on_edit() {
        let mut client = MockAuth::new();
        client.expect_sign_up_email().never();
        let flow = flow(client, Route::SignUp);

        let mut screen = SignUpScreen::new();
        screen.set_field(FormField::Name, "Alice");
        screen.set_field(FormField::Email, "alice@example.com");
        screen.set_field(FormField::Password, "password123");
        screen.set_field(FormField::ConfirmPassword, "password124");

        assert_eq!(screen.submit(&flow).await, SubmitOutcome::Invalid);
        assert!(screen.errors().confirm_password.is_some());

        screen.set_field(FormField::ConfirmPassword, "password123");
        assert!(screen.errors().is_empty());
    }

    #[tokio::test]
    async fn test_guard_redirects_signed_in_user() {
        let mut client = MockAuth::new();
        client.expect_get_session().returning(|| Ok(Some(session())));
        let flow = flow(client, Route::SignIn);

        assert_eq!(flow.guard(), None);
        flow.refresh_session().await;
        assert_eq!(flow.guard(), Some(Route::Demo));
        assert_eq!(flow.navigator().current(), Route::Demo);
    }

    #[tokio::test]
    async fn test_refresh_failure_counts_as_signed_out() {
        let mut client = MockAuth::new();
        client
            .expect_get_session()
            .returning(|| Err(AuthError::Rejected { status: 500, code: None, message: String::new() }));
        let flow = flow(client, Route::SignIn);

        assert_eq!(flow.refresh_session().await, SessionState::SignedOut);
        assert_eq!(flow.guard(), None);
    }

    #[tokio::test]
    async fn test_sign_out_always_leaves() {
        let mut client = MockAuth::new();
        client
            .expect_sign_out()
            .times(1)
            .returning(|| Err(AuthError::Rejected { status: 500, code: None, message: String::new() }));
        let flow = flow(client, Route::Demo);
        flow.session().set_session(Some(session()));

        flow.sign_out().await;
        assert!(!flow.session().is_signed_in());
        assert_eq!(flow.navigator().current(), Route::SignIn);
    }

    #[test]
    fn test_links_point_at_each_other() {
        assert_eq!(SignInScreen::new().link().route, Route::SignUp);
        assert_eq!(SignUpScreen::new().link().route, Route::SignIn);
        assert!(SignUpScreen::new().inputs()[3].secure);
    }
}
