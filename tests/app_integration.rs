//! App Integration Tests
//!
//! End-to-end startup, auth and toast flows over a real sled store and a
//! mock backend.

use app_core::push::Result as PushResult;
use app_core::{
    ApiConfig, AuthConfig, NotificationChannel, OsKind, PermissionStatus, PushPlatform,
};
use app_state::ToastSeverity;
use app_ui::navigation::Route;
use app_ui::screens::{SignInScreen, SubmitOutcome};
use app_ui::theme::ColorScheme;
use async_trait::async_trait;
use mobile_starter::{App, AppConfig};
use std::sync::Arc;
use std::time::Duration;
use storage::{ColorMode, KvConfig, KvStore};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FakePlatform {
    permission: PermissionStatus,
}

#[async_trait]
impl PushPlatform for FakePlatform {
    fn os(&self) -> OsKind {
        OsKind::Ios
    }

    fn is_physical_device(&self) -> bool {
        true
    }

    fn project_id(&self) -> Option<String> {
        Some("proj-1".to_string())
    }

    async fn set_notification_channel(&self, _channel: &NotificationChannel) -> PushResult<()> {
        Ok(())
    }

    async fn permission_status(&self) -> PushResult<PermissionStatus> {
        Ok(self.permission)
    }

    async fn request_permission(&self) -> PushResult<PermissionStatus> {
        Ok(self.permission)
    }

    async fn push_token(&self, project_id: &str) -> PushResult<String> {
        Ok(format!("ExponentPushToken[{}]", project_id))
    }

    async fn open_settings(&self) -> PushResult<()> {
        Ok(())
    }
}

fn granted() -> FakePlatform {
    FakePlatform { permission: PermissionStatus::Granted }
}

fn denied() -> FakePlatform {
    FakePlatform { permission: PermissionStatus::Denied }
}

fn config(server: &MockServer, dir: &TempDir) -> AppConfig {
    AppConfig::default()
        .with_storage(KvConfig::new(dir.path().join("kv").to_string_lossy()))
        .with_api(ApiConfig::new(server.uri()))
        .with_auth(AuthConfig::new(server.uri()))
}

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": "u1",
        "email": "alice@example.com",
        "name": "Alice",
        "emailVerified": true,
        "image": null,
        "createdAt": "2024-05-01T12:00:00.000Z"
    })
}

fn session_json() -> serde_json::Value {
    serde_json::json!({
        "session": {
            "id": "s1",
            "userId": "u1",
            "token": "abc",
            "expiresAt": "2099-01-01T00:00:00.000Z"
        },
        "user": user_json()
    })
}

async fn mount_signed_out(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::Value::Null))
        .mount(server)
        .await;
}

async fn mount_register(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/notifications/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(server)
        .await;
}

/// First launch: onboarding, no session, push denied
#[tokio::test]
async fn test_first_launch_goes_to_onboarding() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_signed_out(&server).await;

    let app = App::new(config(&server, &dir)).unwrap();
    let report = app.start(&denied(), ColorScheme::Light).await;

    assert_eq!(report.route, Route::Onboarding);
    assert!(!report.signed_in);
    assert!(report.push_token.is_none());

    let card = app.permission_prompt.card();
    assert!(card.visible);
    assert_eq!(card.title, "Activer les notifications");
}

/// Finished onboarding and a chosen theme survive a restart
#[tokio::test]
async fn test_device_state_survives_restart() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_signed_out(&server).await;
    mount_register(&server).await;

    {
        let app = App::new(config(&server, &dir)).unwrap();
        app.start(&granted(), ColorScheme::Light).await;
        app.onboarding.complete();
        app.theme.set_mode(ColorMode::Dark);
    }

    let app = App::new(config(&server, &dir)).unwrap();
    let report = app.start(&granted(), ColorScheme::Light).await;

    assert_eq!(report.route, Route::Demo);
    assert_eq!(app.theme.mode(), ColorMode::Dark);
    assert!(app.theme.is_dark());
    assert_eq!(report.push_token.as_deref(), Some("ExponentPushToken[proj-1]"));
    assert_eq!(app.push_tokens.token().as_deref(), Some("ExponentPushToken[proj-1]"));
}

/// Configured project id wins over the platform's
#[tokio::test]
async fn test_configured_project_id() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_signed_out(&server).await;
    Mock::given(method("POST"))
        .and(path("/notifications/register"))
        .and(body_json(serde_json::json!({ "token": "ExponentPushToken[custom]" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = App::new(config(&server, &dir).with_project_id("custom")).unwrap();
    let token = app.register_push(&granted()).await;

    assert_eq!(token.as_deref(), Some("ExponentPushToken[custom]"));
    assert!(!app.permission_prompt.is_visible());
}

/// Sign-in stores the cookie, restores the session and lands on the demo
#[tokio::test]
async fn test_sign_in_flow() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/sign-in/email"))
        .and(body_json(serde_json::json!({
            "email": "alice@example.com",
            "password": "password123",
            "callbackURL": "/(demo)"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "better-auth.session_token=abc; Path=/; HttpOnly")
                .set_body_json(serde_json::json!({ "token": "abc", "user": user_json() })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .and(header("cookie", "better-auth.session_token=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
        .mount(&server)
        .await;
    mount_signed_out(&server).await;

    let app = App::new(config(&server, &dir)).unwrap();
    app.onboarding.complete();
    app.start(&denied(), ColorScheme::Light).await;
    app.navigator.replace(Route::SignIn);

    let mut screen = SignInScreen::new();
    screen.set_email("alice@example.com");
    screen.set_password("password123");

    assert_eq!(screen.submit(&app.auth).await, SubmitOutcome::Succeeded);
    assert!(app.session.is_signed_in());
    assert_eq!(app.navigator.current(), Route::Demo);

    let toast = app.toasts.snapshot().pop().unwrap();
    assert_eq!(toast.severity, ToastSeverity::Success);
    assert_eq!(toast.message, "Connexion réussie !");
}

/// A stored session skips the auth screens
#[tokio::test]
async fn test_restored_session_leaves_auth_group() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/sign-out"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let app = App::new(config(&server, &dir)).unwrap();
    let report = app.start(&denied(), ColorScheme::Dark).await;
    assert!(report.signed_in);
    assert!(app.theme.is_dark());

    app.navigator.push(Route::SignIn);
    assert_eq!(app.auth.guard(), Some(Route::Demo));

    app.auth.sign_out().await;
    assert!(!app.session.is_signed_in());
    assert_eq!(app.navigator.current(), Route::SignIn);
}

/// A toast is removed exactly once after its duration
#[tokio::test(start_paused = true)]
async fn test_toast_expires_once() {
    let store = Arc::new(KvStore::in_memory().unwrap());
    let app = App::with_store(AppConfig::default(), store).unwrap();
    let mut events = app.toasts.events();

    let before = app.toasts.len();
    app.toasts.enqueue("Saved", Some(ToastSeverity::Success), None);
    assert_eq!(app.toasts.len(), before + 1);

    tokio::time::sleep(Duration::from_millis(3000 + 500)).await;
    assert_eq!(app.toasts.len(), before);

    let mut removals = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, app_state::toast::ToastEvent::Removed(_)) {
            removals += 1;
        }
    }
    assert_eq!(removals, 1);
}
