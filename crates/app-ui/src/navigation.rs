//! Navigation: routes, the stack, redirect guards and navigator layouts
//!
//! Route groups are written in parentheses, as in `/(auth)/sign-in`. The
//! group-less form `/sign-in` matches the same route.

use crate::theme::{Color, ResolvedTheme};
use app_state::{OnboardingStatus, SessionState};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

// =============================================================================
// Routes
// =============================================================================

/// Route group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteGroup {
    /// Sign-in and sign-up
    Auth,
    /// Demo screens
    Demo,
}

impl RouteGroup {
    /// Segment name including the parentheses
    pub fn segment(&self) -> &'static str {
        match self {
            RouteGroup::Auth => "(auth)",
            RouteGroup::Demo => "(demo)",
        }
    }
}

/// App routes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum Route {
    /// Entry point; redirects immediately
    #[default]
    Index,
    /// Onboarding slides
    Onboarding,
    /// Sign-in form
    SignIn,
    /// Sign-up form
    SignUp,
    /// Demo home
    Demo,
    /// Unknown path
    NotFound {
        /// The path that failed to match
        path: String,
    },
}

impl Route {
    /// Path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Onboarding => "/onboarding".to_string(),
            Route::SignIn => "/(auth)/sign-in".to_string(),
            Route::SignUp => "/(auth)/sign-up".to_string(),
            Route::Demo => "/(demo)".to_string(),
            Route::NotFound { path } => path.clone(),
        }
    }

    /// Match a path, ignoring the query string and trailing slashes
    pub fn match_path(path: &str) -> Route {
        let pathname = path.split_once('?').map_or(path, |(pathname, _)| pathname);
        let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Index,
            ["onboarding"] => Route::Onboarding,
            ["(auth)", "sign-in"] | ["sign-in"] => Route::SignIn,
            ["(auth)", "sign-up"] | ["sign-up"] => Route::SignUp,
            ["(demo)"] | ["(demo)", "index"] => Route::Demo,
            _ => Route::NotFound { path: path.to_string() },
        }
    }

    /// Group the route belongs to
    pub fn group(&self) -> Option<RouteGroup> {
        match self {
            Route::SignIn | Route::SignUp => Some(RouteGroup::Auth),
            Route::Demo => Some(RouteGroup::Demo),
            _ => None,
        }
    }

    /// Check whether the route is part of the auth flow
    pub fn in_auth_group(&self) -> bool {
        self.group() == Some(RouteGroup::Auth)
    }

    /// Check whether the route needs a signed-in user
    ///
    /// Every screen of the starter, the demo included, is reachable signed out.
    pub fn requires_auth(&self) -> bool {
        false
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self { route, key: uuid::Uuid::new_v4().to_string() }
    }
}

/// Navigation stack; never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStack {
    root: StackEntry,
    above: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a stack with a root route
    pub fn new(root: Route) -> Self {
        Self { root: StackEntry::new(root), above: Vec::new() }
    }

    /// Push a route
    pub fn push(&mut self, route: Route) {
        self.above.push(StackEntry::new(route));
    }

    /// Replace the top route
    pub fn replace(&mut self, route: Route) {
        let entry = StackEntry::new(route);
        match self.above.last_mut() {
            Some(top) => *top = entry,
            None => self.root = entry,
        }
    }

    /// Pop the top route; false at the root
    pub fn back(&mut self) -> bool {
        self.above.pop().is_some()
    }

    /// Start over from a new root
    pub fn reset(&mut self, route: Route) {
        self.root = StackEntry::new(route);
        self.above.clear();
    }

    /// Current (top) entry
    pub fn current_entry(&self) -> &StackEntry {
        self.above.last().unwrap_or(&self.root)
    }

    /// Current (top) route
    pub fn current(&self) -> &Route {
        &self.current_entry().route
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.above.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    /// Entries from bottom to top
    pub fn entries(&self) -> impl Iterator<Item = &StackEntry> {
        std::iter::once(&self.root).chain(self.above.iter())
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Index)
    }
}

/// Shared router over a [`NavigationStack`]
pub struct Navigator {
    stack: RwLock<NavigationStack>,
    route_tx: watch::Sender<Route>,
}

impl Navigator {
    /// Create a navigator rooted at `root`
    pub fn new(root: Route) -> Self {
        let (route_tx, _) = watch::channel(root.clone());
        Self { stack: RwLock::new(NavigationStack::new(root)), route_tx }
    }

    /// Push a route
    pub fn push(&self, route: Route) {
        self.apply(|stack| stack.push(route));
    }

    /// Replace the current route
    pub fn replace(&self, route: Route) {
        self.apply(|stack| stack.replace(route));
    }

    /// Go back; false at the root
    pub fn back(&self) -> bool {
        let mut popped = false;
        self.apply(|stack| popped = stack.back());
        popped
    }

    /// Reset to a single route
    pub fn reset(&self, route: Route) {
        self.apply(|stack| stack.reset(route));
    }

    /// Current route
    pub fn current(&self) -> Route {
        self.stack.read().current().clone()
    }

    /// Stack snapshot
    pub fn stack(&self) -> NavigationStack {
        self.stack.read().clone()
    }

    /// Subscribe to route changes
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.route_tx.subscribe()
    }

    fn apply(&self, op: impl FnOnce(&mut NavigationStack)) {
        let route = {
            let mut stack = self.stack.write();
            op(&mut stack);
            stack.current().clone()
        };
        tracing::debug!(path = %route.to_path(), "navigate");
        self.route_tx.send_replace(route);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Index)
    }
}

// =============================================================================
// Redirect Guards
// =============================================================================

/// Where the index route sends the user; `None` while onboarding is loading
pub fn index_redirect(onboarding: OnboardingStatus) -> Option<Route> {
    match onboarding {
        OnboardingStatus::Loading => None,
        OnboardingStatus::Ready { has_seen_onboarding: false } => Some(Route::Onboarding),
        OnboardingStatus::Ready { has_seen_onboarding: true } => Some(Route::Demo),
    }
}

/// Redirect away from the auth screens once a session exists
pub fn auth_redirect(session: &SessionState, current: &Route) -> Option<Route> {
    match session {
        SessionState::SignedIn(_) if current.in_auth_group() => Some(Route::Demo),
        _ => None,
    }
}

// =============================================================================
// Navigator Layouts
// =============================================================================

/// Navigation error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Tab bars hold two to five tabs
    #[error("Tab navigators need 2 to 5 screens, got {0}")]
    TabCount(usize),

    /// A layout needs at least one screen
    #[error("Navigator has no screens")]
    Empty,
}

/// Result type for layout generation
pub type Result<T> = std::result::Result<T, NavigationError>;

/// Navigator kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigatorKind {
    /// Stacked screens
    Stack,
    /// Bottom tab bar
    Tabs,
    /// Side drawer
    Drawer,
}

impl NavigatorKind {
    /// Route group the generated screens live in
    pub fn group(&self) -> &'static str {
        match self {
            NavigatorKind::Stack => "(stack)",
            NavigatorKind::Tabs => "(tabs)",
            NavigatorKind::Drawer => "(drawer)",
        }
    }

    /// Screens generated when none are requested
    pub fn default_screens(&self) -> &'static [&'static str] {
        match self {
            NavigatorKind::Stack => &["index", "details", "modal"],
            NavigatorKind::Tabs => &["index", "explore", "profile"],
            NavigatorKind::Drawer => &["index", "profile", "settings", "about"],
        }
    }
}

/// Known screen names, their titles and icons
const SCREEN_PRESETS: &[(&str, &str, &str)] = &[
    ("index", "Accueil", "home"),
    ("explore", "Explorer", "compass"),
    ("profile", "Profil", "user"),
    ("settings", "Paramètres", "settings"),
    ("notifications", "Notifications", "bell"),
    ("about", "À propos", "info"),
    ("details", "Détails", "file-text"),
    ("modal", "Modal", "layers"),
];

/// How a stack screen is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Pushed card
    #[default]
    Card,
    /// Modal sheet
    Modal,
}

/// One screen in a navigator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutScreen {
    /// File/route name
    pub name: String,
    /// Header and tab title
    pub title: String,
    /// Tab or drawer icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Per-screen header override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_shown: Option<bool>,
    /// Stack presentation
    #[serde(default)]
    pub presentation: Presentation,
}

impl LayoutScreen {
    fn for_kind(kind: NavigatorKind, name: &str) -> Self {
        let preset = SCREEN_PRESETS.iter().find(|(preset, _, _)| *preset == name);
        let title = match preset {
            Some((_, title, _)) => title.to_string(),
            None => title_case(name),
        };
        let icon = match kind {
            NavigatorKind::Stack => None,
            NavigatorKind::Tabs | NavigatorKind::Drawer => {
                Some(preset.map_or("circle", |(_, _, icon)| *icon).to_string())
            }
        };

        // Pushed stack screens get a header back button.
        let (header_shown, presentation) = match (kind, name) {
            (NavigatorKind::Stack, "index") => (None, Presentation::Card),
            (NavigatorKind::Stack, "modal") => (Some(true), Presentation::Modal),
            (NavigatorKind::Stack, _) => (Some(true), Presentation::Card),
            _ => (None, Presentation::Card),
        };

        Self { name: name.to_string(), title, icon, header_shown, presentation }
    }
}

fn title_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generated navigator layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorLayout {
    /// Navigator kind
    pub kind: NavigatorKind,
    /// Route group directory
    pub group: String,
    /// Default header visibility
    pub header_shown: bool,
    /// Screens in order
    pub screens: Vec<LayoutScreen>,
}

impl NavigatorLayout {
    /// Generate a layout for the given screen names
    ///
    /// An empty list uses the kind's default screens.
    pub fn generate(kind: NavigatorKind, screens: &[&str]) -> Result<Self> {
        let names: Vec<&str> = if screens.is_empty() {
            kind.default_screens().to_vec()
        } else {
            screens.to_vec()
        };

        if kind == NavigatorKind::Tabs && !(2..=5).contains(&names.len()) {
            return Err(NavigationError::TabCount(names.len()));
        }

        Ok(Self {
            kind,
            group: kind.group().to_string(),
            header_shown: false,
            screens: names.into_iter().map(|name| LayoutScreen::for_kind(kind, name)).collect(),
        })
    }

    /// The app's root stack: index, onboarding and the two groups
    pub fn root() -> Self {
        let screens = ["index", "onboarding", RouteGroup::Auth.segment(), RouteGroup::Demo.segment()]
            .into_iter()
            .map(|name| LayoutScreen {
                name: name.to_string(),
                title: String::new(),
                icon: None,
                header_shown: None,
                presentation: Presentation::Card,
            })
            .collect();

        Self { kind: NavigatorKind::Stack, group: String::new(), header_shown: false, screens }
    }

    /// Look up a screen by name
    pub fn screen(&self, name: &str) -> Option<&LayoutScreen> {
        self.screens.iter().find(|screen| screen.name == name)
    }

    /// Compute navigator chrome colors for the current theme
    pub fn styles(&self, theme: &ResolvedTheme) -> NavigatorStyles {
        NavigatorStyles {
            active_tint: theme.colors.primary.clone(),
            inactive_tint: theme.colors.text_secondary.clone(),
            background: theme.colors.card.clone(),
            border: theme.colors.border.clone(),
            header_tint: theme.colors.text.clone(),
        }
    }
}

/// Computed navigator chrome colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorStyles {
    /// Selected tab/drawer item
    pub active_tint: Color,
    /// Unselected tab/drawer item
    pub inactive_tint: Color,
    /// Bar or drawer background
    pub background: Color,
    /// Tab bar top border
    pub border: Color,
    /// Header text and icons
    pub header_tint: Color,
}

// =============================================================================
// Tests
// =============================================================================
