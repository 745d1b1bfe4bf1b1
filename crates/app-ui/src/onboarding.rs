//! Onboarding pager
//!
//! Three slides, a skip action and a finish action. Finishing marks
//! onboarding as completed and replaces the current route with sign-in.

use crate::components::Button;
use crate::navigation::{Navigator, Route};
use crate::theme::{Color, ResolvedTheme};
use app_state::OnboardingStore;
use serde::{Deserialize, Serialize};

/// Width of the current page's dot
pub const ACTIVE_DOT_WIDTH: f32 = 24.0;
/// Width of the other dots
pub const DOT_WIDTH: f32 = 8.0;
/// Dot height
pub const DOT_HEIGHT: f32 = 8.0;
/// Share of a slide that must be on screen to count as current, in percent
pub const VISIBLE_THRESHOLD_PERCENT: f32 = 50.0;

/// Skip link label
pub const SKIP_LABEL: &str = "Passer";
/// Next button label
pub const NEXT_LABEL: &str = "Suivant";
/// Last-page button label
pub const START_LABEL: &str = "Commencer";

/// Accent color slot of a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideAccent {
    /// Primary color
    Primary,
    /// Secondary color
    Secondary,
    /// Success color
    Success,
}

impl SlideAccent {
    fn color(&self, theme: &ResolvedTheme) -> Color {
        match self {
            SlideAccent::Primary => theme.colors.primary.clone(),
            SlideAccent::Secondary => theme.colors.secondary.clone(),
            SlideAccent::Success => theme.colors.success.clone(),
        }
    }
}

/// One onboarding slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Stable key
    pub id: String,
    /// Headline
    pub title: String,
    /// Body text
    pub description: String,
    /// Icon name
    pub icon: String,
    /// Accent color slot
    pub accent: SlideAccent,
}

impl Slide {
    fn new(id: &str, title: &str, description: &str, icon: &str, accent: SlideAccent) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            accent,
        }
    }
}

/// The starter's slides
pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide::new(
            "1",
            "Bienvenue sur Jurici",
            "Découvrez une nouvelle façon de gérer vos projets avec simplicité et efficacité.",
            "sparkles",
            SlideAccent::Primary,
        ),
        Slide::new(
            "2",
            "Sécurité maximale",
            "Vos données sont protégées avec les dernières technologies de sécurité.",
            "shield",
            SlideAccent::Secondary,
        ),
        Slide::new(
            "3",
            "Performance optimale",
            "Interface rapide et fluide pour une expérience utilisateur exceptionnelle.",
            "zap",
            SlideAccent::Success,
        ),
    ]
}

/// Result of pressing "next"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStep {
    /// Moved to this page
    Advanced(usize),
    /// Already on the last page
    Finish,
}

/// A pagination dot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    /// Dot width
    pub width: f32,
    /// Dot color
    pub color: Color,
}

/// Onboarding pager state
#[derive(Debug, Clone)]
pub struct OnboardingPager {
    slides: Vec<Slide>,
    current: usize,
}

impl OnboardingPager {
    /// Pager over the starter's slides
    pub fn new() -> Self {
        Self::with_slides(default_slides())
    }

    /// Pager over custom slides
    pub fn with_slides(slides: Vec<Slide>) -> Self {
        Self { slides, current: 0 }
    }

    /// All slides
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Current page index
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Current slide
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    /// Check whether the current page is the last one
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.slides.len()
    }

    /// Advance one page, or report that the pager should finish
    pub fn next(&mut self) -> PagerStep {
        if self.is_last() {
            PagerStep::Finish
        } else {
            self.current += 1;
            PagerStep::Advanced(self.current)
        }
    }

    /// Record the page the user scrolled to
    pub fn on_page_visible(&mut self, index: usize) {
        if index < self.slides.len() {
            self.current = index;
        }
    }

    /// Complete onboarding and leave for sign-in
    ///
    /// Used by both the skip link and the last page's button.
    pub fn finish(&self, onboarding: &OnboardingStore, navigator: &Navigator) {
        onboarding.complete();
        navigator.replace(Route::SignIn);
    }

    /// Pagination dots for the current page
    pub fn dots(&self, theme: &ResolvedTheme) -> Vec<Dot> {
        (0..self.slides.len())
            .map(|index| {
                if index == self.current {
                    Dot { width: ACTIVE_DOT_WIDTH, color: theme.colors.primary.clone() }
                } else {
                    Dot { width: DOT_WIDTH, color: theme.colors.border.clone() }
                }
            })
            .collect()
    }

    /// Accent color of the current slide
    pub fn accent_color(&self, theme: &ResolvedTheme) -> Option<Color> {
        self.current_slide().map(|slide| slide.accent.color(theme))
    }

    /// Footer actions: skip and next, or a single full-width start button
    pub fn footer(&self) -> OnboardingFooter {
        if self.is_last() {
            OnboardingFooter {
                show_skip: false,
                button: Button::new(START_LABEL).full_width(true).on_press("onboarding:finish"),
            }
        } else {
            OnboardingFooter {
                show_skip: true,
                button: Button::new(NEXT_LABEL).with_icon("chevron-right").on_press("onboarding:next"),
            }
        }
    }
}

impl Default for OnboardingPager {
    fn default() -> Self {
        Self::new()
    }
}

/// Footer layout
#[derive(Debug, Clone)]
pub struct OnboardingFooter {
    /// Whether the skip link is shown
    pub show_skip: bool,
    /// Primary action
    pub button: Button,
}
