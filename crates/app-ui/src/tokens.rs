//! Design tokens
//!
//! Spacing, typography, radius and shadow scales shared by both color modes.

use serde::{Deserialize, Serialize};

// =============================================================================
// Spacing Tokens
// =============================================================================

/// Spacing scale in points
pub mod spacing {
    /// 4pt
    pub const XS: f32 = 4.0;
    /// 8pt
    pub const SM: f32 = 8.0;
    /// 16pt
    pub const MD: f32 = 16.0;
    /// 24pt
    pub const LG: f32 = 24.0;
    /// 32pt
    pub const XL: f32 = 32.0;
    /// 48pt
    pub const XXL: f32 = 48.0;

    /// Get spacing value by name
    pub fn get(name: &str) -> Option<f32> {
        match name {
            "xs" => Some(XS),
            "sm" => Some(SM),
            "md" => Some(MD),
            "lg" => Some(LG),
            "xl" => Some(XL),
            "xxl" => Some(XXL),
            _ => None,
        }
    }
}

// =============================================================================
// Typography Tokens
// =============================================================================

/// Font sizes in points
pub mod font_size {
    /// 12pt
    pub const XS: f32 = 12.0;
    /// 14pt
    pub const SM: f32 = 14.0;
    /// 16pt
    pub const MD: f32 = 16.0;
    /// 18pt
    pub const LG: f32 = 18.0;
    /// 20pt
    pub const XL: f32 = 20.0;
    /// 24pt
    pub const XXL: f32 = 24.0;
    /// 32pt
    pub const XXXL: f32 = 32.0;
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// 400
    #[default]
    Regular,
    /// 500
    Medium,
    /// 600
    Semibold,
    /// 700
    Bold,
}

impl FontWeight {
    /// Numeric CSS-style weight
    pub fn value(&self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

// =============================================================================
// Border Radius Tokens
// =============================================================================

/// Border radius tokens
pub mod radius {
    /// 4pt
    pub const SM: f32 = 4.0;
    /// 8pt
    pub const MD: f32 = 8.0;
    /// 12pt
    pub const LG: f32 = 12.0;
    /// 16pt
    pub const XL: f32 = 16.0;
    /// Fully rounded
    pub const FULL: f32 = 9999.0;
}

// =============================================================================
// Shadow Tokens
// =============================================================================

/// Drop shadow, in the host toolkit's native terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    /// Shadow color
    pub color: String,
    /// Horizontal offset
    pub offset_x: f32,
    /// Vertical offset
    pub offset_y: f32,
    /// Opacity, 0 to 1
    pub opacity: f32,
    /// Blur radius
    pub radius: f32,
    /// Android elevation
    pub elevation: u8,
}

impl Shadow {
    /// Create a black shadow with a vertical offset
    pub fn new(offset_y: f32, opacity: f32, radius: f32, elevation: u8) -> Self {
        Self {
            color: "#000".to_string(),
            offset_x: 0.0,
            offset_y,
            opacity,
            radius,
            elevation,
        }
    }
}

/// Shadow presets
pub mod shadows {
    use super::Shadow;

    /// Small shadow
    pub fn sm() -> Shadow {
        Shadow::new(1.0, 0.05, 2.0, 1)
    }

    /// Medium shadow
    pub fn md() -> Shadow {
        Shadow::new(2.0, 0.1, 4.0, 2)
    }

    /// Large shadow
    pub fn lg() -> Shadow {
        Shadow::new(4.0, 0.15, 8.0, 4)
    }

    /// Floating toast shadow
    pub fn toast() -> Shadow {
        Shadow::new(4.0, 0.3, 8.0, 8)
    }
}
