//! Light and dark semantic themes composed from a ramp.
//!
//! Backgrounds, text and status colors are fixed; only the surface tint,
//! border accent and primary states come from the seed. The dark ramp is
//! the light ramp read backwards, so both modes share exact hex values.

use serde::Serialize;
use tonal_color::{ColorError, Rgb};

use crate::ramp::generate_ramp;
use crate::scale::{ColorScale, ScaleStep};

const fn hex(v: u32) -> Rgb {
    Rgb::from_argb(v)
}

/// Named theme roles, one color each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTokens {
    pub background: Rgb,
    pub background_alt: Rgb,

    pub surface: Rgb,
    pub surface_alt: Rgb,
    pub surface_hover: Rgb,

    pub border: Rgb,
    pub border_alt: Rgb,

    pub text_primary: Rgb,
    pub text_secondary: Rgb,
    pub text_muted: Rgb,
    pub text_inverse: Rgb,

    pub primary: Rgb,
    pub primary_hover: Rgb,
    pub primary_active: Rgb,
    pub on_primary: Rgb,

    pub success: Rgb,
    pub warning: Rgb,
    pub error: Rgb,
    pub info: Rgb,
}

impl SemanticTokens {
    /// `(camelCase name, color)` in declaration order.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, Rgb); 19] {
        [
            ("background", self.background),
            ("backgroundAlt", self.background_alt),
            ("surface", self.surface),
            ("surfaceAlt", self.surface_alt),
            ("surfaceHover", self.surface_hover),
            ("border", self.border),
            ("borderAlt", self.border_alt),
            ("textPrimary", self.text_primary),
            ("textSecondary", self.text_secondary),
            ("textMuted", self.text_muted),
            ("textInverse", self.text_inverse),
            ("primary", self.primary),
            ("primaryHover", self.primary_hover),
            ("primaryActive", self.primary_active),
            ("onPrimary", self.on_primary),
            ("success", self.success),
            ("warning", self.warning),
            ("error", self.error),
            ("info", self.info),
        ]
    }
}

/// Relabel a light ramp for dark mode: 50↔950, 100↔900, … 500 stays.
///
/// Applying it twice gives back the input.
#[must_use]
pub fn dark_color_scale(light: &ColorScale) -> ColorScale {
    ColorScale::from_fn(|step| light[step.mirrored()])
}

#[must_use]
pub fn light_semantic_tokens(scale: &ColorScale) -> SemanticTokens {
    SemanticTokens {
        background: Rgb::WHITE,
        background_alt: hex(0xFA_FAFA),

        surface: Rgb::WHITE,
        surface_alt: scale[ScaleStep::S50],
        surface_hover: scale[ScaleStep::S100],

        border: hex(0xE5_E5E5),
        border_alt: scale[ScaleStep::S200],

        text_primary: hex(0x1A_1A1A),
        text_secondary: hex(0x66_6666),
        text_muted: hex(0x99_9999),
        text_inverse: Rgb::WHITE,

        primary: scale[ScaleStep::S500],
        primary_hover: scale[ScaleStep::S600],
        primary_active: scale[ScaleStep::S700],
        on_primary: Rgb::WHITE,

        success: hex(0x10_B981),
        warning: hex(0xF5_9E0B),
        error: hex(0xEF_4444),
        info: hex(0x3B_82F6),
    }
}

/// Dark tokens. Primary uses the lighter end of `dark_scale` so it reads on
/// near-black.
#[must_use]
pub fn dark_semantic_tokens(dark_scale: &ColorScale) -> SemanticTokens {
    SemanticTokens {
        background: hex(0x0A_0A0A),
        background_alt: hex(0x11_1111),

        surface: hex(0x1A_1A1A),
        surface_alt: hex(0x22_2222),
        surface_hover: hex(0x2A_2A2A),

        border: hex(0x33_3333),
        border_alt: hex(0x44_4444),

        text_primary: Rgb::WHITE,
        text_secondary: hex(0xA0_A0A0),
        text_muted: hex(0x66_6666),
        text_inverse: hex(0x1A_1A1A),

        primary: dark_scale[ScaleStep::S400],
        primary_hover: dark_scale[ScaleStep::S300],
        primary_active: dark_scale[ScaleStep::S200],
        on_primary: hex(0x1A_1A1A),

        success: hex(0x34_D399),
        warning: hex(0xFB_BF24),
        error: hex(0xF8_7171),
        info: hex(0x60_A5FA),
    }
}

/// A seed's full theme: both token sets and both ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePalette {
    pub light: SemanticTokens,
    pub dark: SemanticTokens,
    pub color_scale: ColorScale,
    pub dark_color_scale: ColorScale,
}

impl ThemePalette {
    #[must_use]
    pub fn from_scale(color_scale: ColorScale) -> Self {
        let dark_color_scale = dark_color_scale(&color_scale);
        Self {
            light: light_semantic_tokens(&color_scale),
            dark: dark_semantic_tokens(&dark_color_scale),
            color_scale,
            dark_color_scale,
        }
    }
}

/// Ramp the seed and compose both themes from it.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `seed` is not a hex color.
pub fn generate_theme_palette(seed: &str) -> Result<ThemePalette, ColorError> {
    Ok(ThemePalette::from_scale(generate_ramp(seed)?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
