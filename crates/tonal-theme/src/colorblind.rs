//! Color vision deficiency simulation.
//!
//! Each vision type is a 3×3 matrix applied to gamma-encoded sRGB, after
//! Machado, Oliveira & Fernandes (2009). The matrices are the published
//! constants, not fitted. Output channels are rounded and clamped to
//! `[0, 255]`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tonal_color::{ColorError, Rgb};

use crate::error::ThemeError;
use crate::scale::ColorScale;

/// Default minimum RGB distance for two simulated colors to count as
/// distinguishable.
pub const DISTINGUISHABLE_THRESHOLD: f64 = 30.0;

type Matrix = [[f64; 3]; 3];

/// A model of color vision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisionType {
    Normal,
    /// Red-blind.
    Protanopia,
    /// Green-blind.
    Deuteranopia,
    /// Blue-blind.
    Tritanopia,
    /// Red-weak.
    Protanomaly,
    /// Green-weak.
    Deuteranomaly,
    /// Blue-weak.
    Tritanomaly,
    /// No color perception.
    Achromatopsia,
    /// Very weak color perception.
    Achromatomaly,
}

/// Display metadata for a [`VisionType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisionInfo {
    #[serde(rename = "type")]
    pub kind: VisionType,
    pub name: &'static str,
    pub description: &'static str,
    pub prevalence: &'static str,
}

impl VisionType {
    pub const ALL: [Self; 9] = [
        Self::Normal,
        Self::Protanopia,
        Self::Deuteranopia,
        Self::Tritanopia,
        Self::Protanomaly,
        Self::Deuteranomaly,
        Self::Tritanomaly,
        Self::Achromatopsia,
        Self::Achromatomaly,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
            Self::Protanomaly => "protanomaly",
            Self::Deuteranomaly => "deuteranomaly",
            Self::Tritanomaly => "tritanomaly",
            Self::Achromatopsia => "achromatopsia",
            Self::Achromatomaly => "achromatomaly",
        }
    }

    #[must_use]
    pub const fn info(self) -> VisionInfo {
        let (name, description, prevalence) = match self {
            Self::Normal => ("Normal vision", "Typical color vision", "~92%"),
            Self::Protanopia => ("Protanopia", "Cannot perceive red", "~1.3%"),
            Self::Deuteranopia => ("Deuteranopia", "Cannot perceive green", "~1.2%"),
            Self::Tritanopia => ("Tritanopia", "Cannot perceive blue", "~0.001%"),
            Self::Protanomaly => ("Protanomaly", "Weakened red perception", "~1.3%"),
            Self::Deuteranomaly => ("Deuteranomaly", "Weakened green perception (most common)", "~5%"),
            Self::Tritanomaly => ("Tritanomaly", "Weakened blue perception", "~0.0001%"),
            Self::Achromatopsia => ("Achromatopsia", "Sees all colors as grayscale", "~0.003%"),
            Self::Achromatomaly => ("Achromatomaly", "Very weak color perception", "~0.001%"),
        };
        VisionInfo {
            kind: self,
            name,
            description,
            prevalence,
        }
    }

    #[rustfmt::skip]
    const fn matrix(self) -> Matrix {
        match self {
            Self::Normal => [
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            Self::Protanopia => [
                [0.567, 0.433, 0.0],
                [0.558, 0.442, 0.0],
                [0.0,   0.242, 0.758],
            ],
            Self::Deuteranopia => [
                [0.625, 0.375, 0.0],
                [0.7,   0.3,   0.0],
                [0.0,   0.3,   0.7],
            ],
            Self::Tritanopia => [
                [0.95, 0.05,  0.0],
                [0.0,  0.433, 0.567],
                [0.0,  0.475, 0.525],
            ],
            Self::Protanomaly => [
                [0.817, 0.183, 0.0],
                [0.333, 0.667, 0.0],
                [0.0,   0.125, 0.875],
            ],
            Self::Deuteranomaly => [
                [0.8,   0.2,   0.0],
                [0.258, 0.742, 0.0],
                [0.0,   0.142, 0.858],
            ],
            Self::Tritanomaly => [
                [0.967, 0.033, 0.0],
                [0.0,   0.733, 0.267],
                [0.0,   0.183, 0.817],
            ],
            Self::Achromatopsia => [
                [0.299, 0.587, 0.114],
                [0.299, 0.587, 0.114],
                [0.299, 0.587, 0.114],
            ],
            Self::Achromatomaly => [
                [0.618, 0.320, 0.062],
                [0.163, 0.775, 0.062],
                [0.163, 0.320, 0.516],
            ],
        }
    }
}

impl fmt::Display for VisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for VisionType {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ThemeError::UnknownVisionType(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// How `color` appears under `vision`.
#[must_use]
pub fn simulate(color: Rgb, vision: VisionType) -> Rgb {
    if vision == VisionType::Normal {
        return color;
    }
    let m = vision.matrix();
    let [r, g, b] = color.channels().map(f64::from);
    let row = |i: usize| channel(m[i][0].mul_add(r, m[i][1].mul_add(g, m[i][2] * b)));
    Rgb::new(row(0), row(1), row(2))
}

/// Hex-in, hex-out form of [`simulate`]. Output is canonical `#RRGGBB`.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `hex` is not a hex color.
pub fn simulate_color_blindness(hex: &str, vision: VisionType) -> Result<String, ColorError> {
    Ok(simulate(Rgb::from_hex(hex)?, vision).to_hex())
}

/// Simulate every step of a ramp.
#[must_use]
pub fn simulate_scale(scale: &ColorScale, vision: VisionType) -> ColorScale {
    scale.map(|c| simulate(c, vision))
}

/// `color` under every vision type, in [`VisionType::ALL`] order.
#[must_use]
pub fn all_simulations(color: Rgb) -> [(VisionType, Rgb); 9] {
    VisionType::ALL.map(|t| (t, simulate(color, t)))
}

/// Whether `a` and `b` stay at least `threshold` apart (Euclidean RGB) once
/// both are simulated under `vision`.
#[must_use]
pub fn are_colors_distinguishable(a: Rgb, b: Rgb, vision: VisionType, threshold: f64) -> bool {
    simulate(a, vision).distance(simulate(b, vision)) >= threshold
}

// ---------------------------------------------------------------------------
// Palette audit
// ---------------------------------------------------------------------------

/// Two palette colors that collapse together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPair {
    pub color1: Rgb,
    pub color2: Rgb,
}

/// Collisions in a palette for one vision type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisionReport {
    #[serde(rename = "type")]
    pub kind: VisionType,
    pub name: &'static str,
    pub issues: Vec<ColorPair>,
}

/// For each non-normal vision type, every unordered pair of `colors` that is
/// not distinguishable at the default threshold. Pairs keep input order.
#[must_use]
pub fn generate_accessibility_report(colors: &[Rgb]) -> Vec<VisionReport> {
    VisionType::ALL
        .into_iter()
        .filter(|&t| t != VisionType::Normal)
        .map(|kind| {
            let mut issues = Vec::new();
            for (i, &a) in colors.iter().enumerate() {
                for &b in &colors[i + 1..] {
                    if !are_colors_distinguishable(a, b, kind, DISTINGUISHABLE_THRESHOLD) {
                        issues.push(ColorPair { color1: a, color2: b });
                    }
                }
            }
            VisionReport {
                kind,
                name: kind.info().name,
                issues,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
