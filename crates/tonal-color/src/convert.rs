// SPDX-License-Identifier: MIT
//
// String-level conversions: the hex-in, hex-out surface used by the
// ramp, theme and accessibility layers.

use crate::error::ColorError;
use crate::hct::Hct;
use crate::rgb::Rgb;

/// Measure a hex color in HCT.
///
/// # Errors
///
/// [`ColorError::InvalidColorFormat`] if `hex` is not `#RGB`/`#RRGGBB`.
pub fn hex_to_hct(hex: &str) -> Result<Hct, ColorError> {
    Ok(Hct::from_rgb(Rgb::from_hex(hex)?))
}

/// Resolve an HCT triple to canonical `#RRGGBB`, gamut-mapping as needed.
#[must_use]
pub fn hct_to_hex(hct: Hct) -> String {
    hct.to_rgb().to_hex()
}

/// Parse a hex color to 8-bit channels.
///
/// # Errors
///
/// [`ColorError::InvalidColorFormat`] for malformed input.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    Rgb::from_hex(hex)
}

/// Canonical `#RRGGBB` for 8-bit channels.
#[must_use]
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_hex()
}

/// Measure 8-bit channels in HCT.
#[must_use]
pub fn rgb_to_hct(rgb: Rgb) -> Hct {
    Hct::from_rgb(rgb)
}

/// Whether `hex` is a 3- or 6-digit hex color, with or without `#`.
#[must_use]
pub fn is_valid_hex(hex: &str) -> bool {
    Rgb::from_hex(hex).is_ok()
}

/// Replace the tone of a color (clamped to `[0, 100]`), keeping its hue
/// and chroma.
///
/// # Errors
///
/// [`ColorError::InvalidColorFormat`] for malformed input.
pub fn adjust_tone(hex: &str, target_tone: f64) -> Result<String, ColorError> {
    Ok(hct_to_hex(hex_to_hct(hex)?.with_tone(target_tone)))
}

/// Replace the chroma of a color (clamped to `>= 0`), keeping its hue and
/// tone.
///
/// # Errors
///
/// [`ColorError::InvalidColorFormat`] for malformed input.
pub fn adjust_chroma(hex: &str, target_chroma: f64) -> Result<String, ColorError> {
    Ok(hct_to_hex(hex_to_hct(hex)?.with_chroma(target_chroma)))
}

/// WCAG relative luminance of a hex color, in `[0, 1]`.
///
/// # Errors
///
/// [`ColorError::InvalidColorFormat`] for malformed input.
pub fn luminance(hex: &str) -> Result<f64, ColorError> {
    Ok(Rgb::from_hex(hex)?.relative_luminance())
}

/// Whether a color sits in the upper half of the tone range (`T > 50`).
///
/// # Errors
///
/// [`ColorError::InvalidColorFormat`] for malformed input.
pub fn is_light_color(hex: &str) -> Result<bool, ColorError> {
    Ok(hex_to_hct(hex)?.t > 50.0)
}
