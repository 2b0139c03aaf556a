// SPDX-License-Identifier: MIT
//
// Device RGB and hex strings: the I/O boundary of the color pipeline.
//
// Everything the outside world hands us (seed hex strings, decoded image
// pixels) enters as 8-bit sRGB, and everything we hand back (ramps, tokens,
// simulated colors) leaves as canonical `#RRGGBB`. Perceptual work happens
// in HCT; this module only does bit-level conversion plus the two
// gamma curves the rest of the crate needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An opaque 8-bit sRGB color.
///
/// Serializes as its canonical hex string (`"#5C6356"`), so design-token
/// documents and config files read naturally.
///
/// ```
/// use tonal_color::Rgb;
///
/// let olive: Rgb = "#5c6356".parse().unwrap();
/// assert_eq!(olive, Rgb::new(0x5C, 0x63, 0x56));
/// assert_eq!(olive.to_hex(), "#5C6356");
///
/// // Short form expands by digit doubling.
/// assert_eq!(Rgb::from_hex("fa0").unwrap(), Rgb::new(0xFF, 0xAA, 0x00));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral gray with all three channels equal.
    #[inline]
    #[must_use]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Parse `#RGB`, `#RRGGBB`, `RGB` or `RRGGBB` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] for any other shape or for
    /// non-hex digits.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        parse_hex(s).ok_or_else(|| ColorError::InvalidColorFormat(s.to_owned()))
    }

    /// Canonical uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Pack into a `0xAARRGGBB` integer with full alpha.
    #[inline]
    #[must_use]
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpack from a `0xAARRGGBB` integer, ignoring alpha.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_argb(argb: u32) -> Self {
        Self::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    /// Channels as `[r, g, b]`.
    #[inline]
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// The clustering hot loop compares distances without ever needing
    /// the square root.
    #[inline]
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }

    /// Euclidean distance in RGB space.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        f64::from(self.distance_squared(other)).sqrt()
    }

    /// WCAG 2.1 relative luminance in `[0, 1]`.
    ///
    /// Uses the WCAG transfer threshold (0.03928) and ITU-R BT.709 weights:
    ///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        let r = wcag_linear(self.r);
        let g = wcag_linear(self.g);
        let b = wcag_linear(self.b);
        0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

// ─── Transfer Functions ──────────────────────────────────────────────────────
//
// Two sRGB decodings coexist on purpose. WCAG 2.x specifies 0.03928 as the
// linear-segment threshold; the colorimetric pipeline (CAM16/HCT) uses the
// IEC 61966-2-1 value. They disagree only for channel values 10 and 11.

/// WCAG linearization of one 8-bit channel to `[0, 1]`.
#[inline]
fn wcag_linear(c: u8) -> f64 {
    let v = f64::from(c) / 255.0;
    if v <= 0.039_28 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Linearize one 8-bit sRGB channel to the `[0, 100]` scale used by the
/// CIE XYZ matrices.
#[inline]
#[must_use]
pub fn linearized(c: u8) -> f64 {
    let v = f64::from(c) / 255.0;
    let lin = if v <= 0.040_449_936 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    };
    lin * 100.0
}

/// Encode a linear `[0, 100]` component back to a gamma-corrected 8-bit
/// channel, rounding and clamping.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn delinearized(c: f64) -> u8 {
    let v = c / 100.0;
    let encoded = if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055f64.mul_add(v.powf(1.0 / 2.4), -0.055)
    };
    // clamp guarantees 0.0 <= value <= 255.0 before truncation
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Rgb> {
    let digits = s.strip_prefix('#').unwrap_or(s).as_bytes();

    match digits.len() {
        3 => {
            let r = parse_hex_digit(digits[0])?;
            let g = parse_hex_digit(digits[1])?;
            let b = parse_hex_digit(digits[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        6 => {
            let r = parse_hex_byte(&digits[0..2])?;
            let g = parse_hex_byte(&digits[2..4])?;
            let b = parse_hex_byte(&digits[4..6])?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Parsing ──────────────────────────────────────────────────────────

    #[test]
    fn parses_six_digits_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#5C6356"), Ok(Rgb::new(0x5C, 0x63, 0x56)));
        assert_eq!(Rgb::from_hex("5c6356"), Ok(Rgb::new(0x5C, 0x63, 0x56)));
    }

    #[test]
    fn expands_three_digits() {
        assert_eq!(Rgb::from_hex("#abc"), Ok(Rgb::new(0xAA, 0xBB, 0xCC)));
        assert_eq!(Rgb::from_hex("FFF"), Ok(Rgb::WHITE));
    }

    #[test]
    fn rejects_bad_length() {
        for bad in ["", "#", "#12", "#1234", "#12345", "#1234567", "#12345678"] {
            assert_eq!(
                Rgb::from_hex(bad),
                Err(ColorError::InvalidColorFormat(bad.to_owned())),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!(Rgb::from_hex("#GG0000").is_err());
        assert!(Rgb::from_hex("#12 456").is_err());
        assert!(Rgb::from_hex("##12345").is_err());
    }

    #[test]
    fn rejects_multibyte_input() {
        // Six bytes, but not six hex digits.
        assert!(Rgb::from_hex("ééé").is_err());
    }

    // ── Formatting ───────────────────────────────────────────────────────

    #[test]
    fn hex_is_uppercase_with_hash() {
        assert_eq!(Rgb::new(0xab, 0x0c, 0xff).to_hex(), "#AB0CFF");
        assert_eq!(format!("{}", Rgb::BLACK), "#000000");
        assert_eq!(format!("{:?}", Rgb::WHITE), "#FFFFFF");
    }

    #[test]
    fn argb_roundtrip() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_argb(), 0xFF12_3456);
        assert_eq!(Rgb::from_argb(0x0012_3456), c);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let c = Rgb::new(0x5C, 0x63, 0x56);
        let s = String::from(c);
        assert_eq!(s, "#5C6356");
        assert_eq!(Rgb::try_from("5c6356".to_owned()), Ok(c));
    }

    // ── Distance ─────────────────────────────────────────────────────────

    #[test]
    fn distance_between_extremes() {
        assert_eq!(Rgb::BLACK.distance_squared(Rgb::WHITE), 3 * 255 * 255);
        let d = Rgb::BLACK.distance(Rgb::WHITE);
        assert!((d - 441.672_955_9).abs() < 1e-6, "distance: {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Rgb::new(10, 200, 30);
        let b = Rgb::new(250, 5, 90);
        assert_eq!(a.distance_squared(b), b.distance_squared(a));
    }

    // ── Luminance ────────────────────────────────────────────────────────

    #[test]
    fn luminance_endpoints() {
        assert!(Rgb::BLACK.relative_luminance().abs() < 1e-12);
        assert!((Rgb::WHITE.relative_luminance() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn luminance_primaries_match_weights() {
        assert!((Rgb::new(255, 0, 0).relative_luminance() - 0.2126).abs() < 1e-9);
        assert!((Rgb::new(0, 255, 0).relative_luminance() - 0.7152).abs() < 1e-9);
        assert!((Rgb::new(0, 0, 255).relative_luminance() - 0.0722).abs() < 1e-9);
    }

    // ── Transfer functions ───────────────────────────────────────────────

    #[test]
    fn linearize_roundtrips_every_channel() {
        for v in 0..=255u8 {
            assert_eq!(delinearized(linearized(v)), v, "channel {v}");
        }
    }

    #[test]
    fn delinearize_clamps() {
        assert_eq!(delinearized(-5.0), 0);
        assert_eq!(delinearized(150.0), 255);
    }
}
