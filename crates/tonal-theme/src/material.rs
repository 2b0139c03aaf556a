// SPDX-License-Identifier: MIT
//! Material 3 color roles at fixed tones of the seed hue.

use serde::Serialize;
use tonal_color::{ColorError, Hct, Rgb};

/// Hue of the error role, independent of the seed.
const ERROR_HUE: f64 = 25.0;
const ERROR_CHROMA: f64 = 84.0;

/// Material role colors for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialScheme {
    pub primary: Rgb,
    pub on_primary: Rgb,
    pub primary_container: Rgb,
    pub on_primary_container: Rgb,
    pub secondary: Rgb,
    pub on_secondary: Rgb,
    pub secondary_container: Rgb,
    pub on_secondary_container: Rgb,
    pub surface: Rgb,
    pub on_surface: Rgb,
    pub background: Rgb,
    pub on_background: Rgb,
    pub outline: Rgb,
    pub error: Rgb,
    pub on_error: Rgb,
}

/// Tones for one mode, in field order.
struct Tones {
    primary: [f64; 4],
    surface: [f64; 2],
    background: [f64; 2],
    outline: f64,
    error: f64,
    on_error: Option<f64>,
}

const LIGHT: Tones = Tones {
    primary: [40.0, 100.0, 90.0, 10.0],
    surface: [98.0, 10.0],
    background: [99.0, 10.0],
    outline: 50.0,
    error: 40.0,
    on_error: None,
};

const DARK: Tones = Tones {
    primary: [80.0, 20.0, 30.0, 90.0],
    surface: [10.0, 90.0],
    background: [6.0, 90.0],
    outline: 60.0,
    error: 80.0,
    on_error: Some(20.0),
};

impl MaterialScheme {
    /// Light scheme for `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] if `seed` is not a hex color.
    pub fn light(seed: &str) -> Result<Self, ColorError> {
        Ok(Self::build(Hct::from_rgb(Rgb::from_hex(seed)?), &LIGHT))
    }

    /// Dark scheme for `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] if `seed` is not a hex color.
    pub fn dark(seed: &str) -> Result<Self, ColorError> {
        Ok(Self::build(Hct::from_rgb(Rgb::from_hex(seed)?), &DARK))
    }

    fn build(seed: Hct, tones: &Tones) -> Self {
        let h = seed.h;
        let at = |c: f64, t: f64| Hct::new(h, c, t).to_rgb();
        let muted = (seed.c * 0.3).max(8.0);
        let [p, on_p, pc, on_pc] = tones.primary;

        Self {
            primary: at(seed.c, p),
            on_primary: at(seed.c, on_p),
            primary_container: at(seed.c, pc),
            on_primary_container: at(seed.c, on_pc),
            secondary: at(muted, p),
            on_secondary: at(muted, on_p),
            secondary_container: at(muted, pc),
            on_secondary_container: at(muted, on_pc),
            surface: at(4.0, tones.surface[0]),
            on_surface: at(4.0, tones.surface[1]),
            background: at(2.0, tones.background[0]),
            on_background: at(4.0, tones.background[1]),
            outline: at(8.0, tones.outline),
            error: Hct::new(ERROR_HUE, ERROR_CHROMA, tones.error).to_rgb(),
            on_error: tones
                .on_error
                .map_or(Rgb::WHITE, |t| Hct::new(ERROR_HUE, ERROR_CHROMA, t).to_rgb()),
        }
    }

    /// `(camelCase name, color)` in declaration order.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, Rgb); 15] {
        [
            ("primary", self.primary),
            ("onPrimary", self.on_primary),
            ("primaryContainer", self.primary_container),
            ("onPrimaryContainer", self.on_primary_container),
            ("secondary", self.secondary),
            ("onSecondary", self.on_secondary),
            ("secondaryContainer", self.secondary_container),
            ("onSecondaryContainer", self.on_secondary_container),
            ("surface", self.surface),
            ("onSurface", self.on_surface),
            ("background", self.background),
            ("onBackground", self.on_background),
            ("outline", self.outline),
            ("error", self.error),
            ("onError", self.on_error),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::contrast_ratio;
    use pretty_assertions::assert_eq;
    use tonal_color::hue_difference;

    fn tone(c: Rgb) -> f64 {
        Hct::from_rgb(c).t
    }

    #[test]
    fn light_scheme_tones() {
        let s = MaterialScheme::light("#2E6B8A").unwrap();
        assert!((tone(s.primary) - 40.0).abs() < 1.0);
        assert_eq!(s.on_primary, Rgb::WHITE);
        assert!((tone(s.primary_container) - 90.0).abs() < 1.0);
        assert!((tone(s.background) - 99.0).abs() < 1.0);
        assert_eq!(s.on_error, Rgb::WHITE);
    }

    #[test]
    fn dark_scheme_tones() {
        let s = MaterialScheme::dark("#2E6B8A").unwrap();
        assert!((tone(s.primary) - 80.0).abs() < 1.0);
        assert!((tone(s.on_primary) - 20.0).abs() < 1.0);
        assert!((tone(s.background) - 6.0).abs() < 1.0);
        assert!((tone(s.on_error) - 20.0).abs() < 1.0);
    }

    #[test]
    fn primary_keeps_seed_hue() {
        let seed = Hct::from_rgb(Rgb::from_hex("#C87A5A").unwrap());
        let s = MaterialScheme::light("#C87A5A").unwrap();
        assert!(hue_difference(Hct::from_rgb(s.primary).h, seed.h) < 5.0);
    }

    #[test]
    fn secondary_is_muted() {
        let s = MaterialScheme::light("#E11D48").unwrap();
        assert!(Hct::from_rgb(s.secondary).c < Hct::from_rgb(s.primary).c);
    }

    #[test]
    fn on_roles_are_readable() {
        for seed in ["#5C6356", "#4F46E5", "#0D9488"] {
            for s in [MaterialScheme::light(seed).unwrap(), MaterialScheme::dark(seed).unwrap()] {
                assert!(contrast_ratio(s.primary, s.on_primary) >= 4.5, "{seed}");
                assert!(contrast_ratio(s.surface, s.on_surface) >= 4.5, "{seed}");
            }
        }
    }

    #[test]
    fn error_role_is_red() {
        let s = MaterialScheme::light("#0D9488").unwrap();
        assert!(hue_difference(Hct::from_rgb(s.error).h, ERROR_HUE) < 5.0);
    }
}
