//! Tonal ramps: one seed color in, an 11-step [`ColorScale`] out.
//!
//! Every ramp keeps the seed's HCT hue and walks tone down a fixed table,
//! 98 at step 50 to 10 at step 950. The variants differ only in how they
//! treat chroma:
//!
//! - [`generate_ramp`] keeps the seed chroma everywhere and lets the gamut
//!   solver pull it in where the tone cannot hold it
//! - [`generate_brand_ramp`] scales chroma per step so tints stay on-brand
//! - [`generate_neutral_ramp`] drops chroma to a faint tint of the hue

use serde::Serialize;
use tonal_color::{ColorError, Hct, Rgb};
use tracing::debug;

use crate::scale::{ColorScale, ScaleStep};

/// HCT tone for each step, lightest first.
pub const TONE_MAP: [f64; 11] = [98.0, 95.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 10.0];

/// Chroma multipliers for [`generate_brand_ramp`], peaking at 500/600.
pub const BRAND_CHROMA: [f64; 11] = [0.3, 0.5, 0.7, 0.85, 0.95, 1.0, 1.0, 0.95, 0.9, 0.85, 0.8];

/// Neutral ramps never exceed this chroma.
pub const NEUTRAL_MAX_CHROMA: f64 = 6.0;

pub const ERROR_SEED: Rgb = Rgb::new(0xDC, 0x26, 0x26);
pub const WARNING_SEED: Rgb = Rgb::new(0xF5, 0x9E, 0x0B);
pub const SUCCESS_SEED: Rgb = Rgb::new(0x10, 0xB9, 0x81);

/// Target tone of `step`.
#[inline]
#[must_use]
pub const fn tone_of(step: ScaleStep) -> f64 {
    TONE_MAP[step.index()]
}

// ---------------------------------------------------------------------------
// Ramps
// ---------------------------------------------------------------------------

/// Ramp at the seed's hue and chroma, with `chroma_at` choosing the chroma
/// for each step.
fn ramp_with(seed: Hct, mut chroma_at: impl FnMut(ScaleStep) -> f64) -> ColorScale {
    ColorScale::from_fn(|step| Hct::new(seed.h, chroma_at(step), tone_of(step)).to_rgb())
}

/// Standard ramp from an already-converted seed.
#[must_use]
pub fn ramp_from_hct(seed: Hct) -> ColorScale {
    ramp_with(seed, |_| seed.c)
}

/// Standard ramp: seed hue and chroma at each table tone.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `seed` is not a hex color.
pub fn generate_ramp(seed: &str) -> Result<ColorScale, ColorError> {
    let hct = Hct::from_rgb(Rgb::from_hex(seed)?);
    debug!(seed, h = hct.h, c = hct.c, t = hct.t, "generating ramp");
    Ok(ramp_from_hct(hct))
}

/// Brand-preserving ramp: chroma scaled per step by [`BRAND_CHROMA`].
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `seed` is not a hex color.
pub fn generate_brand_ramp(seed: &str) -> Result<ColorScale, ColorError> {
    let hct = Hct::from_rgb(Rgb::from_hex(seed)?);
    Ok(ramp_with(hct, |step| hct.c * BRAND_CHROMA[step.index()]))
}

/// Near-gray ramp carrying a trace of the seed hue.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `seed` is not a hex color.
pub fn generate_neutral_ramp(seed: &str) -> Result<ColorScale, ColorError> {
    let hct = Hct::from_rgb(Rgb::from_hex(seed)?);
    let chroma = (hct.c * 0.05).min(NEUTRAL_MAX_CHROMA);
    Ok(ramp_with(hct, |_| chroma))
}

#[must_use]
pub fn error_ramp() -> ColorScale {
    ramp_from_hct(Hct::from_rgb(ERROR_SEED))
}

#[must_use]
pub fn warning_ramp() -> ColorScale {
    ramp_from_hct(Hct::from_rgb(WARNING_SEED))
}

#[must_use]
pub fn success_ramp() -> ColorScale {
    ramp_from_hct(Hct::from_rgb(SUCCESS_SEED))
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Every ramp a product theme needs, derived from one to three seeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorPalette {
    pub primary: ColorScale,
    pub secondary: ColorScale,
    pub tertiary: ColorScale,
    pub neutral: ColorScale,
    pub error: ColorScale,
    pub warning: ColorScale,
    pub success: ColorScale,
}

/// Build a [`ColorPalette`].
///
/// Without explicit seeds, secondary sits 120° round the hue wheel from the
/// primary at 0.8× chroma and tertiary 240° round at 0.6×, both at the
/// primary's tone.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if any given seed is not a hex
/// color.
pub fn generate_color_palette(
    primary: &str,
    secondary: Option<&str>,
    tertiary: Option<&str>,
) -> Result<ColorPalette, ColorError> {
    let seed = Hct::from_rgb(Rgb::from_hex(primary)?);

    let companion = |given: Option<&str>, rotate: f64, chroma: f64| -> Result<ColorScale, ColorError> {
        let hct = match given {
            Some(hex) => Hct::from_rgb(Rgb::from_hex(hex)?),
            // Re-read through RGB so the ramp starts from an in-gamut color.
            None => Hct::from_rgb(Hct::new(seed.h + rotate, seed.c * chroma, seed.t).to_rgb()),
        };
        Ok(ramp_from_hct(hct))
    };

    Ok(ColorPalette {
        primary: generate_brand_ramp(primary)?,
        secondary: companion(secondary, 120.0, 0.8)?,
        tertiary: companion(tertiary, 240.0, 0.6)?,
        neutral: generate_neutral_ramp(primary)?,
        error: error_ramp(),
        warning: warning_ramp(),
        success: success_ramp(),
    })
}

// ---------------------------------------------------------------------------
// Surfaces
// ---------------------------------------------------------------------------

/// Material 3 surface roles picked from a neutral ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceColors {
    pub surface: Rgb,
    pub surface_dim: Rgb,
    pub surface_bright: Rgb,
    pub surface_container_lowest: Rgb,
    pub surface_container_low: Rgb,
    pub surface_container: Rgb,
    pub surface_container_high: Rgb,
    pub surface_container_highest: Rgb,
}

#[must_use]
pub fn generate_surface_colors(neutral: &ColorScale, is_dark: bool) -> SurfaceColors {
    use ScaleStep::{S50, S100, S200, S300, S700, S800, S900, S950};

    if is_dark {
        SurfaceColors {
            surface: neutral[S950],
            surface_dim: neutral[S950],
            surface_bright: neutral[S800],
            surface_container_lowest: neutral[S950],
            surface_container_low: neutral[S900],
            surface_container: neutral[S900],
            surface_container_high: neutral[S800],
            surface_container_highest: neutral[S700],
        }
    } else {
        SurfaceColors {
            surface: neutral[S50],
            surface_dim: neutral[S100],
            surface_bright: neutral[S50],
            surface_container_lowest: Rgb::WHITE,
            surface_container_low: neutral[S50],
            surface_container: neutral[S100],
            surface_container_high: neutral[S200],
            surface_container_highest: neutral[S300],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tonal_color::hue_difference;

    const SEEDS: [&str; 8] = [
        "#5C6356", "#C87A5A", "#2E6B8A", "#8B4A6B", "#E07B6C", "#4F46E5", "#0D9488", "#E11D48",
    ];

    fn tones(scale: &ColorScale) -> Vec<f64> {
        scale.iter().map(|(_, c)| Hct::from_rgb(c).t).collect()
    }

    // ── Standard ramp ────────────────────────────────────────────────────

    #[test]
    fn olive_ramp_hits_table_tones() {
        let seed = Hct::from_rgb(Rgb::from_hex("#5C6356").unwrap());
        let ramp = generate_ramp("#5C6356").unwrap();

        let mid = Hct::from_rgb(ramp[ScaleStep::S500]);
        assert!((mid.t - 60.0).abs() < 1.0, "tone {}", mid.t);
        assert!(hue_difference(mid.h, seed.h) < 5.0);
        assert!((Hct::from_rgb(ramp[ScaleStep::S50]).t - 98.0).abs() < 1.0);
        assert!((Hct::from_rgb(ramp[ScaleStep::S950]).t - 10.0).abs() < 1.0);
    }

    #[test]
    fn tone_strictly_decreases() {
        for seed in SEEDS {
            let t = tones(&generate_ramp(seed).unwrap());
            assert!(t.windows(2).all(|w| w[0] > w[1]), "{seed}: {t:?}");
        }
    }

    #[test]
    fn hue_is_preserved() {
        for seed in SEEDS {
            let h = Hct::from_rgb(Rgb::from_hex(seed).unwrap()).h;
            let ramp = generate_ramp(seed).unwrap();
            // The extremes carry too little chroma for a stable hue.
            for step in &ScaleStep::ALL[1..10] {
                let got = Hct::from_rgb(ramp[*step]);
                if got.c > 5.0 {
                    assert!(hue_difference(got.h, h) < 5.0, "{seed} {step}: {} vs {h}", got.h);
                }
            }
        }
    }

    #[test]
    fn every_short_hex_seed_orders_and_keeps_hue() {
        const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
        for r in DIGITS {
            for g in DIGITS {
                for b in DIGITS {
                    let seed = format!("#{}{}{}", *r as char, *g as char, *b as char);
                    let ramp = generate_ramp(&seed).unwrap();
                    let t = tones(&ramp);
                    assert!(t.windows(2).all(|w| w[0] > w[1]), "{seed}: {t:?}");

                    let hct = Hct::from_rgb(Rgb::from_hex(&seed).unwrap());
                    if hct.c <= 10.0 {
                        continue;
                    }
                    for step in ScaleStep::ALL {
                        let got = Hct::from_rgb(ramp[step]);
                        if got.c > 6.0 {
                            assert!(hue_difference(got.h, hct.h) < 5.0, "{seed} {step}: {} vs {}", got.h, hct.h);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn ramp_is_deterministic() {
        assert_eq!(generate_ramp("#2E6B8A").unwrap(), generate_ramp("#2e6b8a").unwrap());
    }

    #[test]
    fn short_hex_seed() {
        assert_eq!(generate_ramp("#F00").unwrap(), generate_ramp("#FF0000").unwrap());
    }

    #[test]
    fn invalid_seed_is_rejected() {
        assert!(matches!(generate_ramp("#GG0000"), Err(ColorError::InvalidColorFormat(_))));
        assert!(generate_brand_ramp("12345").is_err());
        assert!(generate_neutral_ramp("").is_err());
    }

    // ── Variants ─────────────────────────────────────────────────────────

    #[test]
    fn brand_ramp_keeps_tone_table() {
        let t = tones(&generate_brand_ramp("#C87A5A").unwrap());
        for (got, want) in t.iter().zip(TONE_MAP) {
            assert!((got - want).abs() < 1.0, "{got} vs {want}");
        }
    }

    #[test]
    fn brand_ramp_mutes_tints() {
        let standard = generate_ramp("#5C6356").unwrap();
        let brand = generate_brand_ramp("#5C6356").unwrap();
        let c_std = Hct::from_rgb(standard[ScaleStep::S200]).c;
        let c_brand = Hct::from_rgb(brand[ScaleStep::S200]).c;
        assert!(c_brand < c_std - 1.0, "brand {c_brand} vs standard {c_std}");
    }

    #[test]
    fn neutral_ramp_is_low_chroma() {
        for seed in SEEDS {
            for (step, c) in generate_neutral_ramp(seed).unwrap().iter() {
                let chroma = Hct::from_rgb(c).c;
                assert!(chroma < NEUTRAL_MAX_CHROMA + 4.0, "{seed} {step}: {chroma}");
            }
        }
    }

    #[test]
    fn status_ramps_keep_their_hue() {
        for (ramp, seed) in [(error_ramp(), ERROR_SEED), (warning_ramp(), WARNING_SEED), (success_ramp(), SUCCESS_SEED)] {
            let h = Hct::from_rgb(seed).h;
            let mid = Hct::from_rgb(ramp[ScaleStep::S500]);
            assert!(hue_difference(mid.h, h) < 5.0);
        }
    }

    // ── Palette ──────────────────────────────────────────────────────────

    #[test]
    fn palette_defaults_rotate_hue() {
        let seed = Hct::from_rgb(Rgb::from_hex("#2E6B8A").unwrap());
        let palette = generate_color_palette("#2E6B8A", None, None).unwrap();

        let secondary = Hct::from_rgb(palette.secondary[ScaleStep::S500]);
        let tertiary = Hct::from_rgb(palette.tertiary[ScaleStep::S500]);
        assert!(hue_difference(secondary.h, seed.h + 120.0) < 10.0, "{}", secondary.h);
        assert!(hue_difference(tertiary.h, seed.h + 240.0) < 10.0, "{}", tertiary.h);
        assert_eq!(palette.neutral, generate_neutral_ramp("#2E6B8A").unwrap());
        assert_eq!(palette.error, error_ramp());
    }

    #[test]
    fn palette_honours_explicit_seeds() {
        let palette = generate_color_palette("#2E6B8A", Some("#C87A5A"), Some("#0D9488")).unwrap();
        assert_eq!(palette.secondary, generate_ramp("#C87A5A").unwrap());
        assert_eq!(palette.tertiary, generate_ramp("#0D9488").unwrap());
        assert!(generate_color_palette("#2E6B8A", Some("oops"), None).is_err());
    }

    // ── Surfaces ─────────────────────────────────────────────────────────

    #[test]
    fn surfaces_light_and_dark() {
        let neutral = generate_neutral_ramp("#5C6356").unwrap();
        let light = generate_surface_colors(&neutral, false);
        let dark = generate_surface_colors(&neutral, true);

        assert_eq!(light.surface_container_lowest, Rgb::WHITE);
        assert_eq!(light.surface_container_highest, neutral[ScaleStep::S300]);
        assert_eq!(dark.surface, neutral[ScaleStep::S950]);
        assert_eq!(dark.surface_container_highest, neutral[ScaleStep::S700]);
        assert!(Hct::from_rgb(light.surface).t > Hct::from_rgb(dark.surface).t);
    }
}
