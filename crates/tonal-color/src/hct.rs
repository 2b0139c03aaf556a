// SPDX-License-Identifier: MIT
//
// HCT: Hue, Chroma, Tone.
//
// Hue and chroma come from CAM16; tone is CIE L*. Equal tone steps look
// like equal lightness steps, and tone maps directly onto WCAG contrast,
// which is what makes tonal ramps predictable.
//
// HCT → sRGB has no closed form: for a requested (hue, chroma, tone) we
// solve for the CAM16 lightness J whose color has the right luminance,
// then back off chroma if that color falls outside sRGB. The result is
// always the in-gamut color nearest the request at the same hue and tone.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cam16::{
    Cam16, SRGB_FROM_XYZ, ViewingConditions, XYZ_FROM_CAM16RGB, lstar_from_y, mat_mul,
    sanitize_degrees, xyz_from_rgb, y_from_lstar,
};
use crate::rgb::{Rgb, delinearized};

/// A color in the HCT space.
///
/// - `h`: hue angle in degrees, `[0, 360)`
/// - `c`: chroma, `>= 0` (sRGB tops out around 150)
/// - `t`: tone, `[0, 100]` (0 = black, 100 = white)
///
/// ```
/// use tonal_color::{Hct, Rgb};
///
/// let seed = Hct::from_rgb(Rgb::new(0x5C, 0x63, 0x56));
/// let lighter = Hct::new(seed.h, seed.c, 90.0).to_rgb();
/// assert!(Hct::from_rgb(lighter).t > 89.0);
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hct {
    pub h: f64,
    pub c: f64,
    pub t: f64,
}

impl Hct {
    /// Build an HCT triple. Hue is wrapped into `[0, 360)`; chroma and tone
    /// are stored as given and clamped by [`to_rgb`](Self::to_rgb).
    #[inline]
    #[must_use]
    pub fn new(h: f64, c: f64, t: f64) -> Self {
        Self {
            h: sanitize_degrees(h),
            c,
            t,
        }
    }

    /// Measure an sRGB color.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let cam = Cam16::from_rgb(rgb);
        Self {
            h: cam.hue,
            c: cam.chroma,
            t: lstar_from_rgb(rgb),
        }
    }

    /// Resolve to the nearest displayable sRGB color.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        solve(self.h, self.c.max(0.0), self.t.clamp(0.0, 100.0))
    }

    /// Same hue and chroma at a different tone (clamped to `[0, 100]`).
    #[inline]
    #[must_use]
    pub const fn with_tone(self, t: f64) -> Self {
        Self {
            t: t.clamp(0.0, 100.0),
            ..self
        }
    }

    /// Same hue and tone at a different chroma (clamped to `>= 0`).
    #[inline]
    #[must_use]
    pub const fn with_chroma(self, c: f64) -> Self {
        Self {
            c: c.max(0.0),
            ..self
        }
    }

    /// Same chroma and tone at a different hue (wrapped).
    #[inline]
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: sanitize_degrees(h),
            ..self
        }
    }
}

impl fmt::Debug for Hct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hct({:.1}, {:.1}, {:.1})", self.h, self.c, self.t)
    }
}

impl From<Rgb> for Hct {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}

/// Shortest angular distance between two hues, in degrees.
#[inline]
#[must_use]
pub fn hue_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// CIE L* of an sRGB color, the T in HCT.
#[must_use]
pub fn lstar_from_rgb(rgb: Rgb) -> f64 {
    lstar_from_y(xyz_from_rgb(rgb)[1])
}

/// The neutral gray at a given L*.
#[must_use]
pub fn rgb_from_lstar(lstar: f64) -> Rgb {
    Rgb::gray(delinearized(y_from_lstar(lstar)))
}

// ─── Solver ──────────────────────────────────────────────────────────────────

/// Number of halvings when searching for the largest in-gamut chroma.
const CHROMA_BISECTIONS: u32 = 24;

fn solve(hue: f64, chroma: f64, tone: f64) -> Rgb {
    if chroma < 1e-4 || tone < 1e-4 || tone > 99.9999 {
        return rgb_from_lstar(tone);
    }

    let hue_radians = sanitize_degrees(hue).to_radians();
    let y = y_from_lstar(tone);

    if let Some(rgb) = find_by_j(hue_radians, chroma, y) {
        return rgb;
    }

    // Out of gamut: keep hue and tone, give up chroma.
    let mut lo = 0.0;
    let mut hi = chroma;
    let mut best = None;
    for _ in 0..CHROMA_BISECTIONS {
        let mid = (lo + hi) * 0.5;
        match find_by_j(hue_radians, mid, y) {
            Some(rgb) => {
                best = Some(rgb);
                lo = mid;
            }
            None => hi = mid,
        }
    }
    trace!(hue, chroma, tone, reachable = lo, "chroma reduced into sRGB gamut");

    best.unwrap_or_else(|| rgb_from_lstar(tone))
}

/// Newton-style iteration on CAM16 J until the color's luminance matches
/// `y`. Returns `None` when the color at this hue/chroma leaves sRGB.
fn find_by_j(hue_radians: f64, chroma: f64, y: f64) -> Option<Rgb> {
    let vc = ViewingConditions::standard();

    let t_inner = 1.0 / (1.64 - 0.29f64.powf(vc.n)).powf(0.73);
    let e_hue = 0.25 * ((hue_radians + 2.0).cos() + 3.8);
    let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
    let (h_sin, h_cos) = hue_radians.sin_cos();

    let mut j = y.sqrt() * 11.0;

    for round in 0..5 {
        let j_norm = j / 100.0;
        let alpha = if chroma == 0.0 || j == 0.0 {
            0.0
        } else {
            chroma / j_norm.sqrt()
        };
        let t = (alpha * t_inner).powf(1.0 / 0.9);
        let ac = vc.aw * j_norm.powf(1.0 / vc.c / vc.z);
        let p2 = ac / vc.nbb;

        let gamma = 23.0 * (p2 + 0.305) * t
            / (23.0f64.mul_add(p1, 11.0 * t * h_cos) + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;

        let r_a = (460.0f64.mul_add(p2, 451.0 * a) + 288.0 * b) / 1403.0;
        let g_a = (460.0f64.mul_add(p2, -891.0 * a) - 261.0 * b) / 1403.0;
        let b_a = (460.0f64.mul_add(p2, -220.0 * a) - 6300.0 * b) / 1403.0;

        let adapted = [r_a, g_a, b_a];
        let cone = [0, 1, 2].map(|i| inverse_adapt(adapted[i], vc.fl) / vc.rgb_d[i]);

        let xyz = mat_mul(&XYZ_FROM_CAM16RGB, cone);
        let linrgb = mat_mul(&SRGB_FROM_XYZ, xyz);
        if linrgb.iter().any(|&v| v < 0.0) {
            return None;
        }

        let fnj = xyz[1];
        if fnj <= 0.0 {
            return None;
        }

        if round == 4 || (fnj - y).abs() < 0.002 {
            if linrgb.iter().any(|&v| v > 100.01) {
                return None;
            }
            return Some(Rgb::new(
                delinearized(linrgb[0]),
                delinearized(linrgb[1]),
                delinearized(linrgb[2]),
            ));
        }

        // Y grows roughly with J², so step by half the relative error.
        j -= (fnj - y) * j / (2.0 * fnj);
    }

    None
}

/// Undo the CAM16 post-adaptation nonlinearity for one channel.
#[inline]
fn inverse_adapt(adapted: f64, fl: f64) -> f64 {
    let abs = adapted.abs();
    let base = (27.13 * abs / (400.0 - abs)).max(0.0);
    adapted.signum() * (100.0 / fl) * base.powf(1.0 / 0.42)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
