// SPDX-License-Identifier: MIT
//
// CAM16 color appearance model, the perceptual engine behind HCT.
//
// CAM16 predicts how a color *looks* (hue, colorfulness, lightness) under
// given viewing conditions. HCT keeps CAM16's hue and chroma and replaces
// its lightness J with CIE L*, which tracks measured contrast better.
//
// Pipeline (forward):
//
//   sRGB ─linearize→ XYZ ─M16→ cone RGB ─adapt→ post-adaptation RGB ─→ a, b, J
//
// The inverse runs the same steps backwards and lives in `hct.rs`, where
// the solver iterates on J to hit a target L*.
//
// Reference: Li et al., "Comprehensive color solutions: CAM16, CAT16, and
// CAM16-UCS" (2017), with the default viewing conditions used by Material
// Design 3.

use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::rgb::{Rgb, linearized};

// ─── Matrices ────────────────────────────────────────────────────────────────

/// Linear sRGB (0–100) → CIE XYZ, D65.
pub(crate) const XYZ_FROM_SRGB: [[f64; 3]; 3] = [
    [0.412_338_95, 0.357_620_64, 0.180_510_42],
    [0.2126, 0.7152, 0.0722],
    [0.019_321_41, 0.119_163_82, 0.950_344_78],
];

/// CIE XYZ → linear sRGB (0–100), D65.
pub(crate) const SRGB_FROM_XYZ: [[f64; 3]; 3] = [
    [3.241_377_479_238_868_5, -1.537_665_240_285_185_1, -0.498_853_668_462_680_53],
    [-0.969_145_251_300_532_1, 1.875_885_345_106_787_2, 0.041_565_856_169_120_61],
    [0.055_620_936_896_913_05, -0.203_955_245_647_421_23, 1.057_179_911_122_033_5],
];

/// CAT16 forward: XYZ → sharpened cone responses.
const CAM16RGB_FROM_XYZ: [[f64; 3]; 3] = [
    [0.401_288, 0.650_173, -0.051_461],
    [-0.250_268, 1.204_414, 0.045_854],
    [-0.002_079, 0.048_952, 0.953_127],
];

/// CAT16 inverse: sharpened cone responses → XYZ.
pub(crate) const XYZ_FROM_CAM16RGB: [[f64; 3]; 3] = [
    [1.862_067_86, -1.011_254_63, 0.149_186_77],
    [0.387_526_54, 0.621_447_44, -0.008_973_98],
    [-0.015_841_50, -0.034_122_94, 1.049_964_44],
];

/// D65 white point, Y normalized to 100.
pub const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

#[inline]
pub(crate) fn mat_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][2].mul_add(v[2], m[0][0].mul_add(v[0], m[0][1] * v[1])),
        m[1][2].mul_add(v[2], m[1][0].mul_add(v[0], m[1][1] * v[1])),
        m[2][2].mul_add(v[2], m[2][0].mul_add(v[0], m[2][1] * v[1])),
    ]
}

// ─── L* ──────────────────────────────────────────────────────────────────────

const LAB_E: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_E {
        t.cbrt()
    } else {
        LAB_KAPPA.mul_add(t, 16.0) / 116.0
    }
}

#[inline]
fn lab_inv_f(ft: f64) -> f64 {
    let ft3 = ft * ft * ft;
    if ft3 > LAB_E {
        ft3
    } else {
        116.0f64.mul_add(ft, -16.0) / LAB_KAPPA
    }
}

/// CIE L* (0–100) from relative luminance Y (0–100).
#[inline]
#[must_use]
pub fn lstar_from_y(y: f64) -> f64 {
    116.0f64.mul_add(lab_f(y / 100.0), -16.0)
}

/// Relative luminance Y (0–100) from CIE L* (0–100).
#[inline]
#[must_use]
pub fn y_from_lstar(lstar: f64) -> f64 {
    100.0 * lab_inv_f((lstar + 16.0) / 116.0)
}

/// CIE XYZ of an sRGB color.
#[must_use]
pub fn xyz_from_rgb(rgb: Rgb) -> [f64; 3] {
    let lin = [linearized(rgb.r), linearized(rgb.g), linearized(rgb.b)];
    mat_mul(&XYZ_FROM_SRGB, lin)
}

// ─── Viewing Conditions ──────────────────────────────────────────────────────

/// Environment parameters for CAM16, precomputed once.
///
/// Only the default environment (sRGB display, mid-gray surround, D65) is
/// used by the pipeline; the constructor stays public so callers can model
/// other surrounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewingConditions {
    pub n: f64,
    pub aw: f64,
    pub nbb: f64,
    pub ncb: f64,
    pub c: f64,
    pub nc: f64,
    pub rgb_d: [f64; 3],
    pub fl: f64,
    pub fl_root: f64,
    pub z: f64,
}

static STANDARD: LazyLock<ViewingConditions> = LazyLock::new(|| {
    let adapting_luminance = (200.0 / PI) * y_from_lstar(50.0) / 100.0;
    ViewingConditions::new(WHITE_POINT_D65, adapting_luminance, 50.0, 2.0, false)
});

impl ViewingConditions {
    /// Build viewing conditions.
    ///
    /// - `white_point`: XYZ of the adopted white
    /// - `adapting_luminance`: luminance of the adapting field, cd/m²
    /// - `background_lstar`: L* of the background
    /// - `surround`: 0 (dark) to 2 (average)
    /// - `discounting`: whether the illuminant is fully discounted
    #[must_use]
    pub fn new(
        white_point: [f64; 3],
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting: bool,
    ) -> Self {
        let background_lstar = background_lstar.max(0.1);
        let rgb_w = mat_mul(&CAM16RGB_FROM_XYZ, white_point);

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };
        let degree = if discounting {
            1.0
        } else {
            f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())
        };
        let d = degree.clamp(0.0, 1.0);
        let nc = f;
        let rgb_d = rgb_w.map(|w| d * (100.0 / w) + 1.0 - d);

        let k = 1.0 / 5.0f64.mul_add(adapting_luminance, 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = (0.1 * k4f * k4f).mul_add((5.0 * adapting_luminance).cbrt(), k4 * adapting_luminance);

        let n = y_from_lstar(background_lstar) / white_point[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let rgb_a = [0, 1, 2].map(|i| {
            let factor = (fl * rgb_d[i] * rgb_w[i] / 100.0).powf(0.42);
            400.0 * factor / (factor + 27.13)
        });
        let aw = 0.05f64.mul_add(rgb_a[2], 2.0f64.mul_add(rgb_a[0], rgb_a[1])) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb,
            c,
            nc,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }

    /// The default sRGB viewing environment.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a).mul_add(t, a)
}

// ─── Cam16 ───────────────────────────────────────────────────────────────────

/// The CAM16 correlates HCT needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cam16 {
    /// Hue angle in degrees, `[0, 360)`.
    pub hue: f64,
    /// Chroma (colorfulness relative to the white).
    pub chroma: f64,
    /// Lightness J, `[0, 100]`.
    pub j: f64,
}

impl Cam16 {
    /// Compute CAM16 correlates of an sRGB color under standard conditions.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self::from_xyz(xyz_from_rgb(rgb), ViewingConditions::standard())
    }

    /// Compute CAM16 correlates of an XYZ color under `vc`.
    #[must_use]
    pub fn from_xyz(xyz: [f64; 3], vc: &ViewingConditions) -> Self {
        let rgb_c = mat_mul(&CAM16RGB_FROM_XYZ, xyz);
        let [r_a, g_a, b_a] = [0, 1, 2].map(|i| {
            let d = vc.rgb_d[i] * rgb_c[i];
            let af = (vc.fl * d.abs() / 100.0).powf(0.42);
            d.signum() * 400.0 * af / (af + 27.13)
        });

        // Opponent color dimensions.
        let a = (11.0f64.mul_add(r_a, -12.0 * g_a) + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        let u = (20.0f64.mul_add(r_a, 20.0 * g_a) + 21.0 * b_a) / 20.0;
        let p2 = (40.0f64.mul_add(r_a, 20.0 * g_a) + b_a) / 20.0;

        let hue = sanitize_degrees(b.atan2(a).to_degrees());
        let hue_radians = hue.to_radians();

        let ac = p2 * vc.nbb;
        let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);

        let e_hue = 0.25 * ((hue_radians + 2.0).cos() + 3.8);
        let p1 = 50000.0 / 13.0 * e_hue * vc.nc * vc.ncb;
        let t = p1 * a.hypot(b) / (u + 0.305);
        let alpha = (1.64 - 0.29f64.powf(vc.n)).powf(0.73) * t.powf(0.9);
        let chroma = alpha * (j / 100.0).sqrt();

        Self { hue, chroma, j }
    }
}

/// Wrap an angle into `[0, 360)`.
#[inline]
#[must_use]
pub fn sanitize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negatives
    if d >= 360.0 { 0.0 } else { d }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── L* ───────────────────────────────────────────────────────────────

    #[test]
    fn lstar_endpoints() {
        assert!(approx_eq(lstar_from_y(0.0), 0.0, 1e-9));
        assert!(approx_eq(lstar_from_y(100.0), 100.0, 1e-9));
        assert!(approx_eq(y_from_lstar(50.0), 18.418_651_851_244_416, 1e-9));
    }

    #[test]
    fn lstar_roundtrip() {
        for l in [0.5, 5.0, 8.0, 10.0, 33.3, 50.0, 77.7, 99.0] {
            let back = lstar_from_y(y_from_lstar(l));
            assert!(approx_eq(back, l, 1e-9), "L* {l} came back as {back}");
        }
    }

    #[test]
    fn matrices_are_inverse() {
        let v = [12.0, 34.0, 56.0];
        let back = mat_mul(&SRGB_FROM_XYZ, mat_mul(&XYZ_FROM_SRGB, v));
        for i in 0..3 {
            assert!(approx_eq(back[i], v[i], 1e-4), "component {i}: {back:?}");
        }
    }

    #[test]
    fn white_xyz_is_d65() {
        let xyz = xyz_from_rgb(Rgb::WHITE);
        assert!(approx_eq(xyz[0], WHITE_POINT_D65[0], 0.01), "{xyz:?}");
        assert!(approx_eq(xyz[1], 100.0, 1e-9), "{xyz:?}");
        assert!(approx_eq(xyz[2], WHITE_POINT_D65[2], 0.01), "{xyz:?}");
    }

    // ── Viewing conditions ───────────────────────────────────────────────

    #[test]
    fn standard_conditions_are_sane() {
        let vc = ViewingConditions::standard();
        assert!(approx_eq(vc.c, 0.69, 1e-9));
        assert!(approx_eq(vc.nc, 1.0, 1e-9));
        assert!(approx_eq(vc.n, 0.184_186_5, 1e-4), "n = {}", vc.n);
        assert!(approx_eq(vc.z, 1.909_169_5, 1e-4), "z = {}", vc.z);
        assert!(approx_eq(vc.fl, 0.388_481_5, 1e-4), "fl = {}", vc.fl);
        assert!(vc.aw > 0.0);
    }

    // ── Forward model ────────────────────────────────────────────────────

    #[test]
    fn white_has_full_lightness_and_no_chroma() {
        let cam = Cam16::from_rgb(Rgb::WHITE);
        assert!(approx_eq(cam.j, 100.0, 0.01), "J = {}", cam.j);
        assert!(cam.chroma < 3.0, "chroma = {}", cam.chroma);
    }

    #[test]
    fn black_has_zero_lightness() {
        let cam = Cam16::from_rgb(Rgb::BLACK);
        assert!(approx_eq(cam.j, 0.0, 1e-9));
        assert!(approx_eq(cam.chroma, 0.0, 1e-9));
    }

    #[test]
    fn primaries_land_on_known_hues() {
        // Reference values from Material Color Utilities.
        let red = Cam16::from_rgb(Rgb::new(255, 0, 0));
        assert!(approx_eq(red.hue, 27.408, 0.1), "red hue {}", red.hue);
        assert!(approx_eq(red.chroma, 113.357, 0.1), "red chroma {}", red.chroma);

        let green = Cam16::from_rgb(Rgb::new(0, 255, 0));
        assert!(approx_eq(green.hue, 142.139, 0.1), "green hue {}", green.hue);

        let blue = Cam16::from_rgb(Rgb::new(0, 0, 255));
        assert!(approx_eq(blue.hue, 282.788, 0.1), "blue hue {}", blue.hue);
        assert!(approx_eq(blue.chroma, 87.230, 0.1), "blue chroma {}", blue.chroma);
    }

    #[test]
    fn sanitize_wraps() {
        assert!(approx_eq(sanitize_degrees(370.0), 10.0, 1e-9));
        assert!(approx_eq(sanitize_degrees(-30.0), 330.0, 1e-9));
        assert!(approx_eq(sanitize_degrees(360.0), 0.0, 1e-9));
    }
}
