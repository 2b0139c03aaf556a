//! WCAG 2.1 contrast checks over single pairs and whole ramps.
//!
//! Thresholds, normal text / large text:
//!
//! - AA: 4.5:1 / 3:1
//! - AAA: 7:1 / 4.5:1
//!
//! Luminance is the WCAG definition (sRGB, 0.03928 knee), so ratios match
//! what browser devtools report.

use std::fmt;

use serde::Serialize;
use tonal_color::Rgb;

use crate::scale::{ColorScale, ScaleStep};

pub const AA: f64 = 4.5;
pub const AAA: f64 = 7.0;
pub const AA_LARGE: f64 = 3.0;
pub const AAA_LARGE: f64 = 4.5;

/// WCAG relative luminance in `[0, 1]`.
#[inline]
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    color.relative_luminance()
}

/// Contrast ratio in `[1, 21]`. Symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// Best level a ratio reaches for normal-size text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WcagLevel {
    Fail,
    #[serde(rename = "AA-Large")]
    AaLarge,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl WcagLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::AaLarge => "AA-Large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contrast ratio with its WCAG classification.
///
/// The four flags are checked independently; `pass_aaa_large` and `pass_aa`
/// share a threshold but answer different questions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    pub ratio: f64,
    pub level: WcagLevel,
    #[serde(rename = "passAA")]
    pub pass_aa: bool,
    #[serde(rename = "passAAA")]
    pub pass_aaa: bool,
    #[serde(rename = "passAALarge")]
    pub pass_aa_large: bool,
    #[serde(rename = "passAAALarge")]
    pub pass_aaa_large: bool,
}

impl ContrastResult {
    /// The ratio as `"4.50:1"`.
    #[must_use]
    pub fn ratio_text(&self) -> String {
        format!("{:.2}:1", self.ratio)
    }
}

/// Classify a contrast ratio.
#[must_use]
pub fn wcag_level(ratio: f64) -> ContrastResult {
    let level = if ratio >= AAA {
        WcagLevel::Aaa
    } else if ratio >= AA {
        WcagLevel::Aa
    } else if ratio >= AA_LARGE {
        WcagLevel::AaLarge
    } else {
        WcagLevel::Fail
    };
    ContrastResult {
        ratio,
        level,
        pass_aa: ratio >= AA,
        pass_aaa: ratio >= AAA,
        pass_aa_large: ratio >= AA_LARGE,
        pass_aaa_large: ratio >= AAA_LARGE,
    }
}

/// Shorthand for `wcag_level(contrast_ratio(fg, bg))`.
#[must_use]
pub fn contrast(fg: Rgb, bg: Rgb) -> ContrastResult {
    wcag_level(contrast_ratio(fg, bg))
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Contrast for one pair plus what to do about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityReport {
    pub foreground: Rgb,
    pub background: Rgb,
    pub contrast: ContrastResult,
    pub suggestions: Vec<String>,
}

#[must_use]
pub fn accessibility_report(fg: Rgb, bg: Rgb) -> AccessibilityReport {
    let contrast = contrast(fg, bg);
    let mut suggestions = Vec::new();

    if !contrast.pass_aa {
        if contrast.pass_aa_large {
            suggestions.push("only usable for large text (18pt+, or 14pt bold)".to_owned());
        } else {
            suggestions.push("contrast is too low; pick a darker or lighter color".to_owned());
        }
    }
    if contrast.pass_aa && !contrast.pass_aaa {
        suggestions.push("raise the ratio to 7:1 or more for AAA".to_owned());
    }

    AccessibilityReport {
        foreground: fg,
        background: bg,
        contrast,
        suggestions,
    }
}

/// Every step of `scale` against every other step: `matrix[fg][bg]`.
#[must_use]
pub fn accessibility_matrix(scale: &ColorScale) -> [[ContrastResult; 11]; 11] {
    scale.0.map(|fg| scale.0.map(|bg| contrast(fg, bg)))
}

/// Whichever of white or black reads better on `bg`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextColor {
    pub recommended: Rgb,
    pub ratio: f64,
    pub level: WcagLevel,
}

/// Pick white or black text for `bg`. Black wins ties.
#[must_use]
pub fn auto_text_color(bg: Rgb) -> TextColor {
    let white = contrast_ratio(Rgb::WHITE, bg);
    let black = contrast_ratio(Rgb::BLACK, bg);
    let (recommended, ratio) = if white > black {
        (Rgb::WHITE, white)
    } else {
        (Rgb::BLACK, black)
    };
    TextColor {
        recommended,
        ratio,
        level: wcag_level(ratio).level,
    }
}

/// Target for [`find_accessible_shade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetLevel {
    #[default]
    Aa,
    Aaa,
}

impl TargetLevel {
    #[must_use]
    pub const fn min_ratio(self) -> f64 {
        match self {
            Self::Aa => AA,
            Self::Aaa => AAA,
        }
    }
}

/// A ramp step that clears a target against some background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccessibleShade {
    pub shade: ScaleStep,
    pub color: Rgb,
    pub ratio: f64,
}

/// The step of `scale` with the lowest ratio that still meets `target`
/// against `bg`. `None` when no step clears it, which is an ordinary result.
/// Equal ratios keep the lighter step.
#[must_use]
pub fn find_accessible_shade(scale: &ColorScale, bg: Rgb, target: TargetLevel) -> Option<AccessibleShade> {
    let min = target.min_ratio();
    scale
        .iter()
        .map(|(shade, color)| AccessibleShade {
            shade,
            color,
            ratio: contrast_ratio(color, bg),
        })
        .filter(|s| s.ratio >= min)
        .min_by(|a, b| a.ratio.total_cmp(&b.ratio))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ramp::generate_ramp;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn rgb(hex: &str) -> Rgb {
        Rgb::from_hex(hex).unwrap()
    }

    // ── Ratio ────────────────────────────────────────────────────────────

    #[test]
    fn black_on_white_is_21() {
        assert!(approx_eq(contrast_ratio(Rgb::BLACK, Rgb::WHITE), 21.0, 1e-9));
    }

    #[test]
    fn same_color_is_1() {
        for hex in ["#000000", "#777777", "#5C6356", "#FFFFFF"] {
            assert!(approx_eq(contrast_ratio(rgb(hex), rgb(hex)), 1.0, 1e-12));
        }
    }

    #[test]
    fn ratio_is_symmetric() {
        let colors = ["#5C6356", "#C87A5A", "#2E6B8A", "#FFFFFF", "#123456"].map(rgb);
        for a in colors {
            for b in colors {
                assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
            }
        }
    }

    #[test]
    fn gray_on_white_known_value() {
        // #767676 is the classic lightest gray passing AA on white.
        let r = contrast_ratio(rgb("#767676"), Rgb::WHITE);
        assert!(r >= 4.5 && r < 4.6, "{r}");
    }

    // ── Levels ───────────────────────────────────────────────────────────

    #[test]
    fn black_on_white_is_aaa() {
        let result = contrast(Rgb::BLACK, Rgb::WHITE);
        assert_eq!(result.level, WcagLevel::Aaa);
        assert!(result.pass_aa && result.pass_aaa);
        assert!(result.pass_aa_large && result.pass_aaa_large);
        assert_eq!(result.ratio_text(), "21.00:1");
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(wcag_level(7.0).level, WcagLevel::Aaa);
        assert_eq!(wcag_level(6.99).level, WcagLevel::Aa);
        assert_eq!(wcag_level(4.5).level, WcagLevel::Aa);
        assert_eq!(wcag_level(4.49).level, WcagLevel::AaLarge);
        assert_eq!(wcag_level(3.0).level, WcagLevel::AaLarge);
        assert_eq!(wcag_level(2.99).level, WcagLevel::Fail);
    }

    #[test]
    fn flags_are_independent_thresholds() {
        let r = wcag_level(5.0);
        assert!(r.pass_aa && !r.pass_aaa && r.pass_aa_large && r.pass_aaa_large);
        let r = wcag_level(3.5);
        assert!(!r.pass_aa && r.pass_aa_large && !r.pass_aaa_large);
    }

    #[test]
    fn result_serializes_with_wcag_names() {
        let json = serde_json::to_value(wcag_level(3.2)).unwrap();
        assert_eq!(json["level"], "AA-Large");
        assert_eq!(json["passAALarge"], true);
        assert_eq!(json["passAA"], false);
    }

    // ── Reports ──────────────────────────────────────────────────────────

    #[test]
    fn report_suggestions() {
        assert!(accessibility_report(Rgb::BLACK, Rgb::WHITE).suggestions.is_empty());
        // ~5.7:1, AA but not AAA.
        let aa = accessibility_report(rgb("#666666"), Rgb::WHITE);
        assert_eq!(aa.suggestions.len(), 1);
        assert!(aa.suggestions[0].contains("AAA"));
        // ~3.5:1, large text only.
        let large = accessibility_report(rgb("#8A8A8A"), Rgb::WHITE);
        assert!(large.suggestions[0].contains("large text"));
        let fail = accessibility_report(rgb("#EEEEEE"), Rgb::WHITE);
        assert!(fail.suggestions[0].contains("too low"));
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let m = accessibility_matrix(&generate_ramp("#2E6B8A").unwrap());
        for i in 0..11 {
            assert!(approx_eq(m[i][i].ratio, 1.0, 1e-12));
            assert_eq!(m[i][i].level, WcagLevel::Fail);
            for j in 0..11 {
                assert!(approx_eq(m[i][j].ratio, m[j][i].ratio, 1e-12));
            }
        }
        assert!(m[0][10].pass_aa);
    }

    #[test]
    fn auto_text_color_picks_readable() {
        assert_eq!(auto_text_color(Rgb::WHITE).recommended, Rgb::BLACK);
        assert_eq!(auto_text_color(Rgb::BLACK).recommended, Rgb::WHITE);
        let navy = auto_text_color(rgb("#1E3A8A"));
        assert_eq!(navy.recommended, Rgb::WHITE);
        assert_eq!(navy.level, WcagLevel::Aaa);
    }

    #[test]
    fn accessible_shade_is_least_extreme() {
        let ramp = generate_ramp("#2E6B8A").unwrap();
        let found = find_accessible_shade(&ramp, Rgb::WHITE, TargetLevel::Aa).unwrap();
        assert!(found.ratio >= 4.5);
        // Every other passing step contrasts at least as much.
        for (_, c) in ramp.iter() {
            let r = contrast_ratio(c, Rgb::WHITE);
            assert!(r < 4.5 || r >= found.ratio);
        }
        assert_eq!(found.color, ramp[found.shade]);
    }

    #[test]
    fn aaa_needs_a_darker_shade_than_aa() {
        let ramp = generate_ramp("#C87A5A").unwrap();
        let aa = find_accessible_shade(&ramp, Rgb::WHITE, TargetLevel::Aa).unwrap();
        let aaa = find_accessible_shade(&ramp, Rgb::WHITE, TargetLevel::Aaa).unwrap();
        assert!(aaa.shade > aa.shade, "{:?} vs {:?}", aaa.shade, aa.shade);
    }

    #[test]
    fn no_shade_clears_an_impossible_bar() {
        // Against mid gray nothing reaches 7:1.
        let ramp = generate_ramp("#5C6356").unwrap();
        assert_eq!(find_accessible_shade(&ramp, rgb("#777777"), TargetLevel::Aaa), None);
    }
}
