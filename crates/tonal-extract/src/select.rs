// SPDX-License-Identifier: MIT
//! Picking a brand primary out of extracted colors.

use serde::{Deserialize, Serialize};

use crate::kmeans::ExtractedColor;

const CHROMA_WEIGHT: f64 = 0.7;
const SHARE_WEIGHT: f64 = 0.3;

/// Primary-candidate score. Chroma outweighs share so a vivid logo mark
/// beats a large but muted background.
#[inline]
#[must_use]
pub fn primary_score(color: &ExtractedColor) -> f64 {
    color.hct.c.mul_add(CHROMA_WEIGHT, color.percentage * SHARE_WEIGHT)
}

/// The highest-scoring color, or `None` for an empty slice. Ties keep the
/// earlier entry.
#[must_use]
pub fn select_primary_color(colors: &[ExtractedColor]) -> Option<&ExtractedColor> {
    colors.iter().fold(None, |best: Option<&ExtractedColor>, c| match best {
        Some(b) if primary_score(b) >= primary_score(c) => Some(b),
        _ => Some(c),
    })
}

/// Bounds for [`filter_extracted_colors`]. All inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    pub min_tone: f64,
    pub max_tone: f64,
    pub min_chroma: f64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            min_tone: 10.0,
            max_tone: 90.0,
            min_chroma: 10.0,
        }
    }
}

impl FilterOptions {
    #[must_use]
    pub fn accepts(&self, color: &ExtractedColor) -> bool {
        (self.min_tone..=self.max_tone).contains(&color.hct.t) && color.hct.c >= self.min_chroma
    }
}

/// Drop colors too close to black or white, or too gray, to serve as a
/// primary.
#[must_use]
pub fn filter_extracted_colors(colors: &[ExtractedColor], options: &FilterOptions) -> Vec<ExtractedColor> {
    colors.iter().copied().filter(|c| options.accepts(c)).collect()
}
