//! Named seed colors for demos and quick starts.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tonal_color::Rgb;

/// Loose mood grouping for presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nature,
    Warm,
    Cool,
    Neutral,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nature => "nature",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Nature, Self::Warm, Self::Cool, Self::Neutral]
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// A named seed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub hex: Rgb,
    pub description: &'static str,
    pub category: Category,
}

const fn preset(
    id: &'static str,
    name: &'static str,
    hex: u32,
    description: &'static str,
    category: Category,
) -> Preset {
    Preset {
        id,
        name,
        hex: Rgb::from_argb(hex),
        description,
        category,
    }
}

/// Every preset. The first five are the short demo list.
pub const PRESETS: &[Preset] = &[
    preset("olive", "Olive", 0x5C_6356, "Natural olive green", Category::Nature),
    preset("terracotta", "Terracotta", 0xC8_7A5A, "Warm terracotta", Category::Warm),
    preset("ocean", "Ocean", 0x2E_6B8A, "Deep, calm ocean blue", Category::Cool),
    preset("berry", "Berry", 0x8B_4A6B, "Elegant berry purple", Category::Warm),
    preset("coral", "Coral", 0xE0_7B6C, "Lively coral pink", Category::Warm),
    preset("forest", "Forest", 0x2D_5A4A, "Deep forest green", Category::Nature),
    preset("slate", "Slate", 0x64_748B, "Modern slate gray", Category::Neutral),
    preset("amber", "Amber", 0xD9_7706, "Warm amber orange", Category::Warm),
    preset("indigo", "Indigo", 0x4F_46E5, "Vivid indigo blue", Category::Cool),
    preset("rose", "Rose", 0xE1_1D48, "Intense rose red", Category::Warm),
    preset("teal", "Teal", 0x0D_9488, "Blue-green teal", Category::Cool),
    preset("sand", "Sand", 0xA8_977A, "Soft sand", Category::Neutral),
];

/// The short demo list.
#[must_use]
pub fn demo_presets() -> &'static [Preset] {
    &PRESETS[..5]
}

/// Look up a preset by id.
///
/// Returns `None` if the id is not recognized.
#[must_use]
pub fn preset_by_id(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

#[must_use]
pub fn presets_by_category(category: Category) -> Vec<&'static Preset> {
    PRESETS.iter().filter(|p| p.category == category).collect()
}
