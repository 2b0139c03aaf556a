//! # tonal-theme
//!
//! Turns one seed color into a complete color system and audits it.
//!
//! # Architecture
//!
//! ```text
//! seed hex
//!     │
//!     ▼
//! ramp.rs:       11-step tonal ramp (HCT tone table, seed hue)
//!     │
//!     ▼
//! theme.rs:      light + dark semantic tokens, mirrored dark ramp
//!     │
//!     ├──▶ contrast.rs:   WCAG ratios, levels, accessible-shade search
//!     ├──▶ colorblind.rs: vision-deficiency simulation and collisions
//!     └──▶ export.rs:     CSS, Tailwind, JSON tokens, Figma variables
//! ```
//!
//! `material.rs` builds the Material 3 role scheme straight from the seed;
//! `presets.rs` holds named demo seeds.

// Channel math uses r/g/b and h/c/t.
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod colorblind;
pub mod contrast;
pub mod error;
pub mod export;
pub mod material;
pub mod presets;
pub mod ramp;
pub mod scale;
pub mod theme;

pub use colorblind::{
    VisionType, all_simulations, are_colors_distinguishable, generate_accessibility_report,
    simulate, simulate_color_blindness, simulate_scale,
};
pub use contrast::{
    ContrastResult, TargetLevel, WcagLevel, accessibility_matrix, accessibility_report,
    auto_text_color, contrast_ratio, find_accessible_shade, relative_luminance, wcag_level,
};
pub use error::ThemeError;
pub use export::ExportData;
pub use material::MaterialScheme;
pub use ramp::{
    ColorPalette, generate_brand_ramp, generate_color_palette, generate_neutral_ramp,
    generate_ramp, generate_surface_colors,
};
pub use scale::{ColorScale, ScaleStep};
pub use theme::{SemanticTokens, ThemePalette, dark_color_scale, generate_theme_palette};
