// SPDX-License-Identifier: MIT
//
// tonal-color: the HCT color space for tonal.
//
// Every other crate in the workspace works in HCT (hue, chroma, tone):
// hue and chroma from the CAM16 appearance model, tone from CIE L*. This
// crate owns the math that gets colors in and out of that space:
//
//   hex / 8-bit sRGB  ──rgb.rs──▶  XYZ  ──cam16.rs──▶  Hct
//   Hct  ──hct.rs (solve J, reduce chroma to gamut)──▶  8-bit sRGB
//
// Everything here is a pure function over `Copy` values. The only shared
// state is the immutable default viewing environment, computed once.

// Single-letter channel names (r, g, b, h, c, t, j) are standard in color
// science.
#![allow(clippy::many_single_char_names)]
// Matrix and model code is clearer with its reference names.
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]

pub mod cam16;
pub mod convert;
pub mod error;
pub mod hct;
pub mod rgb;

pub use convert::{
    adjust_chroma, adjust_tone, hct_to_hex, hex_to_hct, hex_to_rgb, is_light_color, is_valid_hex,
    luminance, rgb_to_hct, rgb_to_hex,
};
pub use error::ColorError;
pub use hct::{Hct, hue_difference};
pub use rgb::Rgb;
