// SPDX-License-Identifier: MIT
//! Image decoding and pixel sampling ahead of clustering.

use std::path::PathBuf;

use image::DynamicImage;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use tonal_color::Rgb;
use tracing::debug;

use crate::error::ExtractError;
use crate::kmeans::{ExtractedColor, KMeans};

/// Pixels with alpha below this are treated as transparent and skipped.
const ALPHA_CUTOFF: u8 = 128;

// ---------------------------------------------------------------------------
// Pixel sampling
// ---------------------------------------------------------------------------

/// Read opaque pixels out of a tightly packed RGBA8 buffer.
///
/// With `max_pixels` set (and non-zero), the buffer is walked with a fixed
/// stride so that at most `max_pixels` samples come back. A trailing partial
/// pixel is ignored.
#[must_use]
pub fn pixels_from_rgba(data: &[u8], max_pixels: Option<usize>) -> Vec<Rgb> {
    let total = data.len() / 4;
    let cap = max_pixels.filter(|&m| m > 0);
    let step = match cap {
        Some(m) if m < total => total.div_ceil(m),
        _ => 1,
    };

    let mut pixels = Vec::with_capacity(cap.unwrap_or(total).min(total));
    for px in data.chunks_exact(4).step_by(step) {
        if px[3] < ALPHA_CUTOFF {
            continue;
        }
        pixels.push(Rgb::new(px[0], px[1], px[2]));
        if cap.is_some_and(|m| pixels.len() >= m) {
            break;
        }
    }
    pixels
}

// ---------------------------------------------------------------------------
// Image sources
// ---------------------------------------------------------------------------

/// Where an image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file on disk; the format is guessed from its contents and extension.
    Path(PathBuf),
    /// An encoded image held in memory (PNG or JPEG).
    Bytes(Vec<u8>),
    /// An image the caller already decoded.
    Decoded(DynamicImage),
}

impl ImageSource {
    fn decode(&self) -> Result<DynamicImage, ExtractError> {
        let img = match self {
            Self::Path(path) => image::open(path)?,
            Self::Bytes(bytes) => image::load_from_memory(bytes)?,
            Self::Decoded(img) => img.clone(),
        };
        Ok(img)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<DynamicImage> for ImageSource {
    fn from(img: DynamicImage) -> Self {
        Self::Decoded(img)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Options for [`extract_colors_from_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractOptions {
    /// Longest side, in pixels, the image is shrunk to before sampling.
    pub sample_size: u32,
    /// Number of clusters.
    pub color_count: usize,
    pub max_iterations: usize,
    pub seed: Option<u64>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            sample_size: 200,
            color_count: 6,
            max_iterations: 20,
            seed: None,
        }
    }
}

impl ExtractOptions {
    #[must_use]
    pub const fn kmeans(&self) -> KMeans {
        KMeans {
            k: self.color_count,
            max_iterations: self.max_iterations,
            seed: self.seed,
        }
    }
}

/// Decode `source`, downsample it and cluster its opaque pixels.
///
/// # Errors
///
/// Returns [`ExtractError::ImageDecode`] if the file cannot be read or the
/// bytes are not a supported image. A fully transparent image is not an
/// error; it yields an empty list.
pub fn extract_colors_from_image(
    source: &ImageSource,
    options: &ExtractOptions,
) -> Result<Vec<ExtractedColor>, ExtractError> {
    let mut img = source.decode()?;

    let size = options.sample_size.max(1);
    if img.width() > size || img.height() > size {
        img = img.resize(size, size, FilterType::Triangle);
    }
    debug!(width = img.width(), height = img.height(), "sampling image");

    let rgba = img.to_rgba8();
    let max_pixels = usize::try_from(size).map_or(usize::MAX, |s| s.saturating_mul(s));
    let pixels = pixels_from_rgba(rgba.as_raw(), Some(max_pixels));

    let colors = options.kmeans().cluster(&pixels);
    debug!(pixels = pixels.len(), clusters = colors.len(), "extracted colors");
    Ok(colors)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
