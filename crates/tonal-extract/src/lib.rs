// SPDX-License-Identifier: MIT
//
// tonal-extract: dominant colors from images.
//
// Pixels are pulled from a decoded image (transparent ones skipped),
// clustered with k-means++ in RGB, and ranked by population. A primary
// candidate is then picked by favoring chroma over share.

#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod kmeans;
pub mod sample;
pub mod select;

pub use error::ExtractError;
pub use kmeans::{ExtractedColor, KMeans, cluster};
pub use sample::{ExtractOptions, ImageSource, extract_colors_from_image, pixels_from_rgba};
pub use select::{FilterOptions, filter_extracted_colors, primary_score, select_primary_color};
