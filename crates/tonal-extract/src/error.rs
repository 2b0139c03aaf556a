// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failures while turning an image source into colors.
///
/// An image with no usable pixels is not an error: extraction returns an
/// empty list. Only an unreadable source aborts.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The source could not be read or decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}
