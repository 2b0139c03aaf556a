// SPDX-License-Identifier: MIT
//
// Color parsing errors.

use thiserror::Error;

/// Errors produced while reading color input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not a 3- or 6-digit hex color (with or without `#`).
    #[error("invalid color format: {0:?} (expected #RGB or #RRGGBB)")]
    InvalidColorFormat(String),
}
