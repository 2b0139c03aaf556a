// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failures in theme derivation and export.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to serialize tokens: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown vision type: {0:?}")]
    UnknownVisionType(String),
}
