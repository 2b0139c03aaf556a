// SPDX-License-Identifier: MIT
//
// Optional `tonal.toml` configuration.
//
//   [extract]   sample_size, color_count, max_iterations, seed
//   [filter]    min_tone, max_tone, min_chroma
//   [export]    formats, project_name, figma_collection
//
// Every key is optional. Command-line flags win over file values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tonal_extract::{ExtractOptions, FilterOptions};
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tonal.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub extract: ExtractOptions,
    pub filter: FilterOptions,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Comma-separated format list, same syntax as `--format`.
    pub formats: Option<String>,
    pub project_name: Option<String>,
    pub figma_collection: Option<String>,
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load `path` if given (it must exist), else `tonal.toml` if present,
    /// else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = Config::from_toml(
            r#"
            [extract]
            color_count = 4
            seed = 7

            [filter]
            min_chroma = 20.0

            [export]
            formats = "css,json"
            "#,
        )
        .unwrap();

        assert_eq!(config.extract.color_count, 4);
        assert_eq!(config.extract.seed, Some(7));
        assert_eq!(config.extract.sample_size, 200);
        assert!((config.filter.min_chroma - 20.0).abs() < f64::EPSILON);
        assert!((config.filter.max_tone - 90.0).abs() < f64::EPSILON);
        assert_eq!(config.export.formats.as_deref(), Some("css,json"));
        assert_eq!(config.export.project_name, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml("[extract]\ncolours = 3\n").is_err());
        assert!(Config::from_toml("[render]\n").is_err());
    }

    #[test]
    fn missing_default_file_is_fine() {
        // Tests run from the package root, which has no tonal.toml.
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/tonal.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));
    }
}
