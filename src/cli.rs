// SPDX-License-Identifier: MIT
//
// Command-line interface: global `--config`/`--verbose`, one subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tonal_theme::presets::Category;
use tonal_theme::{TargetLevel, VisionType};

use crate::format::ExportFormats;

#[derive(Debug, Parser)]
#[command(name = "tonal")]
#[command(version, about = "Derive tonal color systems from a seed color or an image", long_about = None)]
#[command(arg_required_else_help = true)]
#[command(after_help = "Set TONAL_LOG to an EnvFilter directive to control logging (default: warn).")]
pub struct Cli {
    /// Configuration file (default: ./tonal.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless TONAL_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the 11-step tonal ramp of a seed color
    Ramp {
        /// Seed color, `#RGB` or `#RRGGBB`
        seed: String,
        #[arg(long, value_enum, default_value_t)]
        variant: RampVariant,
    },
    /// Print primary, secondary, tertiary, neutral and status ramps
    Palette {
        primary: String,
        /// Secondary seed (default: primary hue + 120°)
        secondary: Option<String>,
        /// Tertiary seed (default: primary hue + 240°)
        tertiary: Option<String>,
    },
    /// Generate a light/dark theme and export it
    Theme {
        seed: String,
        /// Comma-separated: css, tokens, tailwind, tailwind-theme, json, figma, material, or all
        #[arg(long = "format", value_name = "LIST")]
        formats: Option<ExportFormats>,
        /// Project name written into token documents
        #[arg(long)]
        project: Option<String>,
    },
    /// Extract dominant colors from an image and suggest a primary
    Extract {
        image: PathBuf,
        /// Number of clusters
        #[arg(long)]
        colors: Option<usize>,
        /// Longest side, in pixels, the image is scaled to before sampling
        #[arg(long, value_name = "PX")]
        sample_size: Option<u32>,
        /// Pin the clustering RNG for repeatable output
        #[arg(long)]
        seed: Option<u64>,
        /// Also theme the suggested primary and export it (same list as `theme`)
        #[arg(long = "format", value_name = "LIST")]
        formats: Option<ExportFormats>,
    },
    /// WCAG contrast ratio and level of a foreground on a background
    Contrast { fg: String, bg: String },
    /// Show a color under color vision deficiencies
    Simulate {
        color: String,
        /// One vision type (default: all of them)
        vision: Option<VisionType>,
    },
    /// Find a readable ramp step and check status colors for collisions
    Audit {
        seed: String,
        /// Background the text sits on
        #[arg(long = "bg", value_name = "HEX", default_value = "#FFFFFF")]
        background: String,
        #[arg(long, value_enum, ignore_case = true, default_value_t)]
        level: LevelArg,
    },
    /// List named seed colors
    Presets {
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
}

/// Ramp flavor for `tonal ramp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RampVariant {
    #[default]
    Standard,
    Brand,
    Neutral,
}

/// `--level` for `tonal audit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LevelArg {
    #[default]
    Aa,
    Aaa,
}

impl From<LevelArg> for TargetLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Aa => Self::Aa,
            LevelArg::Aaa => Self::Aaa,
        }
    }
}

/// `--category` for `tonal presets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Nature,
    Warm,
    Cool,
    Neutral,
}

impl From<CategoryArg> for Category {
    fn from(category: CategoryArg) -> Self {
        match category {
            CategoryArg::Nature => Self::Nature,
            CategoryArg::Warm => Self::Warm,
            CategoryArg::Cool => Self::Cool,
            CategoryArg::Neutral => Self::Neutral,
        }
    }
}
