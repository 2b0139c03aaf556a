// SPDX-License-Identifier: MIT
//
// Export format selection for `tonal theme --format`.

use std::str::FromStr;

use anyhow::bail;
use bitflags::bitflags;

bitflags! {
    /// Which artefacts `theme` writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ExportFormats: u8 {
        /// Light/dark theme stylesheet.
        const CSS      = 0b0000_0001;
        /// Flat custom properties (seed, ramp, extracted colors).
        const TOKENS   = 0b0000_0010;
        const TAILWIND = 0b0000_0100;
        /// Design-tokens JSON document.
        const JSON     = 0b0000_1000;
        const FIGMA    = 0b0001_0000;
        /// Material 3 role scheme, light and dark.
        const MATERIAL = 0b0010_0000;
        /// Tailwind config whose colors are the theme's `var(--…)` properties.
        const THEME_TAILWIND = 0b0100_0000;
    }
}

impl ExportFormats {
    const NAMES: [(&'static str, Self); 7] = [
        ("css", Self::CSS),
        ("tokens", Self::TOKENS),
        ("tailwind", Self::TAILWIND),
        ("tailwind-theme", Self::THEME_TAILWIND),
        ("json", Self::JSON),
        ("figma", Self::FIGMA),
        ("material", Self::MATERIAL),
    ];

    /// Selected formats with their names, in output order.
    pub fn selected(self) -> impl Iterator<Item = (&'static str, Self)> {
        Self::NAMES.into_iter().filter(move |(_, f)| self.contains(*f))
    }
}

impl FromStr for ExportFormats {
    type Err = anyhow::Error;

    /// Comma-separated names, or `all`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut formats = Self::empty();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if part.eq_ignore_ascii_case("all") {
                formats |= Self::all();
                continue;
            }
            match Self::NAMES.iter().find(|(name, _)| name.eq_ignore_ascii_case(part)) {
                Some((_, f)) => formats |= *f,
                None => bail!("unknown export format {part:?} (expected css, tokens, tailwind, tailwind-theme, json, figma, material or all)"),
            }
        }
        if formats.is_empty() {
            bail!("no export format given");
        }
        Ok(formats)
    }
}
