//! The 11-step color scale shared by ramps, themes and exporters.
//!
//! Steps run from `50` (lightest) to `950` (darkest). A [`ColorScale`] holds
//! one color per step in that fixed order and serializes as a JSON object
//! keyed by the step number.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tonal_color::Rgb;

/// One of the 11 scale keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScaleStep {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl ScaleStep {
    /// All steps, lightest first.
    pub const ALL: [Self; 11] = [
        Self::S50,
        Self::S100,
        Self::S200,
        Self::S300,
        Self::S400,
        Self::S500,
        Self::S600,
        Self::S700,
        Self::S800,
        Self::S900,
        Self::S950,
    ];

    /// The numeric key (`50`, `100`, … `950`).
    #[must_use]
    pub const fn key(self) -> u16 {
        match self {
            Self::S50 => 50,
            Self::S100 => 100,
            Self::S200 => 200,
            Self::S300 => 300,
            Self::S400 => 400,
            Self::S500 => 500,
            Self::S600 => 600,
            Self::S700 => 700,
            Self::S800 => 800,
            Self::S900 => 900,
            Self::S950 => 950,
        }
    }

    /// Position in [`ALL`](Self::ALL).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The step on the opposite end of the scale (50↔950, 500↔500).
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self::ALL[Self::ALL.len() - 1 - self.index()]
    }

    #[must_use]
    pub fn from_key(key: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for ScaleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for ScaleStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.key())
    }
}

impl FromStr for ScaleStep {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().ok().and_then(Self::from_key).ok_or(())
    }
}

// ---------------------------------------------------------------------------
// ColorScale
// ---------------------------------------------------------------------------

/// One color per [`ScaleStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorScale(pub [Rgb; 11]);

impl ColorScale {
    /// Build a scale by evaluating `f` at every step.
    pub fn from_fn(mut f: impl FnMut(ScaleStep) -> Rgb) -> Self {
        Self(ScaleStep::ALL.map(&mut f))
    }

    /// `(step, color)` pairs, lightest first.
    pub fn iter(&self) -> impl Iterator<Item = (ScaleStep, Rgb)> + '_ {
        ScaleStep::ALL.into_iter().zip(self.0)
    }

    /// Apply `f` to every color, keeping the steps.
    #[must_use]
    pub fn map(&self, f: impl FnMut(Rgb) -> Rgb) -> Self {
        Self(self.0.map(f))
    }
}

impl Index<ScaleStep> for ColorScale {
    type Output = Rgb;

    fn index(&self, step: ScaleStep) -> &Rgb {
        &self.0[step.index()]
    }
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (step, color) in self.iter() {
            map.serialize_entry(&step.to_string(), &color)?;
        }
        map.end()
    }
}
