// SPDX-License-Identifier: MIT
//! K-means++ clustering over RGB pixels.
//!
//! Finds the dominant colors of a pixel set. Initialization follows
//! k-means++: the first centroid is drawn uniformly, each further centroid
//! with probability proportional to its squared distance from the nearest
//! centroid already chosen. That spread matters for skewed images (a white
//! product shot with a small colored logo), where uniform seeding tends to
//! put every centroid in the background.
//!
//! Iteration is Lloyd's algorithm with a hard cap:
//!
//! 1. assign every pixel to its nearest centroid (ties go to the lowest
//!    index)
//! 2. stop if no assignment changed
//! 3. move each centroid to the rounded mean of its pixels
//!
//! Seeding is random. Pass a `seed` to pin a run; without one, the thread
//! RNG is used and repeated calls may split clusters differently.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use tonal_color::{Hct, Rgb};
use tracing::{debug, trace};

// ---------------------------------------------------------------------------
// ExtractedColor
// ---------------------------------------------------------------------------

/// One dominant color and its share of the clustered pixels.
///
/// Serialized as `{hex, rgb: {r, g, b}, hct, percentage}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "ExtractedColorRecord", from = "ExtractedColorRecord")]
pub struct ExtractedColor {
    pub rgb: Rgb,
    pub hct: Hct,
    /// Share of pixels in this cluster, `[0, 100]`.
    pub percentage: f64,
}

#[derive(Serialize, Deserialize)]
struct Channels {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Serialize, Deserialize)]
struct ExtractedColorRecord {
    hex: Rgb,
    rgb: Channels,
    hct: Hct,
    percentage: f64,
}

impl From<ExtractedColor> for ExtractedColorRecord {
    fn from(c: ExtractedColor) -> Self {
        Self {
            hex: c.rgb,
            rgb: Channels {
                r: c.rgb.r,
                g: c.rgb.g,
                b: c.rgb.b,
            },
            hct: c.hct,
            percentage: c.percentage,
        }
    }
}

// `hex` is authoritative; `rgb` repeats it for consumers that want channels.
impl From<ExtractedColorRecord> for ExtractedColor {
    fn from(r: ExtractedColorRecord) -> Self {
        Self {
            rgb: r.hex,
            hct: r.hct,
            percentage: r.percentage,
        }
    }
}

impl ExtractedColor {
    #[must_use]
    pub fn new(rgb: Rgb, percentage: f64) -> Self {
        Self {
            rgb,
            hct: Hct::from_rgb(rgb),
            percentage,
        }
    }

    /// Canonical `#RRGGBB`.
    #[must_use]
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }
}

// ---------------------------------------------------------------------------
// KMeans
// ---------------------------------------------------------------------------

/// Clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KMeans {
    /// Number of clusters. Reduced to the pixel count when larger.
    pub k: usize,
    /// Upper bound on assignment/update rounds.
    pub max_iterations: usize,
    /// Fixed RNG seed for repeatable runs.
    pub seed: Option<u64>,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            k: 6,
            max_iterations: 20,
            seed: None,
        }
    }
}

impl KMeans {
    #[must_use]
    pub const fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 20,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    #[must_use]
    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Cluster `pixels`, returning clusters sorted by descending share.
    ///
    /// Empty input (or `k == 0`) yields an empty list. Clusters that end
    /// up with no pixels are dropped, so at most `k` entries come back and
    /// their percentages sum to 100.
    #[must_use]
    pub fn cluster(&self, pixels: &[Rgb]) -> Vec<ExtractedColor> {
        match self.seed {
            Some(seed) => self.cluster_with_rng(pixels, &mut Pcg64Mcg::seed_from_u64(seed)),
            None => self.cluster_with_rng(pixels, &mut rand::rng()),
        }
    }

    /// [`cluster`](Self::cluster) with a caller-supplied random source.
    #[must_use]
    pub fn cluster_with_rng<R: Rng + ?Sized>(&self, pixels: &[Rgb], rng: &mut R) -> Vec<ExtractedColor> {
        if pixels.is_empty() || self.k == 0 {
            return Vec::new();
        }
        let k = self.k.min(pixels.len());

        let mut centroids = seed_centroids(pixels, k, rng);
        let mut assignment = vec![usize::MAX; pixels.len()];

        let mut settled = false;
        for iteration in 0..self.max_iterations {
            let moved = assign(pixels, &centroids, &mut assignment);
            trace!(iteration, moved, "k-means assignment");
            if moved == 0 {
                debug!(iteration, k, "k-means converged");
                settled = true;
                break;
            }
            update(pixels, &assignment, &mut centroids);
        }
        if !settled {
            // Centroids moved after the last assignment.
            assign(pixels, &centroids, &mut assignment);
        }

        let mut counts = vec![0usize; k];
        for &idx in &assignment {
            counts[idx] += 1;
        }

        let total = pixels.len() as f64;
        let mut colors: Vec<ExtractedColor> = centroids
            .iter()
            .zip(&counts)
            .filter(|&(_, &count)| count > 0)
            .map(|(&centroid, &count)| ExtractedColor::new(centroid, count as f64 / total * 100.0))
            .collect();
        colors.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        colors
    }
}

/// Cluster `pixels` into at most `k` dominant colors with an unseeded RNG.
#[must_use]
pub fn cluster(pixels: &[Rgb], k: usize, max_iterations: usize) -> Vec<ExtractedColor> {
    KMeans::new(k).with_max_iterations(max_iterations).cluster(pixels)
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// K-means++ seeding. `pixels` is non-empty and `1 <= k <= pixels.len()`.
fn seed_centroids<R: Rng + ?Sized>(pixels: &[Rgb], k: usize, rng: &mut R) -> Vec<Rgb> {
    let mut centroids = Vec::with_capacity(k);
    let first = pixels[rng.random_range(0..pixels.len())];
    centroids.push(first);

    // Squared distance from each pixel to its nearest chosen centroid.
    let mut nearest: Vec<u32> = pixels.iter().map(|p| p.distance_squared(first)).collect();

    while centroids.len() < k {
        let total: u64 = nearest.iter().map(|&d| u64::from(d)).sum();

        let next = if total == 0 {
            // Every pixel already coincides with a centroid.
            pixels[rng.random_range(0..pixels.len())]
        } else {
            let mut target = rng.random::<f64>() * total as f64;
            let mut chosen = 0;
            for (i, &d) in nearest.iter().enumerate() {
                if d == 0 {
                    continue;
                }
                chosen = i;
                target -= f64::from(d);
                if target <= 0.0 {
                    break;
                }
            }
            pixels[chosen]
        };

        centroids.push(next);
        for (d, p) in nearest.iter_mut().zip(pixels) {
            *d = (*d).min(p.distance_squared(next));
        }
    }

    centroids
}

/// Index of the nearest centroid. Strict `<` keeps the lowest index on ties.
#[inline]
fn nearest_centroid(pixel: Rgb, centroids: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let d = pixel.distance_squared(*c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Reassign every pixel; returns how many changed cluster.
fn assign(pixels: &[Rgb], centroids: &[Rgb], assignment: &mut [usize]) -> usize {
    let mut moved = 0;
    for (slot, &pixel) in assignment.iter_mut().zip(pixels) {
        let idx = nearest_centroid(pixel, centroids);
        if *slot != idx {
            *slot = idx;
            moved += 1;
        }
    }
    moved
}

/// Move each centroid to the rounded mean of its pixels. Empty clusters
/// keep their previous centroid.
#[allow(clippy::cast_possible_truncation)]
fn update(pixels: &[Rgb], assignment: &[usize], centroids: &mut [Rgb]) {
    let mut sums = vec![[0u64; 3]; centroids.len()];
    let mut counts = vec![0u64; centroids.len()];

    for (&idx, pixel) in assignment.iter().zip(pixels) {
        for (sum, ch) in sums[idx].iter_mut().zip(pixel.channels()) {
            *sum += u64::from(ch);
        }
        counts[idx] += 1;
    }

    for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
        if count == 0 {
            continue;
        }
        // Integer round-half-up; a mean of u8 values always fits in u8.
        let mean = sum.map(|s| ((s + count / 2) / count) as u8);
        *centroid = Rgb::from(mean);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
