//! k-means color quantization
//!
//! Clusters a pixel multiset into K representative colors:
//! - k-means++ seeded Lloyd runs from `kmeans_colors`, in RGB space
//! - `restarts` independent runs, keeping the lowest inertia
//! - Ranking by population share, ties broken by RGB order
//!
//! Restarts run on the rayon pool. Restart `i` is seeded with `seed + i` and
//! the winner is chosen by (inertia, index), so the result does not depend on
//! scheduling. When the input holds no more distinct colors than K, each
//! distinct color is its own cluster and no clustering is run.

use kmeans_colors::get_kmeans;
use palette::Srgb;
use rayon::prelude::*;
use std::{borrow::Cow, collections::BTreeMap};
use tracing::{debug, warn};

use crate::{
    clustering::Cluster,
    color::{ColorSample, Rgb},
    config::QuantizationConfig,
    constants::clustering::{EPSILON, MAX_ITERATIONS, NEAR_BLACK, NEAR_WHITE, RANDOM_SEED, RESTARTS},
    report::RankedColor,
    AnalysisError, Result,
};

/// Output of a single k-means restart, centroids on the 0-255 scale
#[derive(Debug, Clone, PartialEq)]
struct Run {
    centroids: Vec<[f64; 3]>,
    counts: Vec<usize>,
    inertia: f64,
}

/// Seeded, restartable k-means quantizer
#[derive(Debug, Clone)]
pub struct ColorQuantizer {
    restarts: usize,
    max_iterations: usize,
    epsilon: f64,
    seed: u64,
    /// (near_black, near_white) cutoffs, when extreme pixels are excluded
    extremes: Option<(u8, u8)>,
}

impl Default for ColorQuantizer {
    fn default() -> Self {
        Self::new(RANDOM_SEED)
    }
}

impl ColorQuantizer {
    /// Create a quantizer with default parameters and the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            restarts: RESTARTS,
            max_iterations: MAX_ITERATIONS,
            epsilon: EPSILON,
            seed,
            extremes: None,
        }
    }

    pub fn from_config(config: &QuantizationConfig) -> Self {
        Self {
            restarts: config.restarts.max(1),
            max_iterations: config.max_iterations.max(1),
            epsilon: config.epsilon,
            seed: config.seed,
            extremes: config
                .exclude_extremes
                .then_some((config.near_black, config.near_white)),
        }
    }

    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts.max(1);
        self
    }

    /// Drop near-black and near-white pixels before clustering
    pub fn excluding_extremes(mut self, near_black: u8, near_white: u8) -> Self {
        self.extremes = Some((near_black, near_white));
        self
    }

    pub fn excluding_default_extremes(self) -> Self {
        self.excluding_extremes(NEAR_BLACK, NEAR_WHITE)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Quantize `pixels` into `k` colors ranked by population share
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `k` is zero
    /// - `InsufficientSamples` if there are fewer pixels than `k`
    pub fn quantize(&self, pixels: &[Rgb], k: usize) -> Result<Vec<RankedColor>> {
        let clusters = self.cluster(pixels, k)?;
        let total: usize = clusters.iter().map(|c| c.population).sum();

        Ok(clusters
            .iter()
            .map(|c| RankedColor::new(c.centroid.rgb(), c.share(total)))
            .collect())
    }

    /// Cluster `pixels` and return clusters sorted by population, largest first
    pub fn cluster(&self, pixels: &[Rgb], k: usize) -> Result<Vec<Cluster>> {
        // kmeans_colors stores cluster indices as u8
        if k == 0 || k > u8::MAX as usize {
            return Err(AnalysisError::invalid_parameter("k", k));
        }

        let points = self.prefilter(pixels, k);
        if points.len() < k {
            return Err(AnalysisError::InsufficientSamples {
                found: points.len(),
                required: k,
            });
        }

        let best = match distinct_colors(&points, k) {
            Some(exact) => exact,
            None => self.best_run(&points, k),
        };

        Ok(rank(&best))
    }

    /// Run every restart in parallel and keep the lowest (inertia, index)
    fn best_run(&self, points: &[Rgb], k: usize) -> Run {
        let buffer: Vec<Srgb> = points.iter().map(|p| to_unit(*p)).collect();

        let runs: Vec<Run> = (0..self.restarts)
            .into_par_iter()
            .map(|i| self.run(points, &buffer, k, self.seed.wrapping_add(i as u64)))
            .collect();

        let (best_index, best) = select_best(runs);
        debug!(
            pixels = points.len(),
            k,
            restart = best_index,
            inertia = best.inertia,
            "k-means converged"
        );
        best
    }

    /// Remove extreme pixels, falling back to the full set if too few remain
    fn prefilter<'a>(&self, pixels: &'a [Rgb], k: usize) -> Cow<'a, [Rgb]> {
        let Some((near_black, near_white)) = self.extremes else {
            return Cow::Borrowed(pixels);
        };

        let filtered: Vec<Rgb> = pixels
            .iter()
            .copied()
            .filter(|p| p.max_channel() >= near_black && p.min_channel() <= near_white)
            .collect();

        if filtered.len() < k {
            warn!(
                remaining = filtered.len(),
                k, "Too few pixels after excluding extremes; clustering the full set"
            );
            Cow::Borrowed(pixels)
        } else {
            Cow::Owned(filtered)
        }
    }

    /// One k-means++ seeded Lloyd run over `buffer`, the unit-scale copy of
    /// `points`
    fn run(&self, points: &[Rgb], buffer: &[Srgb], k: usize, seed: u64) -> Run {
        // kmeans_colors compares squared centroid movement on the 0-1 scale
        let converge = (self.epsilon / 255.0).powi(2) as f32;
        let result = get_kmeans(k, self.max_iterations, converge, false, buffer, seed);

        let centroids: Vec<[f64; 3]> = result
            .centroids
            .iter()
            .map(|c| {
                [
                    c.red as f64 * 255.0,
                    c.green as f64 * 255.0,
                    c.blue as f64 * 255.0,
                ]
            })
            .collect();

        let mut counts = vec![0usize; k];
        let mut inertia = 0.0;
        for (point, &index) in points.iter().zip(&result.indices) {
            let index = index as usize;
            counts[index] += 1;
            inertia += point.distance_sq(&centroids[index]);
        }

        Run {
            centroids,
            counts,
            inertia,
        }
    }
}

/// Lowest inertia wins; equal inertia goes to the earlier restart
fn select_best(runs: Vec<Run>) -> (usize, Run) {
    runs.into_iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| a.inertia.total_cmp(&b.inertia).then(ia.cmp(ib)))
        .unwrap_or_else(|| (0, Run::default()))
}

impl Default for Run {
    fn default() -> Self {
        Self {
            centroids: Vec::new(),
            counts: Vec::new(),
            inertia: f64::INFINITY,
        }
    }
}

/// Exact clustering when there are at most `k` distinct colors
///
/// Surplus clusters repeat the last color with zero population.
fn distinct_colors(points: &[Rgb], k: usize) -> Option<Run> {
    let mut counts: BTreeMap<Rgb, usize> = BTreeMap::new();
    for p in points {
        *counts.entry(*p).or_insert(0) += 1;
        if counts.len() > k {
            return None;
        }
    }

    let last = counts.keys().next_back().copied()?;
    let mut centroids: Vec<[f64; 3]> = counts.keys().map(|c| c.to_f64()).collect();
    let mut populations: Vec<usize> = counts.values().copied().collect();
    centroids.resize(k, last.to_f64());
    populations.resize(k, 0);

    Some(Run {
        centroids,
        counts: populations,
        inertia: 0.0,
    })
}

/// Round centroids and order by population, then RGB
fn rank(run: &Run) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = run
        .centroids
        .iter()
        .zip(&run.counts)
        .map(|(centroid, &population)| Cluster {
            centroid: ColorSample::new(round_centroid(centroid)),
            population,
        })
        .collect();

    clusters.sort_by(|a, b| {
        b.population
            .cmp(&a.population)
            .then(a.centroid.rgb().cmp(&b.centroid.rgb()))
    });
    clusters
}

fn to_unit(rgb: Rgb) -> Srgb {
    Srgb::<u8>::new(rgb.r, rgb.g, rgb.b).into_format::<f32>()
}

fn round_centroid(c: &[f64; 3]) -> Rgb {
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(c[0]), channel(c[1]), channel(c[2]))
}
