/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Color clustering
//!
//! Pixels are treated as points in BGR space and partitioned into `k`
//! clusters with Lloyd's algorithm, seeded with k-means++.
//! Each pixel is then replaced by the center of its cluster.
//!
//! Several attempts are made from different random seeds and the one with the
//! smallest sum of squared distances is kept. Without an explicit seed the
//! random source is seeded from the system, so repeated calls on the same
//! image may label clusters differently or settle on a different partition.
//!
//! [`KMeansMask`] additionally binarizes the clustered image.
use lumen_core::log::{debug, trace};
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;
use nanorand::{Rng, WyRand};

use crate::adapter::{into_bgr, with_luma};
use crate::params::FilterParams;
use crate::threshold::otsu_threshold;

/// Number of clusters used when none is given
pub const DEFAULT_K: i64 = 3;
/// Number of restarts used when none is given
pub const DEFAULT_ATTEMPTS: usize = 10;
/// Iteration cap for each attempt
pub const DEFAULT_MAX_ITERATIONS: usize = 20;
/// Centers moving less than this stop an attempt
pub const DEFAULT_EPSILON: f64 = 1.0;

type Point = [f32; 3];

/// Options controlling a clustering run
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KMeansOptions {
    /// Requested number of clusters, clamped to `[1, pixel count]` when run
    pub k:              usize,
    /// Number of restarts, at least one
    pub attempts:       usize,
    /// Iteration cap per attempt, at least one
    pub max_iterations: usize,
    /// Largest center movement that still counts as converged
    pub epsilon:        f64,
    /// Fixed seed for reproducible results
    pub seed:           Option<u64>
}

impl Default for KMeansOptions {
    fn default() -> Self {
        KMeansOptions {
            k:              DEFAULT_K as usize,
            attempts:       DEFAULT_ATTEMPTS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon:        DEFAULT_EPSILON,
            seed:           None
        }
    }
}

impl KMeansOptions {
    /// Read `k`, `attempts`, `max_iterations`, `epsilon` and `seed`
    ///
    /// Values below their minimum are raised to it, a non finite
    /// or negative epsilon falls back to the default
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_params(params: &FilterParams) -> KMeansOptions {
        let at_least_one = |name: &str, default: usize| {
            params.int_or(name, default as i64).max(1) as usize
        };
        let epsilon = params.float_or("epsilon", DEFAULT_EPSILON);

        KMeansOptions {
            k:              at_least_one("k", DEFAULT_K as usize),
            attempts:       at_least_one("attempts", DEFAULT_ATTEMPTS),
            max_iterations: at_least_one("max_iterations", DEFAULT_MAX_ITERATIONS),
            epsilon:        if epsilon.is_finite() && epsilon >= 0.0 {
                epsilon
            } else {
                DEFAULT_EPSILON
            },
            seed:           params
                .get("seed")
                .and_then(|x| x.as_int())
                .map(|x| x as u64)
        }
    }
}

/// Result of clustering a set of points
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    /// Cluster centers
    pub centers:     Vec<Point>,
    /// Index into `centers` for every input point
    pub labels:      Vec<usize>,
    /// Sum of squared distances from every point to its center
    pub compactness: f64
}

fn distance(a: &Point, b: &Point) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the nearest center, ties go to the lowest index
fn nearest(point: &Point, centers: &[Point]) -> (usize, f32) {
    let mut best = (0, f32::MAX);

    for (i, center) in centers.iter().enumerate() {
        let d = distance(point, center);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// A uniform float in `[0, 1)`
#[allow(clippy::cast_precision_loss)]
fn uniform(rng: &mut WyRand) -> f64 {
    (rng.generate::<u64>() >> 11) as f64 / (1_u64 << 53) as f64
}

/// Pick `k` initial centers with k-means++
///
/// The first center is uniform, every next one is drawn with probability
/// proportional to its squared distance from the nearest chosen center.
fn seed_centers(points: &[Point], k: usize, rng: &mut WyRand) -> Vec<Point> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.generate_range(0..points.len())]);

    let mut distances = points
        .iter()
        .map(|p| distance(p, &centers[0]))
        .collect::<Vec<f32>>();

    while centers.len() < k {
        let total = distances.iter().map(|x| f64::from(*x)).sum::<f64>();

        let chosen = if total > 0.0 {
            let target = uniform(rng) * total;
            let mut acc = 0.0;
            let mut chosen = points.len() - 1;

            for (i, d) in distances.iter().enumerate() {
                acc += f64::from(*d);
                if acc > target {
                    chosen = i;
                    break;
                }
            }
            chosen
        } else {
            // every point sits on a center already
            rng.generate_range(0..points.len())
        };
        let center = points[chosen];
        centers.push(center);

        for (d, p) in distances.iter_mut().zip(points) {
            *d = d.min(distance(p, &center));
        }
    }
    centers
}

/// Assign every point to its nearest center, returning the compactness
fn assign(points: &[Point], centers: &[Point], labels: &mut [usize]) -> f64 {
    let mut compactness = 0.0;

    for (point, label) in points.iter().zip(labels.iter_mut()) {
        let (index, d) = nearest(point, centers);
        *label = index;
        compactness += f64::from(d);
    }
    compactness
}

/// Recompute centers as the mean of their points
///
/// A cluster left empty takes the point lying farthest from its
/// own center out of a cluster that can spare it.
#[allow(clippy::cast_possible_truncation)]
fn update_centers(points: &[Point], centers: &[Point], labels: &mut [usize]) -> Vec<Point> {
    let k = centers.len();
    let mut sums = vec![[0.0_f64; 3]; k];
    let mut counts = vec![0_usize; k];

    for (point, label) in points.iter().zip(labels.iter()) {
        counts[*label] += 1;
        for (s, p) in sums[*label].iter_mut().zip(point) {
            *s += f64::from(*p);
        }
    }

    for empty in 0..k {
        if counts[empty] != 0 {
            continue;
        }
        let farthest = (0..points.len())
            .filter(|i| counts[labels[*i]] > 1)
            .max_by(|a, b| {
                let da = distance(&points[*a], &centers[labels[*a]]);
                let db = distance(&points[*b], &centers[labels[*b]]);
                da.total_cmp(&db)
            });

        if let Some(i) = farthest {
            let old = labels[i];

            counts[old] -= 1;
            for (s, p) in sums[old].iter_mut().zip(&points[i]) {
                *s -= f64::from(*p);
            }
            counts[empty] = 1;
            sums[empty] = points[i].map(f64::from);
            labels[i] = empty;
        }
    }

    sums.iter()
        .zip(&counts)
        .zip(centers)
        .map(|((sum, count), old)| {
            if *count == 0 {
                *old
            } else {
                sum.map(|s| (s / *count as f64) as f32)
            }
        })
        .collect()
}

/// Partition `points` into `k` clusters
///
/// `k` is clamped to `[1, points.len()]`, returns `None` when there are no points
pub fn kmeans(points: &[Point], k: usize, options: &KMeansOptions, rng: &mut WyRand) -> Option<Clustering> {
    if points.is_empty() {
        return None;
    }
    let k = k.clamp(1, points.len());
    let epsilon_sq = (options.epsilon * options.epsilon) as f32;

    let mut best: Option<Clustering> = None;

    for attempt in 0..options.attempts.max(1) {
        let mut centers = seed_centers(points, k, rng);
        let mut labels = vec![0; points.len()];

        for iteration in 0..options.max_iterations.max(1) {
            assign(points, &centers, &mut labels);

            let new_centers = update_centers(points, &centers, &mut labels);

            let shift = centers
                .iter()
                .zip(&new_centers)
                .map(|(a, b)| distance(a, b))
                .fold(0.0_f32, f32::max);

            centers = new_centers;

            if shift <= epsilon_sq {
                trace!("Attempt {attempt} converged after {} iterations", iteration + 1);
                break;
            }
        }
        let compactness = assign(points, &centers, &mut labels);

        debug!("Attempt {attempt} compactness {compactness}");

        if best.as_ref().map_or(true, |b| compactness < b.compactness) {
            best = Some(Clustering {
                centers,
                labels,
                compactness
            });
        }
    }
    best
}

/// Replace every pixel with the center of its color cluster
///
/// Luma images are expanded to BGR first, the output is always BGR
///
/// # Example
/// ```
/// use lumen_core::colorspace::ColorSpace;
/// use lumen_image::image::Image;
/// use lumen_image::traits::OperationsTrait;
/// use lumen_filters::kmeans::KMeans;
///
/// let image = Image::from_fn(8, 8, ColorSpace::BGR, |x, _, px| {
///     *px = if x < 4 { [10, 20, 30] } else { [200, 180, 160] };
/// })
/// .unwrap();
/// let clustered = KMeans::new(2).with_seed(7).clone_and_execute(&image).unwrap();
/// // two distinct colors are reproduced exactly
/// assert_eq!(clustered, image);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct KMeans {
    options: KMeansOptions
}

impl KMeans {
    /// Cluster into `k` colors, values below one become one
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(k: i64) -> KMeans {
        KMeans {
            options: KMeansOptions {
                k: k.max(1) as usize,
                ..KMeansOptions::default()
            }
        }
    }

    #[must_use]
    pub fn with_options(options: KMeansOptions) -> KMeans {
        KMeans { options }
    }

    /// Fix the random seed so runs are reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> KMeans {
        self.options.seed = Some(seed);
        self
    }

    /// Read `k` (default 3) and the tuning parameters, see [`KMeansOptions::from_params`]
    #[must_use]
    pub fn from_params(params: &FilterParams) -> KMeans {
        KMeans::with_options(KMeansOptions::from_params(params))
    }

    pub const fn options(&self) -> &KMeansOptions {
        &self.options
    }
}

impl OperationsTrait for KMeans {
    fn name(&self) -> &'static str {
        "KMeans"
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        into_bgr(image)?;

        let channels = image.channels_ref();
        let points = channels[0]
            .samples()
            .iter()
            .zip(channels[1].samples())
            .zip(channels[2].samples())
            .map(|((b, g), r)| [f32::from(*b), f32::from(*g), f32::from(*r)])
            .collect::<Vec<Point>>();

        let mut rng = match self.options.seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new()
        };

        let Some(clustering) = kmeans(&points, self.options.k, &self.options, &mut rng) else {
            return Ok(());
        };
        trace!("Clustered into {} colors", clustering.centers.len());

        let centers = clustering
            .centers
            .iter()
            .map(|c| c.map(|x| x as u8))
            .collect::<Vec<[u8; 3]>>();

        for (component, samples) in image.channels_mut().enumerate() {
            for (sample, label) in samples.iter_mut().zip(&clustering.labels) {
                *sample = centers[*label][component];
            }
        }
        Ok(())
    }
}

/// Color clustering followed by Otsu binarization of the clustered image
#[derive(Copy, Clone, Debug, Default)]
pub struct KMeansMask {
    kmeans: KMeans
}

impl KMeansMask {
    #[must_use]
    pub fn new(kmeans: KMeans) -> KMeansMask {
        KMeansMask { kmeans }
    }

    /// Same parameters as [`KMeans::from_params`]
    #[must_use]
    pub fn from_params(params: &FilterParams) -> KMeansMask {
        KMeansMask::new(KMeans::from_params(params))
    }
}

impl OperationsTrait for KMeansMask {
    fn name(&self) -> &'static str {
        "KMeans mask"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        self.kmeans.execute(image)?;

        with_luma(image, |luma| {
            for samples in luma.channels_mut() {
                otsu_threshold(samples);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use lumen_image::image::Image;
    use lumen_image::traits::OperationsTrait;
    use nanorand::{Rng, WyRand};

    use crate::kmeans::{kmeans, KMeans, KMeansMask, KMeansOptions};
    use crate::params::FilterParams;

    #[test]
    fn one_cluster_is_the_mean() {
        let image = Image::from_fn(4, 4, ColorSpace::BGR, |x, y, px| {
            *px = if (x + y) % 2 == 0 { [0, 0, 0] } else { [10, 20, 30] };
        })
        .unwrap();

        let out = KMeans::new(1).clone_and_execute(&image).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y), Some([5, 10, 15]));
            }
        }
    }

    #[test]
    fn k_is_clamped_to_pixel_count() {
        let image = Image::from_u8(&[1, 2, 3, 4, 5, 6], 2, 1, ColorSpace::BGR).unwrap();

        let out = KMeans::new(50).with_seed(1).clone_and_execute(&image).unwrap();
        assert_eq!(out, image);

        let out = KMeans::new(-3).clone_and_execute(&image).unwrap();
        assert_eq!(out.pixel(0, 0), Some([2, 3, 4]));
    }

    #[test]
    fn seeded_runs_repeat() {
        let mut pixels = vec![0_u8; 30 * 20 * 3];
        WyRand::new_seed(99).fill(&mut pixels);
        let image = Image::from_u8(&pixels, 30, 20, ColorSpace::BGR).unwrap();

        let a = KMeans::new(4).with_seed(5).clone_and_execute(&image).unwrap();
        let b = KMeans::new(4).with_seed(5).clone_and_execute(&image).unwrap();
        assert_eq!(a, b);

        let mut colors = a
            .flatten_u8()
            .chunks_exact(3)
            .map(|x| [x[0], x[1], x[2]])
            .collect::<Vec<_>>();
        colors.sort_unstable();
        colors.dedup();
        assert!(colors.len() <= 4);
    }

    #[test]
    fn luma_input_is_expanded() {
        let image = Image::from_fn(6, 6, ColorSpace::Luma, |x, _, px| {
            px[0] = if x < 3 { 40 } else { 220 };
        })
        .unwrap();
        let out = KMeans::new(2).with_seed(3).clone_and_execute(&image).unwrap();

        assert_eq!(out.colorspace(), ColorSpace::BGR);
        assert_eq!(out.pixel(0, 0), Some([40; 3]));
        assert_eq!(out.pixel(5, 5), Some([220; 3]));
    }

    #[test]
    fn empty_clusters_are_refilled() {
        // more clusters than distinct colors
        let points = vec![[0.0, 0.0, 0.0]; 5]
            .into_iter()
            .chain(vec![[100.0, 100.0, 100.0]; 5])
            .collect::<Vec<_>>();
        let options = KMeansOptions::default();

        let result = kmeans(&points, 3, &options, &mut WyRand::new_seed(11)).unwrap();
        assert_eq!(result.centers.len(), 3);
        assert_eq!(result.compactness, 0.0);

        assert!(kmeans(&[], 3, &options, &mut WyRand::new_seed(11)).is_none());
    }

    #[test]
    fn options_from_params() {
        let params = FilterParams::new()
            .with("k", 0)
            .with("attempts", -1)
            .with("epsilon", -2.0)
            .with("seed", 42);
        let options = KMeansOptions::from_params(&params);

        assert_eq!(options.k, 1);
        assert_eq!(options.attempts, 1);
        assert_eq!(options.max_iterations, 20);
        assert_eq!(options.epsilon, 1.0);
        assert_eq!(options.seed, Some(42));
        assert_eq!(KMeansOptions::from_params(&FilterParams::new()), KMeansOptions::default());
    }

    #[test]
    fn mask_splits_clusters() {
        let image = Image::from_fn(10, 10, ColorSpace::BGR, |x, y, px| {
            *px = if x + y < 10 { [20, 30, 40] } else { [200, 210, 220] };
        })
        .unwrap();
        let mask = KMeansMask::new(KMeans::new(2).with_seed(8))
            .clone_and_execute(&image)
            .unwrap();

        assert_eq!(mask.pixel(0, 0), Some([0; 3]));
        assert_eq!(mask.pixel(9, 9), Some([255; 3]));
    }
}
