/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Kernel construction
//!
//! Kernels are small grids of weights, used either as structuring elements
//! for morphology (all weights 0 or 1) or as correlation weights.
//!
//! Every side of a kernel is odd so that it has a well defined center,
//! requested sizes are normalized with [`normalize_odd`], never rejected.
use crate::sobel::SobelDirection;

/// Largest side a kernel may have
///
/// Larger requests are clamped to this
pub const MAX_KERNEL_SIDE: usize = 1023;

/// Normalize a requested kernel side
///
/// Sizes below one become one and even sizes are rounded up to the
/// next odd size, so `4` and `5` both give `5`.
///
/// ```
/// use lumen_filters::kernel::normalize_odd;
/// assert_eq!(normalize_odd(4), 5);
/// assert_eq!(normalize_odd(-3), 1);
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn normalize_odd(size: i64) -> usize {
    let size = size.clamp(1, MAX_KERNEL_SIDE as i64) as usize;

    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Kernel side covering the effective support of a Gaussian with `sigma`
///
/// This is `2*floor(4*sigma+0.5)+1`, roughly eight sigmas wide,
/// non-positive spreads give a single tap
#[allow(clippy::cast_possible_truncation)]
pub fn gaussian_side_for_sigma(sigma: f64) -> usize {
    if sigma.is_nan() || sigma <= 0.0 {
        return 1;
    }
    let half = (4.0 * sigma + 0.5).floor().min(MAX_KERNEL_SIDE as f64) as i64;

    normalize_odd(2 * half + 1)
}

/// Spread used when the caller gives none
///
/// Derived from the kernel side as `0.3*((n-1)*0.5 - 1) + 0.8`
pub fn gaussian_sigma_for_side(side: usize) -> f64 {
    0.3 * ((side as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Whether `sigma` can be used as a Gaussian spread as is
///
/// Spreads whose square underflows to zero or a subnormal would give a
/// kernel of NaNs, so they are derived from the side like non-positive ones
pub fn is_usable_sigma(sigma: f64) -> bool {
    sigma > 0.0 && sigma * sigma >= f64::MIN_POSITIVE
}

/// One dimensional Gaussian weights of length `side`, summing to one
///
/// A non-positive or vanishingly small `sigma` is derived from the side
/// via [`gaussian_sigma_for_side`]
#[allow(clippy::cast_possible_truncation)]
pub fn gaussian_1d(side: usize, sigma: f64) -> Vec<f32> {
    let side = side.max(1);
    let sigma = if is_usable_sigma(sigma) {
        sigma
    } else {
        gaussian_sigma_for_side(side)
    };
    let scale = -0.5 / (sigma * sigma);
    let center = (side as f64 - 1.0) * 0.5;

    let weights = (0..side)
        .map(|i| {
            let x = i as f64 - center;
            (scale * x * x).exp()
        })
        .collect::<Vec<f64>>();

    let sum = weights.iter().sum::<f64>();

    weights.iter().map(|x| (x / sum) as f32).collect()
}

/// One dimensional averaging weights, each `1/side`
///
/// Correlating with it along x then along y averages a `side x side` box
pub fn box_1d(side: usize) -> Vec<f32> {
    let side = side.max(1);

    vec![1.0 / side as f32; side]
}

/// A rectangular grid of weights stored row by row
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
    rows:    usize,
    cols:    usize
}

impl Kernel {
    /// Square all ones structuring element
    ///
    /// The side is `size` normalized by [`normalize_odd`]
    #[must_use]
    pub fn structuring_element(size: i64) -> Kernel {
        let side = normalize_odd(size);

        Kernel {
            weights: vec![1.0; side * side],
            rows:    side,
            cols:    side
        }
    }

    /// Square sharpening kernel
    ///
    /// Every cell is `-1` except the center which is `side*side - 1`,
    /// so the weights sum to zero.
    ///
    /// ```text
    /// -1 -1 -1
    /// -1  8 -1
    /// -1 -1 -1
    /// ```
    #[must_use]
    pub fn sharpening(size: i64) -> Kernel {
        let side = normalize_odd(size);
        let mut weights = vec![-1.0; side * side];

        weights[(side * side) / 2] = (side * side - 1) as f32;

        Kernel {
            weights,
            rows: side,
            cols: side
        }
    }

    /// The four-neighbour 3x3 Laplacian
    #[must_use]
    #[rustfmt::skip]
    pub fn laplacian_3x3() -> Kernel {
        Kernel {
            weights: vec![
                0.0,  1.0, 0.0,
                1.0, -4.0, 1.0,
                0.0,  1.0, 0.0
            ],
            rows:    3,
            cols:    3
        }
    }

    /// The 3x3 Sobel derivative kernel for `direction`
    #[must_use]
    #[rustfmt::skip]
    pub fn sobel(direction: SobelDirection) -> Kernel {
        let weights = match direction {
            SobelDirection::Horizontal => vec![
                -1.0, 0.0, 1.0,
                -2.0, 0.0, 2.0,
                -1.0, 0.0, 1.0
            ],
            SobelDirection::Vertical => vec![
                -1.0, -2.0, -1.0,
                 0.0,  0.0,  0.0,
                 1.0,  2.0,  1.0
            ]
        };
        Kernel {
            weights,
            rows: 3,
            cols: 3
        }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Weights, row by row
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Distance from the center to the edges as `(x, y)`
    pub const fn radius(&self) -> (usize, usize) {
        (self.cols / 2, self.rows / 2)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.weights[row * self.cols + col])
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::convolve::{correlate, correlate_separable};
    use crate::kernel::{
        box_1d, gaussian_1d, gaussian_side_for_sigma, is_usable_sigma, normalize_odd, Kernel
    };
    use crate::sobel::SobelDirection;

    fn outer(column: &[f32], row: &[f32]) -> Kernel {
        Kernel {
            weights: column
                .iter()
                .flat_map(|c| row.iter().map(move |r| c * r))
                .collect(),
            rows:    column.len(),
            cols:    row.len()
        }
    }

    #[test]
    fn sides_are_odd_and_positive() {
        for size in -10..40 {
            let side = normalize_odd(size);
            assert_eq!(side % 2, 1, "size {size} gave {side}");
            assert!(side >= 1);

            let element = Kernel::structuring_element(size);
            assert_eq!(element.rows(), element.cols());
            assert_eq!(element.rows(), side);
        }
    }

    #[test]
    fn even_sizes_round_up() {
        assert_eq!(Kernel::structuring_element(4), Kernel::structuring_element(5));
        assert_eq!(Kernel::structuring_element(0), Kernel::structuring_element(1));
        assert!(Kernel::structuring_element(4).weights().iter().all(|x| *x == 1.0));
    }

    #[test]
    fn sharpening_sums_to_zero() {
        for size in [1, 2, 3, 7, 15] {
            let kernel = Kernel::sharpening(size);
            assert!(kernel.sum().abs() < 1e-6);
        }
        let kernel = Kernel::sharpening(3);
        assert_eq!(kernel.get(1, 1), Some(8.0));
        assert_eq!(kernel.get(0, 2), Some(-1.0));
        assert_eq!(kernel.get(3, 0), None);
    }

    #[test]
    fn box_weights_average() {
        let weights = box_1d(9);
        assert_eq!(weights.len(), 9);
        assert!((weights[0] - 1.0 / 9.0).abs() < 1e-7);
        assert!((weights.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert_eq!(box_1d(0), vec![1.0]);
    }

    #[test]
    fn gaussian_side_from_sigma() {
        assert_eq!(gaussian_side_for_sigma(3.0), 25);
        assert_eq!(gaussian_side_for_sigma(1.0), 9);
        assert_eq!(gaussian_side_for_sigma(0.0), 1);
        assert_eq!(gaussian_side_for_sigma(f64::NAN), 1);
    }

    #[test]
    fn gaussian_is_normalized_and_symmetric() {
        let weights = gaussian_1d(15, 0.0);
        assert!((weights.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert_eq!(weights[0], weights[14]);
        assert!(weights[7] > weights[6]);

        let side = gaussian_side_for_sigma(3.0);
        let kernel = outer(&gaussian_1d(side, 3.0), &gaussian_1d(side, 3.0));
        assert_eq!((kernel.rows(), kernel.cols()), (25, 25));
        assert!((kernel.sum() - 1.0).abs() < 1e-4);

        let rect = outer(&gaussian_1d(3, 1.0), &gaussian_1d(7, 1.0));
        assert_eq!(rect.radius(), (3, 1));
    }

    #[test]
    fn tiny_sigma_is_derived_from_side() {
        assert!(!is_usable_sigma(1e-200));
        assert!(!is_usable_sigma(-1.0));
        assert!(is_usable_sigma(1e-3));

        for side in [1, 5, 15] {
            let weights = gaussian_1d(side, 1e-200);
            assert!(weights.iter().all(|x| x.is_finite()), "side {side}");
            assert_eq!(weights, gaussian_1d(side, 0.0));
        }
    }

    #[test]
    fn separable_matches_full_kernel() {
        let (w, h) = (21, 17);
        let mut pixels = vec![0_u8; w * h];
        nanorand::WyRand::new_seed(7).fill(&mut pixels);

        let rows = gaussian_1d(7, 1.5);
        let cols = gaussian_1d(5, 1.5);

        let full = correlate(&pixels, w, h, &outer(&rows, &cols));
        let separable = correlate_separable(&pixels, w, h, &cols, &rows);

        for (a, b) in full.iter().zip(&separable) {
            assert!((a - b).abs() < 1e-2, "{a} vs {b}");
        }
    }

    #[test]
    fn sobel_directions_are_transposed() {
        let x = Kernel::sobel(SobelDirection::Horizontal);
        let y = Kernel::sobel(SobelDirection::Vertical);

        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(x.get(row, col), y.get(col, row));
            }
        }
        assert_eq!(Kernel::laplacian_3x3().sum(), 0.0);
    }
}
