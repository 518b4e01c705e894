/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Gaussian smoothing
//!
//! The kernel is the outer product of two one dimensional Gaussians so it
//! is applied as a horizontal pass followed by a vertical pass. Every channel
//! is filtered, the colorspace of the input is kept.
use lumen_core::log::{debug, trace};
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::convolve::{correlate_separable, OutputMapping};
use crate::kernel::{gaussian_1d, gaussian_side_for_sigma, is_usable_sigma, normalize_odd};
use crate::params::FilterParams;

/// Spread used when none is given
pub const DEFAULT_SIGMA: f64 = 3.0;

/// Side of the parameterless low pass filter
pub const FIXED_KERNEL_SIDE: usize = 15;

/// Gaussian blur
///
/// # Example
/// - The parameterless low pass, a 15x15 kernel with a spread derived from its size
/// ```
/// use lumen_core::colorspace::ColorSpace;
/// use lumen_image::image::Image;
/// use lumen_image::traits::OperationsTrait;
/// use lumen_filters::gaussian_blur::GaussianBlur;
///
/// let image = Image::fill(30, ColorSpace::BGR, 20, 20).unwrap();
/// let blurred = GaussianBlur::fixed().clone_and_execute(&image).unwrap();
/// // a flat image stays flat
/// assert_eq!(blurred, image);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GaussianBlur {
    rows:  usize,
    cols:  usize,
    sigma: f64
}

impl GaussianBlur {
    /// A square blur with a side of `2*floor(4*sigma+0.5)+1`
    ///
    /// A non finite sigma is replaced by the default of 3.0, one too small
    /// to square is derived from the size
    #[must_use]
    pub fn new(sigma: f64) -> GaussianBlur {
        let sigma = sanitize_sigma(sigma);
        let side = gaussian_side_for_sigma(sigma);

        GaussianBlur {
            rows: side,
            cols: side,
            sigma
        }
    }

    /// A blur of `rows x cols`, each normalized to an odd size
    ///
    /// A non positive sigma is derived from the size of each axis
    #[must_use]
    pub fn with_shape(rows: i64, cols: i64, sigma: f64) -> GaussianBlur {
        GaussianBlur {
            rows:  normalize_odd(rows),
            cols:  normalize_odd(cols),
            sigma: sanitize_sigma(sigma)
        }
    }

    /// The parameterless low pass, 15x15 with a derived spread of 2.6
    #[must_use]
    pub fn fixed() -> GaussianBlur {
        let side = FIXED_KERNEL_SIDE as i64;
        GaussianBlur::with_shape(side, side, 0.0)
    }

    /// Read `sigma` (default 3.0) and the optional `filter_shape` pair
    #[must_use]
    pub fn from_params(params: &FilterParams) -> GaussianBlur {
        let sigma = params.float_or("sigma", DEFAULT_SIGMA);

        match params.pair("filter_shape") {
            Some((rows, cols)) => GaussianBlur::with_shape(rows, cols, sigma),
            None => GaussianBlur::new(sigma)
        }
    }

    /// Kernel size as `(rows, cols)`
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub const fn sigma(&self) -> f64 {
        self.sigma
    }
}

fn sanitize_sigma(sigma: f64) -> f64 {
    if !sigma.is_finite() {
        debug!("Sigma {sigma} is not finite, using {DEFAULT_SIGMA}");
        return DEFAULT_SIGMA;
    }
    if sigma > 0.0 && !is_usable_sigma(sigma) {
        debug!("Sigma {sigma} is too small, deriving it from the kernel size");
        return 0.0;
    }
    sigma
}

impl OperationsTrait for GaussianBlur {
    fn name(&self) -> &'static str {
        "Gaussian blur"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();

        trace!(
            "Gaussian blur with a {}x{} kernel and sigma {}",
            self.rows,
            self.cols,
            self.sigma
        );

        let row_weights = gaussian_1d(self.cols, self.sigma);
        let column_weights = gaussian_1d(self.rows, self.sigma);

        for samples in image.channels_mut() {
            let response = correlate_separable(samples, width, height, &row_weights, &column_weights);

            OutputMapping::Saturate.map_into(&response, samples);
        }
        Ok(())
    }
}
