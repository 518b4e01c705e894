/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Mean (box) smoothing
//!
//! Every output sample is the average of the `k x k` window around it.
//! A box kernel is separable, so it runs as two one dimensional passes.
use lumen_core::log::trace;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::convolve::{correlate_separable, OutputMapping};
use crate::kernel::{box_1d, normalize_odd};
use crate::params::FilterParams;

/// Window size used when none is given
pub const DEFAULT_KERNEL_SIZE: i64 = 9;

/// Average every sample with its neighbours
///
/// All channels are filtered and the colorspace is kept
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MeanBlur {
    side: usize
}

impl MeanBlur {
    /// Create a mean blur, `kernel_size` is normalized to an odd size
    #[must_use]
    pub fn new(kernel_size: i64) -> MeanBlur {
        MeanBlur {
            side: normalize_odd(kernel_size)
        }
    }

    /// Read `kernel_size` (default 9)
    #[must_use]
    pub fn from_params(params: &FilterParams) -> MeanBlur {
        MeanBlur::new(params.int_or("kernel_size", DEFAULT_KERNEL_SIZE))
    }

    pub const fn side(&self) -> usize {
        self.side
    }
}

impl Default for MeanBlur {
    fn default() -> Self {
        MeanBlur::new(DEFAULT_KERNEL_SIZE)
    }
}

impl OperationsTrait for MeanBlur {
    fn name(&self) -> &'static str {
        "Mean blur"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();

        trace!("Mean blur over a {0}x{0} window", self.side);

        let weights = box_1d(self.side);

        for samples in image.channels_mut() {
            let response = correlate_separable(samples, width, height, &weights, &weights);

            OutputMapping::Saturate.map_into(&response, samples);
        }
        Ok(())
    }
}
