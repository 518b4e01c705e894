/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Laplacian edge filters
//!
//! Two flavours are provided
//! - [`Laplacian::fixed`]: the 3x3 four neighbour Laplacian, reported as a magnitude
//! - [`Laplacian::sharpening`]: a configurable all-neighbour kernel whose
//!   negative responses clip to black
//!
//! Both run on the grayscale image and return BGR.
use lumen_core::log::trace;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::adapter::with_luma;
use crate::convolve::{Convolve, OutputMapping};
use crate::kernel::Kernel;
use crate::params::FilterParams;

/// Side of the sharpening kernel used when none is given
pub const DEFAULT_KERNEL_VALUE: i64 = 3;

/// A Laplacian style high pass filter
#[derive(Clone, Debug)]
pub struct Laplacian {
    kernel:  Kernel,
    mapping: OutputMapping
}

impl Laplacian {
    /// The 3x3 Laplacian
    ///
    /// ```text
    /// 0  1  0
    /// 1 -4  1
    /// 0  1  0
    /// ```
    /// Output is the absolute response, rounded and saturated
    #[must_use]
    pub fn fixed() -> Laplacian {
        Laplacian {
            kernel:  Kernel::laplacian_3x3(),
            mapping: OutputMapping::AbsoluteSaturate
        }
    }

    /// Sharpening kernel of side `kernel_value` normalized to odd,
    /// see [`Kernel::sharpening`]
    ///
    /// Output is rounded and saturated, negative responses become 0
    #[must_use]
    pub fn sharpening(kernel_value: i64) -> Laplacian {
        Laplacian {
            kernel:  Kernel::sharpening(kernel_value),
            mapping: OutputMapping::Saturate
        }
    }

    /// Read `kernel_value` (default 3)
    #[must_use]
    pub fn from_params(params: &FilterParams) -> Laplacian {
        Laplacian::sharpening(params.int_or("kernel_value", DEFAULT_KERNEL_VALUE))
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}

impl OperationsTrait for Laplacian {
    fn name(&self) -> &'static str {
        "Laplacian"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        trace!("Laplacian with a {0}x{0} kernel", self.kernel.rows());

        let convolve = Convolve::new(self.kernel.clone(), self.mapping);

        with_luma(image, |luma| convolve.execute(luma))
    }
}
