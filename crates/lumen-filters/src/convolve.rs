/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! 2D correlation on images
//!
//! Kernels are applied as correlation, i.e the kernel is not flipped,
//! for the symmetric kernels in this crate it makes no difference, for Sobel
//! it decides the sign of the response before the absolute value is taken.
//!
//! The intermediate calculations are carried in `f32`, and mapped
//! back to eight bits with an [`OutputMapping`].
//!
//! Borders are replicated, see [`pad`](crate::pad::pad).
use lumen_core::log::trace;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::kernel::Kernel;
use crate::pad::pad;
use crate::spatial::spatial;

/// How correlation responses become eight bit samples
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMapping {
    /// Round to nearest and clamp to `[0,255]`, negative responses become 0
    Saturate,
    /// Take the absolute value, then round and clamp to `[0,255]`
    AbsoluteSaturate
}

impl OutputMapping {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn map(self, value: f32) -> u8 {
        let value = match self {
            OutputMapping::Saturate => value,
            OutputMapping::AbsoluteSaturate => value.abs()
        };
        // `as` saturates, NaN becomes zero
        value.round().clamp(0.0, 255.0) as u8
    }

    /// Map every value of `values` into `out`
    pub fn map_into(self, values: &[f32], out: &mut [u8]) {
        for (out, value) in out.iter_mut().zip(values) {
            *out = self.map(*value);
        }
    }
}

/// Correlate `kernel` with a `width*height` plane
///
/// Returns the raw response for every pixel
pub fn correlate(channel: &[u8], width: usize, height: usize, kernel: &Kernel) -> Vec<f32> {
    let (radius_x, radius_y) = kernel.radius();
    let padded = pad(channel, width, height, radius_x, radius_y);

    let weights = kernel.weights();
    let mut out = vec![0.0; width * height];

    spatial(&padded, &mut out, radius_x, radius_y, width, height, |window: &[u8]| {
        window
            .iter()
            .zip(weights)
            .map(|(x, weight)| f32::from(*x) * weight)
            .sum::<f32>()
    });
    out
}

/// Correlate a plane with the outer product of `column_weights` and `row_weights`
///
/// This runs a horizontal pass with `row_weights` followed by a vertical
/// pass with `column_weights`, both lengths are expected to be odd.
pub fn correlate_separable(
    channel: &[u8], width: usize, height: usize, row_weights: &[f32], column_weights: &[f32]
) -> Vec<f32> {
    let radius_x = row_weights.len() / 2;
    let radius_y = column_weights.len() / 2;

    let dot = |window: &[f32], weights: &[f32]| {
        window
            .iter()
            .zip(weights)
            .map(|(x, weight)| x * weight)
            .sum::<f32>()
    };

    let padded = pad(channel, width, height, radius_x, 0);
    let mut horizontal = vec![0.0; width * height];

    spatial(&padded, &mut horizontal, radius_x, 0, width, height, |window: &[u8]| {
        window
            .iter()
            .zip(row_weights)
            .map(|(x, weight)| f32::from(*x) * weight)
            .sum::<f32>()
    });

    let padded = pad(&horizontal, width, height, 0, radius_y);
    let mut out = vec![0.0; width * height];

    spatial(&padded, &mut out, 0, radius_y, width, height, |window: &[f32]| {
        dot(window, column_weights)
    });
    out
}

/// Correlate every channel of an image with a kernel
///
/// # Example
/// - Sharpen a grayscale image
///
/// ```
/// use lumen_core::colorspace::ColorSpace;
/// use lumen_image::image::Image;
/// use lumen_image::traits::OperationsTrait;
/// use lumen_filters::convolve::{Convolve, OutputMapping};
/// use lumen_filters::kernel::Kernel;
///
/// let mut image = Image::from_fn(10, 10, ColorSpace::Luma, |x, y, px| {
///     px[0] = (x * 20 + y) as u8;
/// })
/// .unwrap();
/// Convolve::new(Kernel::sharpening(3), OutputMapping::Saturate)
///     .execute(&mut image)
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Convolve {
    kernel:  Kernel,
    mapping: OutputMapping
}

impl Convolve {
    #[must_use]
    pub fn new(kernel: Kernel, mapping: OutputMapping) -> Convolve {
        Convolve { kernel, mapping }
    }
}

impl OperationsTrait for Convolve {
    fn name(&self) -> &'static str {
        "2D correlation"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();

        trace!(
            "Correlating with a {}x{} kernel",
            self.kernel.rows(),
            self.kernel.cols()
        );

        for samples in image.channels_mut() {
            let response = correlate(samples, width, height, &self.kernel);

            self.mapping.map_into(&response, samples);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::convolve::{correlate, OutputMapping};
    use crate::kernel::Kernel;

    #[test]
    fn mapping_rounds_and_saturates() {
        assert_eq!(OutputMapping::Saturate.map(-12.0), 0);
        assert_eq!(OutputMapping::Saturate.map(300.0), 255);
        assert_eq!(OutputMapping::Saturate.map(10.5), 11);
        assert_eq!(OutputMapping::Saturate.map(10.49), 10);
        assert_eq!(OutputMapping::AbsoluteSaturate.map(-12.4), 12);
        assert_eq!(OutputMapping::AbsoluteSaturate.map(-1000.0), 255);
        assert_eq!(OutputMapping::Saturate.map(f32::NAN), 0);
    }

    #[test]
    fn identity_kernel_keeps_plane() {
        let mut pixels = vec![0_u8; 13 * 7];
        nanorand::WyRand::new_seed(3).fill(&mut pixels);

        let response = correlate(&pixels, 13, 7, &Kernel::structuring_element(1));
        for (a, b) in response.iter().zip(&pixels) {
            assert_eq!(*a, f32::from(*b));
        }
    }

    #[test]
    fn correlation_does_not_flip() {
        // a ramp increasing to the right gives a positive x derivative
        let pixels = (0..25).map(|x| (x % 5) as u8 * 10).collect::<Vec<u8>>();
        let kernel = Kernel::sobel(crate::sobel::SobelDirection::Horizontal);

        let response = correlate(&pixels, 5, 5, &kernel);
        assert_eq!(response[12], 80.0);
    }
}
