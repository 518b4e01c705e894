/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Morphological filters
//!
//! Erosion takes the minimum and dilation the maximum over the footprint of a
//! structuring element. Opening and closing first binarize the image and then
//! chain the two primitives.
//!
//! All of them work on the grayscale image and return BGR.
//!
//! Borders are replicated, which for a minimum or maximum is the same as
//! ignoring samples outside the image.
use lumen_core::log::trace;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::adapter::with_luma;
use crate::kernel::Kernel;
use crate::pad::pad;
use crate::params::FilterParams;
use crate::spatial::spatial;
use crate::threshold::{otsu_threshold, threshold, DEFAULT_THRESHOLD};

/// Structuring element size used when none is given
pub const DEFAULT_KERNEL_SIZE: i64 = 5;

/// Number of times [`Erode`] applies the minimum
pub const ERODE_ITERATIONS: usize = 2;

/// The statistic gathered over the structuring element
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MorphOperation {
    /// min, shrinks bright regions
    Erode,
    /// max, grows bright regions
    Dilate
}

/// Apply `operation` once over the footprint of `element`
///
/// Only cells where the element is non zero take part
pub fn morph(
    channel: &mut [u8], width: usize, height: usize, element: &Kernel, operation: MorphOperation
) {
    let (radius_x, radius_y) = element.radius();

    if radius_x == 0 && radius_y == 0 {
        // a single cell footprint is the identity
        return;
    }
    let padded = pad(channel, width, height, radius_x, radius_y);
    let weights = element.weights();

    match operation {
        MorphOperation::Erode => {
            spatial(&padded, channel, radius_x, radius_y, width, height, |window: &[u8]| {
                footprint(window, weights).min().unwrap_or(u8::MAX)
            });
        }
        MorphOperation::Dilate => {
            spatial(&padded, channel, radius_x, radius_y, width, height, |window: &[u8]| {
                footprint(window, weights).max().unwrap_or(u8::MIN)
            });
        }
    }
}

fn footprint<'a>(window: &'a [u8], weights: &'a [f32]) -> impl Iterator<Item = u8> + 'a {
    window
        .iter()
        .zip(weights)
        .filter(|(_, weight)| **weight != 0.0)
        .map(|(x, _)| *x)
}

fn kernel_size_from_params(params: &FilterParams) -> i64 {
    params.int_or("kernel_size", DEFAULT_KERNEL_SIZE)
}

/// Grayscale erosion with a square element, applied twice
#[derive(Clone, Debug)]
pub struct Erode {
    element:    Kernel,
    iterations: usize
}

impl Erode {
    /// Create an erosion with a `kernel_size` element, see
    /// [`Kernel::structuring_element`] for normalization
    #[must_use]
    pub fn new(kernel_size: i64) -> Erode {
        Erode {
            element:    Kernel::structuring_element(kernel_size),
            iterations: ERODE_ITERATIONS
        }
    }

    /// Read `kernel_size` (default 5)
    #[must_use]
    pub fn from_params(params: &FilterParams) -> Erode {
        Erode::new(kernel_size_from_params(params))
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Erode {
        self.iterations = iterations;
        self
    }
}

impl OperationsTrait for Erode {
    fn name(&self) -> &'static str {
        "Erode"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();

        with_luma(image, |luma| {
            for samples in luma.channels_mut() {
                for _ in 0..self.iterations {
                    morph(samples, width, height, &self.element, MorphOperation::Erode);
                }
            }
            Ok(())
        })
    }
}

/// Grayscale dilation with a square element, applied once
#[derive(Clone, Debug)]
pub struct Dilate {
    element: Kernel
}

impl Dilate {
    #[must_use]
    pub fn new(kernel_size: i64) -> Dilate {
        Dilate {
            element: Kernel::structuring_element(kernel_size)
        }
    }

    /// Read `kernel_size` (default 5)
    #[must_use]
    pub fn from_params(params: &FilterParams) -> Dilate {
        Dilate::new(kernel_size_from_params(params))
    }
}

impl OperationsTrait for Dilate {
    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();

        with_luma(image, |luma| {
            for samples in luma.channels_mut() {
                morph(samples, width, height, &self.element, MorphOperation::Dilate);
            }
            Ok(())
        })
    }
}

/// Otsu binarization followed by an erosion and a dilation
///
/// Removes bright specks smaller than the element while keeping large shapes
#[derive(Clone, Debug)]
pub struct Opening {
    element: Kernel
}

impl Opening {
    #[must_use]
    pub fn new(kernel_size: i64) -> Opening {
        Opening {
            element: Kernel::structuring_element(kernel_size)
        }
    }

    /// Read `kernel_size` (default 5)
    #[must_use]
    pub fn from_params(params: &FilterParams) -> Opening {
        Opening::new(kernel_size_from_params(params))
    }
}

impl OperationsTrait for Opening {
    fn name(&self) -> &'static str {
        "Opening"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();

        with_luma(image, |luma| {
            for samples in luma.channels_mut() {
                let level = otsu_threshold(samples);
                trace!("Opening after segmenting at {level}");

                morph(samples, width, height, &self.element, MorphOperation::Erode);
                morph(samples, width, height, &self.element, MorphOperation::Dilate);
            }
            Ok(())
        })
    }
}

/// Binarization at level 90 followed by a dilation and an erosion
///
/// Fills dark gaps smaller than the element
#[derive(Clone, Debug)]
pub struct Closing {
    element: Kernel
}

impl Closing {
    #[must_use]
    pub fn new(kernel_size: i64) -> Closing {
        Closing {
            element: Kernel::structuring_element(kernel_size)
        }
    }

    /// Read `kernel_size` (default 5)
    #[must_use]
    pub fn from_params(params: &FilterParams) -> Closing {
        Closing::new(kernel_size_from_params(params))
    }
}

impl OperationsTrait for Closing {
    fn name(&self) -> &'static str {
        "Closing"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();

        with_luma(image, |luma| {
            for samples in luma.channels_mut() {
                threshold(samples, DEFAULT_THRESHOLD);
                morph(samples, width, height, &self.element, MorphOperation::Dilate);
                morph(samples, width, height, &self.element, MorphOperation::Erode);
            }
            Ok(())
        })
    }
}
