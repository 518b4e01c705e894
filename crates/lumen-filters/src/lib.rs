/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image filters for `lumen-image`
//!
//! This implements segmentation, morphology, smoothing and edge filters
//! on top of the [`OperationsTrait`](lumen_image::traits::OperationsTrait)
//! defined by `lumen-image`.
//!
//! Every filter can be driven in two ways
//! - directly, by constructing the operation, e.g [`threshold::Threshold`]
//! - through the [`filters::Filter`] registry with a loosely typed
//!   [`params::FilterParams`] bag, which is what front ends use
//!
//! Numeric parameters are never rejected, out of range values are clamped
//! and even kernel sizes are rounded up to the next odd size.
//!
//! # Example
//! - Binarize an image at level 90
//! ```
//! use lumen_core::colorspace::ColorSpace;
//! use lumen_image::image::Image;
//! use lumen_image::traits::OperationsTrait;
//! use lumen_filters::threshold::Threshold;
//!
//! let image = Image::fill(120, ColorSpace::BGR, 100, 100).unwrap();
//! let mask = Threshold::new(90).clone_and_execute(&image).unwrap();
//! assert_eq!(mask.pixel(0, 0), Some([255, 255, 255]));
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]

pub mod adapter;
pub mod convolve;
pub mod filters;
pub mod gaussian_blur;
pub mod histogram;
pub mod kernel;
pub mod kmeans;
pub mod laplacian;
pub mod mean_blur;
pub mod morphology;
pub mod pad;
pub mod params;
pub mod sobel;
pub mod spatial;
pub mod threshold;
