/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Binarization of grayscale images
//!
//! Both operations convert the image to grayscale, map every sample to
//! either 0 or 255 and hand back a BGR mask.
//!
//! - [`Threshold`]: samples `>= level` become 255
//! - [`OtsuThreshold`]: the level is chosen from the image histogram
use lumen_core::log::debug;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::adapter::with_luma;
use crate::histogram::histogram;
use crate::params::FilterParams;

/// Level used when none is given
pub const DEFAULT_THRESHOLD: u8 = 90;

/// Value of foreground pixels in a mask
pub const MASK_HIGH: u8 = 255;
/// Value of background pixels in a mask
pub const MASK_LOW: u8 = 0;

/// Binarize `channel` in place, samples `>= level` become [`MASK_HIGH`]
pub fn threshold(channel: &mut [u8], level: u8) {
    for x in channel.iter_mut() {
        *x = if *x >= level { MASK_HIGH } else { MASK_LOW };
    }
}

/// Find the split that maximizes between class variance
///
/// The returned value is the last intensity of the lower class, the upper
/// class starts at `level + 1`. Splits leaving a class empty are skipped, if
/// every split does (a flat image) zero is returned. Ties keep the lowest level.
#[must_use]
pub fn otsu_level(histogram: &[u32; 256]) -> u8 {
    let total = histogram.iter().map(|x| u64::from(*x)).sum::<u64>();
    let total_sum = histogram
        .iter()
        .enumerate()
        .map(|(value, count)| value as u64 * u64::from(*count))
        .sum::<u64>();

    let mut best_level = 0;
    let mut best_variance = 0.0_f64;

    let mut weight_low = 0_u64;
    let mut sum_low = 0_u64;

    for (level, count) in (0_u8..=255).zip(histogram) {
        weight_low += u64::from(*count);
        sum_low += u64::from(level) * u64::from(*count);

        if weight_low == 0 {
            continue;
        }
        if weight_low == total {
            break;
        }
        let weight_high = total - weight_low;

        let mean_low = sum_low as f64 / weight_low as f64;
        let mean_high = (total_sum - sum_low) as f64 / weight_high as f64;
        let diff = mean_low - mean_high;

        let variance = (weight_low as f64) * (weight_high as f64) * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_level = level;
        }
    }
    best_level
}

/// Binarize `channel` at the level picked by [`otsu_level`]
///
/// Returns the level the lower class ends at
pub fn otsu_threshold(channel: &mut [u8]) -> u8 {
    let level = otsu_level(&histogram(channel));

    debug!("Otsu picked level {level}");

    // the lower class always ends below 255, so this does not overflow
    threshold(channel, level.saturating_add(1));
    level
}

/// Fixed level binarization
///
/// # Example
/// ```
/// use lumen_core::colorspace::ColorSpace;
/// use lumen_image::image::Image;
/// use lumen_image::traits::OperationsTrait;
/// use lumen_filters::threshold::Threshold;
///
/// let image = Image::fill(89, ColorSpace::Luma, 3, 3).unwrap();
/// let mask = Threshold::new(90).clone_and_execute(&image).unwrap();
/// assert_eq!(mask.pixel(1, 1), Some([0, 0, 0]));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Threshold {
    level: u8
}

impl Threshold {
    #[must_use]
    pub fn new(level: u8) -> Threshold {
        Threshold { level }
    }

    /// Read `threshold_value` (default 90), clamped to `[0,255]`
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_params(params: &FilterParams) -> Threshold {
        let level = params
            .int_or("threshold_value", i64::from(DEFAULT_THRESHOLD))
            .clamp(0, 255);

        Threshold::new(level as u8)
    }

    pub const fn level(&self) -> u8 {
        self.level
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::new(DEFAULT_THRESHOLD)
    }
}

impl OperationsTrait for Threshold {
    fn name(&self) -> &'static str {
        "Threshold"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        with_luma(image, |luma| {
            for samples in luma.channels_mut() {
                threshold(samples, self.level);
            }
            Ok(())
        })
    }
}

/// Automatic binarization with Otsu's method
#[derive(Copy, Clone, Debug, Default)]
pub struct OtsuThreshold;

impl OtsuThreshold {
    #[must_use]
    pub fn new() -> OtsuThreshold {
        OtsuThreshold
    }
}

impl OperationsTrait for OtsuThreshold {
    fn name(&self) -> &'static str {
        "Otsu Threshold"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        with_luma(image, |luma| {
            for samples in luma.channels_mut() {
                otsu_threshold(samples);
            }
            Ok(())
        })
    }
}
