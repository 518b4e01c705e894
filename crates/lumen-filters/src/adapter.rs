/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Grayscale entry and color exit shared by the luminance filters
//!
//! Thresholding, morphology and edge filters work on intensity but hand
//! back BGR images, [`with_luma`] is the one place that conversion happens.
use lumen_core::colorspace::ColorSpace;
use lumen_image::core_filters::colorspace::ColorspaceConv;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

/// Convert `image` to Luma, run `func` on it and convert the result to BGR
///
/// `func` receives a single channel image, whatever it leaves
/// in that channel is replicated into the three output channels.
///
/// # Errors
/// Anything `func` or the conversion returns
pub fn with_luma<F>(image: &mut Image, func: F) -> Result<(), ImageErrors>
where
    F: FnOnce(&mut Image) -> Result<(), ImageErrors>
{
    ColorspaceConv::new(ColorSpace::Luma).execute(image)?;
    func(image)?;
    into_bgr(image)
}

/// Convert `image` to BGR in place, a no-op for BGR images
///
/// # Errors
/// If the conversion fails
pub fn into_bgr(image: &mut Image) -> Result<(), ImageErrors> {
    ColorspaceConv::new(ColorSpace::BGR).execute(image)
}
