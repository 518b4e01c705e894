/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Every filter behind one name
//!
//! [`Filter`] lists the available operations with a stable name, a label and
//! the parameters each one reads. [`Filter::apply`] runs any of them with a
//! shared [`FilterParams`] bag, so a front end does not need to know which
//! parameters a filter takes.
//!
//! ```
//! use lumen_core::colorspace::ColorSpace;
//! use lumen_image::image::Image;
//! use lumen_filters::filters::Filter;
//! use lumen_filters::params::FilterParams;
//!
//! let image = Image::fill(120, ColorSpace::BGR, 16, 16).unwrap();
//! let params = FilterParams::new().with("kernel_size", 3).with("sigma", 1.0);
//!
//! for filter in Filter::ALL {
//!     let out = filter.apply(Some(&image), &params).unwrap().unwrap();
//!     assert_eq!(out.dimensions(), (16, 16));
//! }
//! // nothing loaded yet, nothing to do
//! assert!(Filter::Otsu.apply(None, &params).unwrap().is_none());
//! ```
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use lumen_core::log::info;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::gaussian_blur::GaussianBlur;
use crate::kmeans::{KMeans, KMeansMask};
use crate::laplacian::Laplacian;
use crate::mean_blur::MeanBlur;
use crate::morphology::{Closing, Dilate, Erode, Opening};
use crate::params::FilterParams;
use crate::sobel::Sobel;
use crate::threshold::{OtsuThreshold, Threshold};

/// A numeric parameter a filter reads, with the range a slider should offer
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParameterSpec {
    pub name:    &'static str,
    pub min:     f64,
    pub max:     f64,
    pub default: f64
}

impl ParameterSpec {
    const fn new(name: &'static str, min: f64, max: f64, default: f64) -> ParameterSpec {
        ParameterSpec {
            name,
            min,
            max,
            default
        }
    }
}

const THRESHOLD_VALUE: ParameterSpec = ParameterSpec::new("threshold_value", 0.0, 255.0, 90.0);
const MORPH_KERNEL_SIZE: ParameterSpec = ParameterSpec::new("kernel_size", 1.0, 15.0, 5.0);
const SIGMA: ParameterSpec = ParameterSpec::new("sigma", 1.0, 10.0, 3.0);
const MEAN_KERNEL_SIZE: ParameterSpec = ParameterSpec::new("kernel_size", 3.0, 21.0, 9.0);
const KERNEL_VALUE: ParameterSpec = ParameterSpec::new("kernel_value", 1.0, 15.0, 3.0);
const CLUSTERS: ParameterSpec = ParameterSpec::new("k", 1.0, 16.0, 3.0);

/// The available filters
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Filter {
    Threshold,
    Otsu,
    Erosion,
    Dilation,
    Opening,
    Closing,
    LowPass,
    LowPassGaussian,
    LowPassMean,
    HighPass,
    HighPassLaplacian,
    HighPassSobel,
    KMeans,
    KMeansMask
}

impl Filter {
    /// Every filter, in menu order
    pub const ALL: [Filter; 14] = [
        Filter::Threshold,
        Filter::Otsu,
        Filter::Erosion,
        Filter::Dilation,
        Filter::Opening,
        Filter::Closing,
        Filter::LowPass,
        Filter::LowPassGaussian,
        Filter::LowPassMean,
        Filter::HighPass,
        Filter::HighPassLaplacian,
        Filter::HighPassSobel,
        Filter::KMeans,
        Filter::KMeansMask
    ];

    /// Stable name used on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Filter::Threshold => "threshold",
            Filter::Otsu => "otsu",
            Filter::Erosion => "erosion",
            Filter::Dilation => "dilation",
            Filter::Opening => "opening",
            Filter::Closing => "closing",
            Filter::LowPass => "low-pass",
            Filter::LowPassGaussian => "low-pass-gaussian",
            Filter::LowPassMean => "low-pass-mean",
            Filter::HighPass => "high-pass",
            Filter::HighPassLaplacian => "high-pass-laplacian",
            Filter::HighPassSobel => "high-pass-sobel",
            Filter::KMeans => "kmeans",
            Filter::KMeansMask => "kmeans-mask"
        }
    }

    /// Human readable label
    pub const fn label(self) -> &'static str {
        match self {
            Filter::Threshold => "Thresholding (fixed)",
            Filter::Otsu => "Thresholding (Otsu)",
            Filter::Erosion => "Erosion",
            Filter::Dilation => "Dilation",
            Filter::Opening => "Opening",
            Filter::Closing => "Closing",
            Filter::LowPass => "Low Pass (Gaussian 15x15)",
            Filter::LowPassGaussian => "Low Pass (Gaussian sigma)",
            Filter::LowPassMean => "Low Pass (Mean)",
            Filter::HighPass => "High Pass (Laplacian)",
            Filter::HighPassLaplacian => "High Pass (Laplacian custom)",
            Filter::HighPassSobel => "High Pass (Sobel)",
            Filter::KMeans => "K-means segmentation",
            Filter::KMeansMask => "K-means mask"
        }
    }

    /// Numeric parameters with slider ranges
    ///
    /// Filters may read more names than listed, e.g `filter_shape`,
    /// `direction` or `seed`, those have no sensible slider
    pub fn parameters(self) -> &'static [ParameterSpec] {
        match self {
            Filter::Threshold => &[THRESHOLD_VALUE],
            Filter::Erosion | Filter::Dilation | Filter::Opening | Filter::Closing => {
                &[MORPH_KERNEL_SIZE]
            }
            Filter::LowPassGaussian => &[SIGMA],
            Filter::LowPassMean => &[MEAN_KERNEL_SIZE],
            Filter::HighPassLaplacian => &[KERNEL_VALUE],
            Filter::KMeans | Filter::KMeansMask => &[CLUSTERS],
            Filter::Otsu | Filter::LowPass | Filter::HighPass | Filter::HighPassSobel => &[]
        }
    }

    /// Build the operation this filter runs
    pub fn operation(self, params: &FilterParams) -> Box<dyn OperationsTrait> {
        match self {
            Filter::Threshold => Box::new(Threshold::from_params(params)),
            Filter::Otsu => Box::new(OtsuThreshold::new()),
            Filter::Erosion => Box::new(Erode::from_params(params)),
            Filter::Dilation => Box::new(Dilate::from_params(params)),
            Filter::Opening => Box::new(Opening::from_params(params)),
            Filter::Closing => Box::new(Closing::from_params(params)),
            Filter::LowPass => Box::new(GaussianBlur::fixed()),
            Filter::LowPassGaussian => Box::new(GaussianBlur::from_params(params)),
            Filter::LowPassMean => Box::new(MeanBlur::from_params(params)),
            Filter::HighPass => Box::new(Laplacian::fixed()),
            Filter::HighPassLaplacian => Box::new(Laplacian::from_params(params)),
            Filter::HighPassSobel => Box::new(Sobel::from_params(params)),
            Filter::KMeans => Box::new(KMeans::from_params(params)),
            Filter::KMeansMask => Box::new(KMeansMask::from_params(params))
        }
    }

    /// Run the filter on a copy of `image`
    ///
    /// Parameters the filter does not know are ignored, missing ones take
    /// their defaults. Returns `Ok(None)` when there is no image.
    ///
    /// # Errors
    /// If the image is structurally unusable for the filter
    pub fn apply(self, image: Option<&Image>, params: &FilterParams) -> Result<Option<Image>, ImageErrors> {
        info!("Applying {} filter", self.name());

        self.operation(params).execute_optional(image)
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returned when parsing an unknown filter name
pub struct UnknownFilter(pub String);

impl Debug for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names = Filter::ALL.map(Filter::name);
        writeln!(f, "Unknown filter {:?}, expected one of {}", self.0, names.join(", "))
    }
}

impl Display for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");

        Filter::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}
