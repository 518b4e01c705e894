/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image processing
use std::fmt::{Debug, Display, Formatter};

use lumen_core::colorspace::ColorSpace;

/// All possible image errors that can occur.
///
/// Filters never fail on absent input or odd numeric parameters,
/// these are only raised for images that are structurally invalid
/// for the requested operation.
pub enum ImageErrors {
    /// Width or height was zero
    ZeroDimensions(usize, usize),
    /// Expected length and the length actually found
    DimensionsMisMatch(usize, usize),
    /// The colorspace the image is in, the operation and the colorspaces it accepts
    UnsupportedColorspace(ColorSpace, &'static str, &'static [ColorSpace]),
    OperationsError(ImageOperationsErrors),
    GenericString(String),
    GenericStr(&'static str)
}

/// Errors that may occur during image operations
pub enum ImageOperationsErrors {
    /// Unexpected colorspace
    WrongColorspace(ColorSpace, ColorSpace),
    /// Wrong number of components
    WrongComponents(usize, usize),
    /// Channel layout does not match expected
    InvalidChannelLayout(&'static str),
    /// Generic errors
    Generic(&'static str),
    /// Generic errors which have more context
    GenericString(String)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimensions(width, height) => {
                writeln!(
                    f,
                    "Image dimensions must be non-zero, found width={width} and height={height}"
                )
            }
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected} but found {found}"
                )
            }
            Self::UnsupportedColorspace(present, operation, supported) => {
                writeln!(f, "Unsupported colorspace {present:?}, for the operation {operation}\nSupported colorspaces are {supported:?}")
            }
            Self::OperationsError(ref error) => writeln!(f, "{error:?}"),
            Self::GenericString(err) => writeln!(f, "{err}"),
            Self::GenericStr(err) => writeln!(f, "{err}")
        }
    }
}

impl Debug for ImageOperationsErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongColorspace(ref expected, ref found) => {
                writeln!(f, "Expected {expected:?} colorspace but found {found:?}")
            }
            Self::WrongComponents(expected, found) => {
                writeln!(f, "Expected {expected} components and found {found}")
            }
            Self::InvalidChannelLayout(reason) | Self::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            Self::GenericString(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Display for ImageOperationsErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {}

impl std::error::Error for ImageOperationsErrors {}

impl From<ImageOperationsErrors> for ImageErrors {
    fn from(from: ImageOperationsErrors) -> Self {
        ImageErrors::OperationsError(from)
    }
}

impl From<String> for ImageErrors {
    fn from(s: String) -> ImageErrors {
        ImageErrors::GenericString(s)
    }
}

impl From<&'static str> for ImageErrors {
    fn from(s: &'static str) -> ImageErrors {
        ImageErrors::GenericStr(s)
    }
}
