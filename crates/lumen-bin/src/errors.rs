/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors raised by the command line front end
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use lumen_filters::params::ParamErrors;
use lumen_image::errors::ImageErrors;

pub enum CliErrors {
    /// The filter could not run on the image
    ImageErrors(ImageErrors),
    /// Decoding or encoding a file failed
    CodecErrors(PathBuf, image::ImageError),
    /// A `--param` assignment could not be read
    ParamErrors(ParamErrors),
    /// `--params-json` was not a valid parameter object, or listing failed
    JsonErrors(serde_json::Error),
    /// Number of inputs and outputs given
    FileCountMismatch(usize, usize),
    /// A required argument was missing
    MissingArgument(&'static str),
    /// Dimensions too large for the output encoder
    TooLarge(usize, usize)
}

impl Debug for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageErrors(err) => writeln!(f, "{err:?}"),
            Self::CodecErrors(path, err) => writeln!(f, "{}: {err}", path.display()),
            Self::ParamErrors(err) => writeln!(f, "{err:?}"),
            Self::JsonErrors(err) => writeln!(f, "JSON error: {err}"),
            Self::FileCountMismatch(inputs, outputs) => {
                writeln!(
                    f,
                    "Every input needs an output, found {inputs} inputs and {outputs} outputs"
                )
            }
            Self::MissingArgument(name) => writeln!(f, "Missing argument --{name}"),
            Self::TooLarge(width, height) => {
                writeln!(f, "Image of {width}x{height} is too large to encode")
            }
        }
    }
}

impl Display for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for CliErrors {}

impl From<ImageErrors> for CliErrors {
    fn from(from: ImageErrors) -> Self {
        CliErrors::ImageErrors(from)
    }
}

impl From<ParamErrors> for CliErrors {
    fn from(from: ParamErrors) -> Self {
        CliErrors::ParamErrors(from)
    }
}

impl From<serde_json::Error> for CliErrors {
    fn from(from: serde_json::Error) -> Self {
        CliErrors::JsonErrors(from)
    }
}
