/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits implemented by image operations
use lumen_core::colorspace::{ColorSpace, ALL_COLORSPACES};
use lumen_core::log::{debug, trace};

use crate::errors::ImageErrors;
use crate::image::Image;

/// This encapsulates an image operation.
///
/// Implementors provide [`execute_impl`](Self::execute_impl), callers go through
/// [`execute`](Self::execute) or [`clone_and_execute`](Self::clone_and_execute)
/// which check the colorspace first.
pub trait OperationsTrait {
    /// Get the name of this operation
    fn name(&self) -> &'static str;

    /// Execute the operation, manipulating the image in place
    ///
    /// Implementations may change the colorspace of the image but must
    /// not change its dimensions
    ///
    /// # Errors
    /// Any operations error will be propagated to the caller
    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors>;

    /// Colorspaces this operation accepts as input
    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &ALL_COLORSPACES
    }

    /// Execute an operation on the image
    ///
    /// # Errors
    /// - If the image colorspace is not supported by this operation
    /// - Anything the operation itself returns
    fn execute(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let colorspace = image.colorspace();

        if !self.supported_colorspaces().contains(&colorspace) {
            return Err(ImageErrors::UnsupportedColorspace(
                colorspace,
                self.name(),
                self.supported_colorspaces()
            ));
        }
        trace!("Running {} on a {colorspace:?} image", self.name());

        self.execute_impl(image)
    }

    /// Run the operation on a copy of `image`, returning the copy
    ///
    /// The input is left untouched
    ///
    /// # Errors
    /// See [`execute`](Self::execute)
    fn clone_and_execute(&self, image: &Image) -> Result<Image, ImageErrors> {
        let mut output = image.clone();
        self.execute(&mut output)?;
        Ok(output)
    }

    /// Run the operation on an image that may not exist yet
    ///
    /// A missing image is not an error, the operation has nothing
    /// to do and returns `Ok(None)`
    ///
    /// # Errors
    /// See [`execute`](Self::execute)
    fn execute_optional(&self, image: Option<&Image>) -> Result<Option<Image>, ImageErrors> {
        match image {
            Some(image) => self.clone_and_execute(image).map(Some),
            None => {
                debug!("No input image, {} has nothing to do", self.name());
                Ok(None)
            }
        }
    }
}
