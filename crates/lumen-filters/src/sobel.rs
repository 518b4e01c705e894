/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sobel derivative filter
use lumen_core::log::debug;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::adapter::with_luma;
use crate::convolve::{Convolve, OutputMapping};
use crate::kernel::Kernel;
use crate::params::FilterParams;

/// Direction of the derivative
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SobelDirection {
    /// Change along x, highlights vertical edges
    #[default]
    Horizontal,
    /// Change along y, highlights horizontal edges
    Vertical
}

impl SobelDirection {
    /// Parse a direction name
    ///
    /// `y` and `vertical` select [`SobelDirection::Vertical`], anything
    /// else falls back to [`SobelDirection::Horizontal`]
    pub fn from_name(input: &str) -> SobelDirection {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "vertical" => SobelDirection::Vertical,
            "x" | "horizontal" => SobelDirection::Horizontal,
            _ => {
                debug!("Unknown sobel direction {input:?}, using horizontal");
                SobelDirection::Horizontal
            }
        }
    }
}

/// Perform a sobel image derivative.
///
/// This operation calculates the gradient of the image in one direction,
/// which represents how quickly pixel values change from one point to another.
///
/// The matrix for sobel is
///
/// Gx matrix
/// ```text
///   -1, 0, 1,
///   -2, 0, 2,
///   -1, 0, 1
/// ```
/// Gy matrix
/// ```text
/// -1,-2,-1,
///  0, 0, 0,
///  1, 2, 1
/// ```
///
/// The result is the absolute response rounded and saturated to eight bits,
/// computed on the grayscale image and returned as BGR.
#[derive(Default, Copy, Clone, Debug)]
pub struct Sobel {
    direction: SobelDirection
}

impl Sobel {
    #[must_use]
    pub fn new(direction: SobelDirection) -> Sobel {
        Sobel { direction }
    }

    /// Read `direction` (default `x`)
    #[must_use]
    pub fn from_params(params: &FilterParams) -> Sobel {
        Sobel::new(SobelDirection::from_name(params.text_or("direction", "x")))
    }

    pub const fn direction(&self) -> SobelDirection {
        self.direction
    }
}

impl OperationsTrait for Sobel {
    fn name(&self) -> &'static str {
        "Sobel"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let convolve = Convolve::new(Kernel::sobel(self.direction), OutputMapping::AbsoluteSaturate);

        with_luma(image, |luma| convolve.execute(luma))
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use lumen_image::image::Image;
    use lumen_image::traits::OperationsTrait;

    use crate::params::FilterParams;
    use crate::sobel::{Sobel, SobelDirection};

    fn vertical_edge() -> Image {
        Image::from_fn(6, 6, ColorSpace::BGR, |x, _, px| {
            *px = if x < 3 { [0; 3] } else { [100; 3] };
        })
        .unwrap()
    }

    #[test]
    fn direction_names() {
        assert_eq!(SobelDirection::from_name("y"), SobelDirection::Vertical);
        assert_eq!(SobelDirection::from_name("Vertical"), SobelDirection::Vertical);
        assert_eq!(SobelDirection::from_name("x"), SobelDirection::Horizontal);
        assert_eq!(SobelDirection::from_name("diagonal"), SobelDirection::Horizontal);

        let params = FilterParams::new().with("direction", 1);
        assert_eq!(Sobel::from_params(&params).direction(), SobelDirection::Horizontal);
    }

    #[test]
    fn horizontal_finds_vertical_edges() {
        let image = vertical_edge();

        let x = Sobel::new(SobelDirection::Horizontal).clone_and_execute(&image).unwrap();
        let y = Sobel::new(SobelDirection::Vertical).clone_and_execute(&image).unwrap();

        // 4 * 100, saturated
        assert_eq!(x.pixel(2, 3), Some([255; 3]));
        assert_eq!(x.pixel(0, 3), Some([0; 3]));
        assert!(y.flatten_u8().iter().all(|v| *v == 0));
    }

    #[test]
    fn missing_direction_is_horizontal() {
        let image = vertical_edge();
        let by_default = Sobel::from_params(&FilterParams::new()).clone_and_execute(&image).unwrap();
        let explicit = Sobel::from_params(&FilterParams::new().with("direction", "x"))
            .clone_and_execute(&image)
            .unwrap();

        assert_eq!(by_default, explicit);
    }
}
