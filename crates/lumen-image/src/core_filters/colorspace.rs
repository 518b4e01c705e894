/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Colorspace conversion between BGR and Luma
//!
//! Going to Luma uses the weighting
//!
//! ```text
//! Grayscale = 0.299R + 0.587G + 0.114B
//! ```
//! implemented in fixed point with round to nearest, going back to
//! BGR copies the intensity into the three components.
//!
//! The round trip is lossy, color information does not survive it.
use lumen_core::colorspace::{ColorSpace, Component};
use lumen_core::log::trace;

use crate::channel::Channel;
use crate::errors::{ImageErrors, ImageOperationsErrors};
use crate::image::Image;
use crate::traits::OperationsTrait;

/// Fraction bits used by the fixed point weights
const SHIFT: u32 = 14;
const R_COEF: u32 = 4899; // 0.299 * (1 << 14)
const G_COEF: u32 = 9617; // 0.587 * (1 << 14)
const B_COEF: u32 = 1868; // 0.114 * (1 << 14)

/// Convert an image to another colorspace
///
/// Converting to the colorspace the image is already in is a no-op
#[derive(Copy, Clone, Debug)]
pub struct ColorspaceConv {
    to: ColorSpace
}

impl ColorspaceConv {
    #[must_use]
    pub fn new(to: ColorSpace) -> ColorspaceConv {
        ColorspaceConv { to }
    }
}

impl OperationsTrait for ColorspaceConv {
    fn name(&self) -> &'static str {
        "Colorspace conversion"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let from = image.colorspace();

        if from == self.to {
            return Ok(());
        }
        trace!("Converting image from {from:?} to {:?}", self.to);

        let new_channels = match (from, self.to) {
            (ColorSpace::BGR, ColorSpace::Luma) => vec![bgr_to_luma(image)?],
            (ColorSpace::Luma, ColorSpace::BGR) => {
                let luma = image.channels_ref()[0].clone();
                vec![luma.clone(), luma.clone(), luma]
            }
            (from, to) => {
                return Err(ImageOperationsErrors::WrongColorspace(to, from).into());
            }
        };
        image.set_channels(new_channels, self.to)
    }
}

fn bgr_to_luma(image: &Image) -> Result<Channel, ImageErrors> {
    let colorspace = image.colorspace();
    let channels = image.channels_ref();

    let position = |component| {
        colorspace
            .component_position(component)
            .ok_or(ImageOperationsErrors::Generic("Colorspace has no color components"))
    };
    let b = channels[position(Component::Blue)?].samples();
    let g = channels[position(Component::Green)?].samples();
    let r = channels[position(Component::Red)?].samples();

    let mut out = Channel::new_with_length(b.len());
    convert_bgr_to_luma_scalar(b, g, r, out.samples_mut());

    Ok(out)
}

/// Convert separate blue, green and red planes to grayscale
#[allow(clippy::cast_possible_truncation)]
pub fn convert_bgr_to_luma_scalar(b: &[u8], g: &[u8], r: &[u8], gray: &mut [u8]) {
    for (((b_v, g_v), r_v), g_out) in b.iter().zip(g.iter()).zip(r.iter()).zip(gray.iter_mut()) {
        let sum = u32::from(*b_v) * B_COEF
            + u32::from(*g_v) * G_COEF
            + u32::from(*r_v) * R_COEF
            + (1 << (SHIFT - 1));

        // the weights sum to 1<<14 so this never exceeds 255
        *g_out = (sum >> SHIFT) as u8;
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;

    use crate::core_filters::colorspace::{convert_bgr_to_luma_scalar, ColorspaceConv};
    use crate::image::Image;
    use crate::traits::OperationsTrait;

    #[test]
    fn weights_match_luma_formula() {
        let mut out = [0; 4];
        convert_bgr_to_luma_scalar(&[255, 0, 0, 255], &[0, 255, 0, 255], &[0, 0, 255, 255], &mut out);
        // 0.114*255, 0.587*255, 0.299*255 and white
        assert_eq!(out, [29, 150, 76, 255]);
    }

    #[test]
    fn gray_pixels_survive_round_trip() {
        let image = Image::from_fn(8, 8, ColorSpace::BGR, |x, y, px| {
            let v = (x * 30 + y) as u8;
            *px = [v, v, v];
        })
        .unwrap();

        let luma = ColorspaceConv::new(ColorSpace::Luma)
            .clone_and_execute(&image)
            .unwrap();
        assert_eq!(luma.colorspace(), ColorSpace::Luma);
        assert_eq!(luma.channels_ref().len(), 1);

        let back = ColorspaceConv::new(ColorSpace::BGR)
            .clone_and_execute(&luma)
            .unwrap();
        assert_eq!(back, image);
    }

    #[test]
    fn same_colorspace_is_a_no_op() {
        let image = Image::fill(40, ColorSpace::Luma, 3, 2).unwrap();
        let out = ColorspaceConv::new(ColorSpace::Luma)
            .clone_and_execute(&image)
            .unwrap();
        assert_eq!(out, image);
    }
}
