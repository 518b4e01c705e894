/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Deinterleave de-interleaves image channels into separate channels
//!
//! Decoders and displays hand over pixels as `B`,`G`,`R`,`B`,`G`,`R`...
//! which is good for viewing but not for processing, so
//! images are kept as separate planes.
//!
//! i.e `BGRBGRBGRBGR` becomes `BBBB`,`GGGG`,`RRRR`.
//!
//! [`interleave_u8`] does the inverse.

use lumen_core::colorspace::ColorSpace;

use crate::channel::Channel;
use crate::errors::{ImageErrors, ImageOperationsErrors};

#[inline(always)]
fn de_interleave_three_channels_scalar(source: &[u8], c1: &mut [u8], c2: &mut [u8], c3: &mut [u8]) {
    for (((val, a), b), c) in source
        .chunks_exact(3)
        .zip(c1.iter_mut())
        .zip(c2.iter_mut())
        .zip(c3.iter_mut())
    {
        *a = val[0];
        *b = val[1];
        *c = val[2];
    }
}

/// Separates image u8's into various components
///
/// # Errors
/// - If the pixel count is not a multiple of the colorspace components
/// - If there are no pixels
pub fn deinterleave_u8(
    interleaved_pixels: &[u8], colorspace: ColorSpace
) -> Result<Vec<Channel>, ImageErrors> {
    let components = colorspace.num_components();

    if interleaved_pixels.len() % components != 0 {
        return Err(ImageErrors::OperationsError(
            ImageOperationsErrors::InvalidChannelLayout("Extra pixels in the colorspace")
        ));
    }
    let size = interleaved_pixels.len() / components;

    if size == 0 {
        return Err(ImageErrors::GenericStr(
            "Too Small of an interleaved pixel count"
        ));
    }
    match colorspace {
        ColorSpace::Luma => Ok(vec![Channel::from_vec(interleaved_pixels.to_vec())]),
        ColorSpace::BGR => {
            let mut c1 = Channel::new_with_length(size);
            let mut c2 = Channel::new_with_length(size);
            let mut c3 = Channel::new_with_length(size);

            de_interleave_three_channels_scalar(
                interleaved_pixels,
                c1.samples_mut(),
                c2.samples_mut(),
                c3.samples_mut()
            );

            Ok(vec![c1, c2, c3])
        }
    }
}

/// Interleave separate planes into one vector
///
/// All channels are expected to have the same length, the output
/// has `channels.len() * channels[0].len()` samples
#[must_use]
pub fn interleave_u8(channels: &[&Channel]) -> Vec<u8> {
    let Some(first) = channels.first() else {
        return Vec::new();
    };

    let mut out = vec![0; first.len() * channels.len()];

    if channels.len() == 1 {
        out.copy_from_slice(first.samples());
        return out;
    }
    for (pos, pixel) in out.chunks_exact_mut(channels.len()).enumerate() {
        for (sample, channel) in pixel.iter_mut().zip(channels) {
            *sample = channel.samples()[pos];
        }
    }
    out
}
