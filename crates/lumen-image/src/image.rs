/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single image
//!
//! An image is a set of planar [`Channel`]s, one per colorspace component,
//! each holding `width * height` eight bit samples.
//!
//! Every constructor validates its input, so an `Image` in hand always has
//! non-zero dimensions and channels of the right length.
use lumen_core::colorspace::ColorSpace;

use crate::channel::Channel;
use crate::deinterleave::{deinterleave_u8, interleave_u8};
use crate::errors::{ImageErrors, ImageOperationsErrors};

/// Maximum supported color channels
pub const MAX_CHANNELS: usize = 3;

/// Represents a single image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    channels:   Vec<Channel>,
    width:      usize,
    height:     usize,
    colorspace: ColorSpace
}

impl Image {
    /// Create a new image from already separated channels
    ///
    /// # Errors
    /// - If width or height is zero
    /// - If the number of channels does not match the colorspace
    /// - If any channel does not hold `width*height` samples
    pub fn new(
        channels: Vec<Channel>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        validate(&channels, width, height, colorspace)?;

        Ok(Image {
            channels,
            width,
            height,
            colorspace
        })
    }

    /// Create an image with a static color in it
    ///
    /// Every component of every pixel is set to `pixel`
    pub fn fill(
        pixel: u8, colorspace: ColorSpace, width: usize, height: usize
    ) -> Result<Image, ImageErrors> {
        let dims = checked_mul(width, height)?;

        let channels = vec![Channel::from_elm(dims, pixel); colorspace.num_components()];

        Image::new(channels, width, height, colorspace)
    }

    /// Create an image from a function
    ///
    /// The function receives the x and y offsets and an array with [`MAX_CHANNELS`]
    /// entries to fill, only the first `colorspace.num_components()` entries are read.
    ///
    /// ```
    /// use lumen_core::colorspace::ColorSpace;
    /// use lumen_image::image::Image;
    ///
    /// // a band of colors from black to white that repeats
    /// let img = Image::from_fn(30, 20, ColorSpace::Luma, |x, y, px| {
    ///     px[0] = ((x + y) % 256) as u8;
    /// })
    /// .unwrap();
    /// assert_eq!(img.dimensions(), (30, 20));
    /// ```
    pub fn from_fn<F>(
        width: usize, height: usize, colorspace: ColorSpace, func: F
    ) -> Result<Image, ImageErrors>
    where
        F: Fn(usize, usize, &mut [u8; MAX_CHANNELS])
    {
        let size = checked_mul(width, height)?;
        let components = colorspace.num_components();

        let mut channels = vec![Channel::new_with_capacity(size); components];

        for y in 0..height {
            for x in 0..width {
                let mut value = [0; MAX_CHANNELS];
                (func)(x, y, &mut value);

                for (channel, sample) in channels.iter_mut().zip(value) {
                    channel.push(sample);
                }
            }
        }
        Image::new(channels, width, height, colorspace)
    }

    /// Create a new image from raw interleaved pixels
    ///
    /// Pixels are expected to be interleaved according to the colorspace,
    /// i.e if the image is BGR, pixel layout should be `[B,G,R,B,G,R]`
    ///
    /// # Errors
    /// - If the length of pixels doesn't match `width*height*components`
    /// - If any dimension is zero
    pub fn from_u8(
        pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        let expected_len = checked_mul(width, height)?
            .checked_mul(colorspace.num_components())
            .ok_or(ImageErrors::GenericStr("Image dimensions overflow a usize"))?;

        if pixels.len() != expected_len {
            return Err(ImageErrors::DimensionsMisMatch(expected_len, pixels.len()));
        }
        let channels = deinterleave_u8(pixels, colorspace)?;

        Image::new(channels, width, height, colorspace)
    }

    /// Get image dimensions as a tuple of (width,height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get the colorspace this image is stored in
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Return a reference to the underlying channels
    pub fn channels_ref(&self) -> &[Channel] {
        &self.channels
    }

    /// Return mutable views of the samples of every channel
    ///
    /// The views have a fixed length of `width*height`, use
    /// [`set_channels`](Self::set_channels) to change the layout
    pub fn channels_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [u8]> + '_ {
        self.channels.iter_mut().map(Channel::samples_mut)
    }

    /// Replace all channels, possibly switching colorspace
    ///
    /// # Errors
    /// Same conditions as [`Image::new`], on error the image is left untouched
    pub fn set_channels(
        &mut self, channels: Vec<Channel>, colorspace: ColorSpace
    ) -> Result<(), ImageErrors> {
        validate(&channels, self.width, self.height, colorspace)?;

        self.channels = channels;
        self.colorspace = colorspace;
        Ok(())
    }

    /// Return the components of the pixel at `(x,y)`
    ///
    /// Unused entries are zero, returns `None` when out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; MAX_CHANNELS]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let mut out = [0; MAX_CHANNELS];
        let pos = y * self.width + x;

        for (sample, channel) in out.iter_mut().zip(&self.channels) {
            *sample = channel.samples()[pos];
        }
        Some(out)
    }

    /// Convert the image to interleaved pixels
    ///
    /// BGR data looks like `[B,G,R,B,G,R]`, Luma data is returned as is
    pub fn flatten_u8(&self) -> Vec<u8> {
        let refs = self.channels.iter().collect::<Vec<&Channel>>();
        interleave_u8(&refs)
    }
}

fn checked_mul(width: usize, height: usize) -> Result<usize, ImageErrors> {
    if width == 0 || height == 0 {
        return Err(ImageErrors::ZeroDimensions(width, height));
    }
    width
        .checked_mul(height)
        .ok_or(ImageErrors::GenericStr("Image dimensions overflow a usize"))
}

fn validate(
    channels: &[Channel], width: usize, height: usize, colorspace: ColorSpace
) -> Result<(), ImageErrors> {
    let expected = checked_mul(width, height)?;

    if channels.len() != colorspace.num_components() {
        return Err(ImageOperationsErrors::WrongComponents(
            colorspace.num_components(),
            channels.len()
        )
        .into());
    }
    for channel in channels {
        if channel.len() != expected {
            return Err(ImageErrors::DimensionsMisMatch(expected, channel.len()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use nanorand::Rng;

    use crate::channel::Channel;
    use crate::errors::ImageErrors;
    use crate::image::Image;

    #[test]
    fn from_u8_round_trips_through_flatten() {
        let (w, h) = (17, 9);
        let mut pixels = vec![0_u8; w * h * 3];
        nanorand::WyRand::new_seed(12).fill(&mut pixels);

        let image = Image::from_u8(&pixels, w, h, ColorSpace::BGR).unwrap();

        assert_eq!(image.dimensions(), (w, h));
        assert_eq!(image.channels_ref().len(), 3);
        assert_eq!(image.flatten_u8(), pixels);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = Image::fill(0, ColorSpace::Luma, 0, 10).unwrap_err();
        assert!(matches!(err, ImageErrors::ZeroDimensions(0, 10)));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = Image::from_u8(&[1, 2, 3], 2, 2, ColorSpace::Luma).unwrap_err();
        assert!(matches!(err, ImageErrors::DimensionsMisMatch(4, 3)));

        let channels = vec![Channel::new_with_length(4), Channel::new_with_length(3)];
        assert!(Image::new(channels, 2, 2, ColorSpace::Luma).is_err());
    }

    #[test]
    fn set_channels_switches_colorspace() {
        let mut image = Image::fill(9, ColorSpace::BGR, 4, 4).unwrap();

        image
            .set_channels(vec![Channel::from_elm(16, 1)], ColorSpace::Luma)
            .unwrap();
        assert_eq!(image.colorspace(), ColorSpace::Luma);

        // a bad layout leaves the image untouched
        assert!(image
            .set_channels(vec![Channel::from_elm(15, 1)], ColorSpace::Luma)
            .is_err());
        assert_eq!(image.pixel(3, 3), Some([1, 0, 0]));
        assert_eq!(image.pixel(4, 0), None);
    }

    #[test]
    fn channels_mut_yields_whole_planes() {
        let mut image = Image::fill(0, ColorSpace::BGR, 3, 2).unwrap();

        let planes = image.channels_mut();
        assert_eq!(planes.len(), 3);

        for (component, samples) in planes.enumerate() {
            assert_eq!(samples.len(), 6);
            samples[5] = component as u8 + 1;
        }
        assert_eq!(image.pixel(2, 1), Some([1, 2, 3]));
        assert_eq!(image.pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn from_fn_visits_every_pixel() {
        let image = Image::from_fn(5, 3, ColorSpace::BGR, |x, y, px| {
            px[0] = x as u8;
            px[1] = y as u8;
            px[2] = 200;
        })
        .unwrap();

        assert_eq!(image.pixel(4, 2), Some([4, 2, 200]));
    }
}
