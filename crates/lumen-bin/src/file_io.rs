/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reading and writing image files
//!
//! Files are decoded as eight bit RGB and handed to the filters as BGR,
//! results go back through RGB before encoding. The format is picked
//! from the file contents on read and from the extension on write.
use std::path::Path;

use image::{GrayImage, RgbImage};
use log::{debug, trace};
use lumen_core::colorspace::ColorSpace;
use lumen_image::image::Image;

use crate::errors::CliErrors;

/// Swap the first and last component of every pixel, RGB <-> BGR
fn swap_red_blue(pixels: &mut [u8]) {
    for pixel in pixels.chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }
}

/// Decode the file at `path` into a BGR image
pub fn load_image(path: &Path) -> Result<Image, CliErrors> {
    debug!("Reading {}", path.display());

    let decoded = image::open(path)
        .map_err(|err| CliErrors::CodecErrors(path.to_path_buf(), err))?
        .to_rgb8();

    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let mut pixels = decoded.into_raw();

    trace!("Decoded {width}x{height} image");
    swap_red_blue(&mut pixels);

    Ok(Image::from_u8(&pixels, width, height, ColorSpace::BGR)?)
}

/// Encode `image` to `path`, the extension decides the format
pub fn save_image(image: &Image, path: &Path) -> Result<(), CliErrors> {
    let (width, height) = image.dimensions();
    let mut pixels = image.flatten_u8();

    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(CliErrors::TooLarge(width, height));
    };

    let result = match image.colorspace() {
        ColorSpace::BGR => {
            swap_red_blue(&mut pixels);
            RgbImage::from_raw(w, h, pixels)
                .ok_or(CliErrors::TooLarge(width, height))?
                .save(path)
        }
        ColorSpace::Luma => GrayImage::from_raw(w, h, pixels)
            .ok_or(CliErrors::TooLarge(width, height))?
            .save(path)
    };
    debug!("Writing {}", path.display());

    result.map_err(|err| CliErrors::CodecErrors(path.to_path_buf(), err))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use lumen_core::colorspace::ColorSpace;
    use lumen_image::image::Image;

    use crate::file_io::{load_image, save_image, swap_red_blue};

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lumen-{}-{name}", std::process::id()))
    }

    #[test]
    fn swap_is_per_pixel() {
        let mut pixels = [1, 2, 3, 4, 5, 6];
        swap_red_blue(&mut pixels);
        assert_eq!(pixels, [3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn png_keeps_channel_order() {
        let path = scratch_file("order.png");
        let image = Image::from_fn(5, 3, ColorSpace::BGR, |x, y, px| {
            *px = [x as u8 * 10, y as u8 * 20, 200];
        })
        .unwrap();

        save_image(&image, &path).unwrap();
        let read = load_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(read, image);
    }

    #[test]
    fn luma_is_read_back_as_bgr() {
        let path = scratch_file("gray.png");
        let image = Image::fill(42, ColorSpace::Luma, 4, 4).unwrap();

        save_image(&image, &path).unwrap();
        let read = load_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(read.colorspace(), ColorSpace::BGR);
        assert_eq!(read.pixel(2, 2), Some([42; 3]));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_image(&scratch_file("does-not-exist.png")).is_err());
    }
}
