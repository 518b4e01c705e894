/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Neighbourhood walker
//!
//! spatial goes through each pixel on an image collecting its neighbors and
//! hands them to a function which produces the output sample.
//!
//! The window is `2*radius_y+1` rows by `2*radius_x+1` columns, centered
//! on the pixel, so a radius of R in both directions gives a square window
//! of side 2R+1.

/// Go through image neighbours, execute a function on them and store the result
///
/// The function receives the window row by row and returns the output sample,
/// it may return a different type from the input, e.g correlation reads `u8`
/// and produces `f32`.
///
/// # Arguments
///
/// - in_channel: input channel, the width is padded with `radius_x*2` columns and
///   the height with `radius_y*2` rows (use [`pad`](crate::pad::pad) for that).
///   Anything shorter leaves the output untouched.
///
/// - out_channel: Output channel, `width*height` long, not padded at all.
///
/// - radius_x, radius_y: Columns and rows on each side of the center
///
/// - function: Any function that when given the window returns a single element.
pub fn spatial<T, O, F>(
    in_channel: &[T], out_channel: &mut [O], radius_x: usize, radius_y: usize, width: usize,
    height: usize, mut function: F
) where
    T: Default + Copy,
    F: FnMut(&[T]) -> O
{
    let padded_width = (radius_x * 2) + width;
    let padded_height = (radius_y * 2) + height;

    if width == 0
        || in_channel.len() < padded_width * padded_height
        || out_channel.len() < width * height
    {
        return;
    }

    let window_w = (2 * radius_x) + 1;
    let window_h = (2 * radius_y) + 1;

    let mut local_storage = vec![T::default(); window_w * window_h];

    for (iy, out_row) in out_channel.chunks_exact_mut(width).take(height).enumerate() {
        for (ix, out) in out_row.iter_mut().enumerate() {
            let mut i = 0;

            for ky in 0..window_h {
                let start = (iy + ky) * padded_width + ix;

                local_storage[i..i + window_w].copy_from_slice(&in_channel[start..start + window_w]);

                i += window_w;
            }

            *out = function(&local_storage);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pad::pad;
    use crate::spatial::spatial;

    #[test]
    fn window_is_centered_on_pixel() {
        #[rustfmt::skip]
        let pixels = [
            1, 2, 3,
            4, 5, 6,
            7, 8, 9
        ];
        let padded = pad(&pixels, 3, 3, 1, 1);
        let mut out = [0_u32; 9];

        // sum of the 3x3 neighbourhood
        spatial(&padded, &mut out, 1, 1, 3, 3, |window: &[u8]| {
            window.iter().map(|x| u32::from(*x)).sum()
        });
        assert_eq!(out[4], 45);
        // top left sees 1,1,2 / 1,1,2 / 4,4,5
        assert_eq!(out[0], 21);
    }

    #[test]
    fn rectangular_windows() {
        let pixels = [1_u8, 2, 3, 4];
        let padded = pad(&pixels, 4, 1, 1, 0);
        let mut out = [0_u8; 4];

        spatial(&padded, &mut out, 1, 0, 4, 1, |window: &[u8]| {
            assert_eq!(window.len(), 3);
            window[2]
        });
        assert_eq!(out, [2, 3, 4, 4]);
    }
}
