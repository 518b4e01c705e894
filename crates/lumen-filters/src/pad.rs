/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Border replication around a plane
//!
//! Every neighbourhood filter in this crate, correlation and morphology alike,
//! reads outside the image through a replicated border so that composed
//! filters see the same edge values.
//!
//! ```text
//!  a,b,c
//!  d,e,f
//! ```
//! padded by one on each side becomes
//! ```text
//! a a,b,c c
//! a a,b,c c
//! d d,e,f f
//! d d,e,f f
//! ```

/// Pad pixels creating a buffer around actual pixels
///
///```text
///    padded width ──────────────────────────────►
/// │ ┌─────────────────────────────────────┐
/// │ │          PADDING                    │
/// │ │   (x,y)     out width               │
/// │ │     ┌────────────────────┐          │
/// │ │   h │                    │          │
/// │ │   e │   IMAGE            │          │
/// │ │   i │                    │          │
/// │ │   g │                    │          │
/// │ │   h └────────────────────┘          │
/// │ │   t                                 │
/// ▼ │                                     │
///   └─────────────────────────────────────┘
/// ```
///
/// # Arguments
///  - pixels: Un-padded raw pixels, `width*height` long
///  - width: Width of raw pixels
///  - height : Height of raw pixels
///  - pad_x: Columns added on the left and again on the right
///  - pad_y: Rows added on the top and again on the bottom
///
/// # Returns:
///  - A vec of `(width+2*pad_x)*(height+2*pad_y)` pixels, empty if the input
///    is empty or too short for the dimensions
pub fn pad<T: Copy + Default>(
    pixels: &[T], width: usize, height: usize, pad_x: usize, pad_y: usize
) -> Vec<T> {
    if width == 0 || height == 0 || pixels.len() < width * height {
        return Vec::new();
    }
    let padded_w = width + pad_x * 2;
    let padded_h = height + pad_y * 2;

    let mut out_pixels = vec![T::default(); padded_h * padded_w];

    let start = pad_x;
    let end = padded_w - pad_x;

    let fill_row = |out: &mut [T], in_pix: &[T]| {
        out[0..start].fill(in_pix[0]);
        out[start..end].copy_from_slice(in_pix);
        out[end..].fill(in_pix[width - 1]);
    };

    // fill top rows
    let first_row = &pixels[0..width];
    for out in out_pixels.chunks_exact_mut(padded_w).take(pad_y) {
        fill_row(out, first_row);
    }
    // fill middle rows
    for (out, in_pix) in out_pixels
        .chunks_exact_mut(padded_w)
        .skip(pad_y)
        .take(height)
        .zip(pixels.chunks_exact(width))
    {
        fill_row(out, in_pix);
    }
    // fill bottom rows
    let last_row = &pixels[(height - 1) * width..height * width];
    for out in out_pixels.rchunks_exact_mut(padded_w).take(pad_y) {
        fill_row(out, last_row);
    }
    out_pixels
}

#[cfg(test)]
mod tests {
    use crate::pad::pad;

    #[test]
    fn replicate_copies_edges() {
        #[rustfmt::skip]
        let pixels = [
            1, 2, 3,
            4, 5, 6
        ];
        let padded = pad(&pixels, 3, 2, 1, 1);

        #[rustfmt::skip]
        let expected = [
            1, 1, 2, 3, 3,
            1, 1, 2, 3, 3,
            4, 4, 5, 6, 6,
            4, 4, 5, 6, 6
        ];
        assert_eq!(padded, expected);
    }

    #[test]
    fn pad_one_axis_only() {
        let pixels = [1.0_f32, 2.0, 3.0, 4.0];

        assert_eq!(pad(&pixels, 2, 2, 2, 0), [1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 4.0]);
        assert_eq!(pad(&pixels, 2, 2, 0, 1), [1.0, 2.0, 1.0, 2.0, 3.0, 4.0, 3.0, 4.0]);
        assert_eq!(pad(&pixels, 2, 2, 0, 0), pixels);
    }

    #[test]
    fn padding_wider_than_image() {
        let padded = pad(&[7_u8], 1, 1, 3, 2);
        assert_eq!(padded.len(), 7 * 5);
        assert!(padded.iter().all(|x| *x == 7));
    }
}
