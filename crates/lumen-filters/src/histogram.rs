/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Intensity histograms
//!
//! An image histogram is a graph that shows the number of pixels in an image at each intensity value,
//! automatic thresholding picks its level from it.

/// Count how many times each value occurs in `data`
#[must_use]
pub fn histogram(data: &[u8]) -> [u32; 256] {
    // four tables so consecutive samples with the same value
    // do not wait on one another
    let mut start1 = [0_u32; 256];
    let mut start2 = [0_u32; 256];
    let mut start3 = [0_u32; 256];
    let mut start4 = [0_u32; 256];

    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();

    for i in chunks {
        start1[usize::from(i[0])] += 1;
        start2[usize::from(i[1])] += 1;
        start3[usize::from(i[2])] += 1;
        start4[usize::from(i[3])] += 1;
    }

    for i in remainder {
        start1[usize::from(*i)] += 1;
    }
    // add them together
    for (((b, c), d), e) in start1
        .iter_mut()
        .zip(start2.iter())
        .zip(start3.iter())
        .zip(start4.iter())
    {
        *b += c + d + e;
    }

    start1
}
