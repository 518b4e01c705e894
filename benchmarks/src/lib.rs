/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Shared inputs for the filter benchmarks
use nanorand::{Rng, WyRand};

/// Width of the benchmark image
pub const BENCH_WIDTH: usize = 800;
/// Height of the benchmark image
pub const BENCH_HEIGHT: usize = 600;

/// Interleaved BGR pixels of `width*height`, reproducible for a seed
///
/// A gradient is mixed with noise so thresholds and clusters see
/// some structure rather than flat noise.
pub fn bgr_noise(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = WyRand::new_seed(seed);
    let mut out = Vec::with_capacity(width * height * 3);

    for y in 0..height {
        for x in 0..width {
            let noise = usize::from(rng.generate::<u8>() & 63);
            let gradient = (x * 255) / width.max(1);
            let band = (y * 255) / height.max(1);

            out.push(((gradient + noise) / 2) as u8);
            out.push(((band + noise) / 2) as u8);
            out.push((((gradient + band) / 2 + noise) / 2) as u8);
        }
    }
    out
}
