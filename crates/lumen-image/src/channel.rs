/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module encapsulates a single image channel instance
//!
//! A channel holds one plane of an image, i.e for a BGR image
//! there are three channels, the first holding all blue samples,
//! the second all green samples and the last all red samples.
//!
//! All samples are eight bit, stored row by row.

/// Encapsulates an image channel
///
/// A channel has the same semantics as a `Vec<u8>`, it
/// only exists so the image can reason about planes instead of raw vectors.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Channel {
    data: Vec<u8>
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self.data)
    }
}

impl Channel {
    /// Create a new channel with zeroed samples
    #[must_use]
    pub fn new_with_length(length: usize) -> Channel {
        Channel {
            data: vec![0; length]
        }
    }

    /// Create a new channel with space for `capacity` samples
    /// without initializing them
    #[must_use]
    pub fn new_with_capacity(capacity: usize) -> Channel {
        Channel {
            data: Vec::with_capacity(capacity)
        }
    }

    /// Create a channel of `length` samples all set to `elm`
    #[must_use]
    pub fn from_elm(length: usize, elm: u8) -> Channel {
        Channel {
            data: vec![elm; length]
        }
    }

    /// Take ownership of already laid out samples
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Channel {
        Channel { data }
    }

    /// Return the number of samples in this channel
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Push a single sample to the end of the channel
    pub fn push(&mut self, elm: u8) {
        self.data.push(elm);
    }

    /// Append samples to the end of the channel
    pub fn extend(&mut self, elms: &[u8]) {
        self.data.extend_from_slice(elms);
    }

    /// Return an immutable view of the samples
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Return a mutable view of the samples
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the channel returning the underlying samples
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
