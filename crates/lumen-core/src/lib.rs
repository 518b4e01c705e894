/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all lumen libraries
//!
//! This crate provides a set of definitions shared
//! by the image container and the filters under the `lumen` umbrella
//!
//! It currently contains
//!
//! - Colorspace information shared by images
//! - A logging facade that compiles to nothing unless the `log` feature is on
//!
//! This library is `#[no_std]` unless the `std` feature is enabled.
//!
//! # Features
//!  - `std`: Disables `#[no_std]` compilation.
//!
//!  - `log`: Forwards the logging macros in [`log`](crate::log) to the `log` crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]

pub mod colorspace;
pub mod log;
