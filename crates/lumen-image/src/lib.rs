/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The image container used by the lumen filters
//!
//! An image is represented as
//!
//! - separated channels
//!     - of eight bit depth
//!         - representing a colorspace
//!             - with the same width and height
//!
//! Operations on images implement [`OperationsTrait`](crate::traits::OperationsTrait),
//! the colorspace conversion every filter relies on lives in
//! [`core_filters`](crate::core_filters).
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

pub mod channel;
pub mod core_filters;
pub mod deinterleave;
pub mod errors;
pub mod image;
pub mod traits;
