/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Filters that cannot be disabled
//!
//! Core filters are filters needed by nearly every
//! other operation, currently the colorspace conversion
//! between BGR and Luma
pub mod colorspace;
