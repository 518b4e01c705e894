/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Logging facade
//!
//! With the `log` feature the macros here are the ones from the `log` crate.
//! Without it they type check their arguments inside a branch that never
//! runs, so values only used for logging do not trigger unused warnings
//! and nothing is formatted at runtime.

#[cfg(feature = "log")]
pub use ::log::{debug, info, trace, warn};

// Exported macros always land in the crate root, re-exporting
// them hidden here keeps them under `lumen_core::log`.
#[cfg(not(feature = "log"))]
pub use crate::{__lumen_debug as debug, __lumen_info as info, __lumen_trace as trace, __lumen_warn as warn};

#[doc(hidden)]
#[macro_export]
macro_rules! __lumen_discard {
    ($($arg:tt)+) => {
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __lumen_warn {
    ($($arg:tt)+) => { $crate::__lumen_discard!($($arg)+) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __lumen_info {
    ($($arg:tt)+) => { $crate::__lumen_discard!($($arg)+) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __lumen_debug {
    ($($arg:tt)+) => { $crate::__lumen_discard!($($arg)+) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __lumen_trace {
    ($($arg:tt)+) => { $crate::__lumen_discard!($($arg)+) };
}
