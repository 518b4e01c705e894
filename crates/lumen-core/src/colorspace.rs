/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image Colorspace information and manipulation utilities.

/// All colorspaces an image can be stored in.
///
/// Color images use a fixed `B,G,R` component order, which is
/// what the decoding collaborators hand over and what display
/// collaborators expect back.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ColorSpace {
    /// Blue, Green, Red
    BGR,
    /// Grayscale colorspace, a single intensity value per pixel
    Luma
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. BGR returns 3 since it contains B,G and R colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::BGR => 3,
            Self::Luma => 1
        }
    }

    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::Luma)
    }

    /// Returns the position of a named color component inside a pixel
    ///
    /// Grayscale images have no separate color components and
    /// return `None` for all of them
    pub const fn component_position(&self, component: Component) -> Option<usize> {
        match (self, component) {
            (Self::BGR, Component::Blue) => Some(0),
            (Self::BGR, Component::Green) => Some(1),
            (Self::BGR, Component::Red) => Some(2),
            (Self::Luma, _) => None
        }
    }
}

/// A single color component of a color pixel
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Component {
    Red,
    Green,
    Blue
}

/// Encapsulates all colorspaces supported by
/// the library
pub static ALL_COLORSPACES: [ColorSpace; 2] = [ColorSpace::BGR, ColorSpace::Luma];

#[cfg(test)]
mod tests {
    use crate::colorspace::{ColorSpace, Component, ALL_COLORSPACES};

    #[test]
    fn components_match_layout() {
        assert_eq!(ColorSpace::BGR.num_components(), 3);
        assert_eq!(ColorSpace::Luma.num_components(), 1);

        assert_eq!(ColorSpace::BGR.component_position(Component::Red), Some(2));
        assert_eq!(ColorSpace::BGR.component_position(Component::Blue), Some(0));
        assert_eq!(ColorSpace::Luma.component_position(Component::Green), None);
    }

    #[test]
    fn only_luma_is_grayscale() {
        let gray: usize = ALL_COLORSPACES.iter().filter(|c| c.is_grayscale()).count();
        assert_eq!(gray, 1);
    }
}
