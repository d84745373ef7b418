#![forbid(unsafe_code)]

//! Colors and sizing shared by every widget in a frame.

use std::ops::Index;

use ampdeck_core::Rgba;

/// Number of palette entries.
pub const PALETTE_LEN: usize = 6;

/// Ordered color ramp, darkest first.
///
/// Widgets address entries by index: `0` is the screen background, `1`/`2`
/// the idle and touched control fills, `3` the dial sweep, `5` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgba; PALETTE_LEN],
}

impl Palette {
    pub const fn new(colors: [Rgba; PALETTE_LEN]) -> Self {
        Self { colors }
    }

    /// The flat UI ramp: midnight blue through clouds.
    pub const fn flat() -> Self {
        Self::new([
            Rgba::rgb(44, 62, 80),
            Rgba::rgb(52, 73, 94),
            Rgba::rgb(127, 140, 141),
            Rgba::rgb(149, 165, 166),
            Rgba::rgb(189, 195, 199),
            Rgba::rgb(236, 240, 241),
        ])
    }

    pub fn colors(&self) -> &[Rgba; PALETTE_LEN] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::flat()
    }
}

impl Index<usize> for Palette {
    type Output = Rgba;

    fn index(&self, index: usize) -> &Rgba {
        &self.colors[index]
    }
}

/// Sizing constants in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Inset between a control's edge and its content.
    pub pad: f32,
    pub text_size: f32,
    pub corner_radius: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            pad: 2.0,
            text_size: 28.0,
            corner_radius: 4.0,
        }
    }
}
