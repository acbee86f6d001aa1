//! 8-bit RGB colors — named constants, HSV conversion, and grayscale reduction.

pub mod gray;
pub mod hsv;
pub mod named;

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

pub use named::NAMED;

/// An 8-bit color triple, interpreted as RGB unless a function documents
/// BGR or HSV ordering.
///
/// Serializes as a `[r, g, b]` array.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize,
)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Swap the first and last channel (RGB ↔ BGR).
    pub const fn reversed(self) -> Self {
        Self::new(self.b, self.g, self.r)
    }

    /// View a slice of colors as packed channel bytes.
    pub fn as_bytes(colors: &[Color]) -> &[u8] {
        bytemuck::cast_slice(colors)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
