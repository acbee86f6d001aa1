//! Phlox Color — color utilities for the image-processing toolkit.
//!
//! This crate contains the named palette, RGB/HSV conversion, grayscale
//! reduction, smoothed tone curves, and value-to-color gradients.
//! Everything operates in memory on 8-bit values; no I/O.

pub mod color;
pub mod error;
pub mod grading;
pub mod transform;

// Re-exports for convenience.
pub use color::Color;
pub use color::gray::{average, lightness, luminosity};
pub use color::hsv::{hsv2rgb, hue, hue2bgr, hue2rgb, rgb2hsv};
pub use error::{ColorError, FitError, Result};
pub use grading::curves::ColorCurve;
pub use grading::spline::SmoothingSpline;
pub use transform::color_map::ColorMap;
pub use transform::params::{ColorCurveConfig, ColorMapConfig, ColorPresets};
