//! Piecewise-linear color gradients over a numeric range.
//!
//! The colors are spread evenly across `[start_map, end_map]`; a value is
//! mapped by blending the two colors whose segment contains it.
//!
//! ```text
//! color_distance = (end_map − start_map) / (count − 1)
//! pos            = (value − start_map) / color_distance
//! i, α           = floor(pos), pos − floor(pos)
//! out            = color[i] × (1 − α) + color[i+1] × α
//! ```

use glam::DVec3;

use crate::color::Color;
use crate::error::{ColorError, Result};

/// Maps values in a numeric range to colors interpolated along a gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    colors: Vec<Color>,
    start_map: f64,
    end_map: f64,
    value_range: f64,
    color_distance: f64,
}

impl ColorMap {
    /// Build a gradient over `colors`, spread from `start_map` to `end_map`.
    ///
    /// A single color is blended toward white. `start_map` may be greater
    /// than `end_map`, which runs the gradient backwards over the range.
    ///
    /// Fails on an empty color list, and when the range or the per-segment
    /// width is zero or not finite.
    pub fn new(colors: &[Color], start_map: f64, end_map: f64) -> Result<Self> {
        let colors = match colors {
            [] => return Err(ColorError::EmptyColors),
            [single] => vec![*single, Color::WHITE],
            many => many.to_vec(),
        };

        let value_range = end_map - start_map;
        let color_distance = value_range / (colors.len() - 1) as f64;
        // Also catches overflowing and underflowing segment widths
        if !value_range.is_finite() || !color_distance.is_finite() || color_distance == 0.0 {
            return Err(ColorError::DegenerateRange {
                start: start_map,
                end: end_map,
            });
        }

        tracing::debug!(
            colors = colors.len(),
            start_map,
            end_map,
            color_distance,
            "built color map"
        );

        Ok(Self {
            colors,
            start_map,
            end_map,
            value_range,
            color_distance,
        })
    }

    /// Gradient from `color` to white.
    pub fn single(color: Color, start_map: f64, end_map: f64) -> Result<Self> {
        Self::new(&[color], start_map, end_map)
    }

    /// Color at `value`. Values outside the range clamp to the nearest end.
    pub fn lookup(&self, value: f64) -> Color {
        let last = self.colors.len() - 1;
        let (lo, hi) = if self.start_map <= self.end_map {
            (self.start_map, self.end_map)
        } else {
            (self.end_map, self.start_map)
        };
        // NaN lands on the start color
        let value = if value.is_nan() {
            self.start_map
        } else {
            value.clamp(lo, hi)
        };

        if value == self.end_map {
            return self.colors[last];
        }

        let pos = (value - self.start_map) / self.color_distance;
        let index = (pos.floor().max(0.0) as usize).min(last);
        if index == last {
            return self.colors[last];
        }
        let alpha = pos - index as f64;

        let a = to_vec(self.colors[index]);
        let b = to_vec(self.colors[index + 1]);
        let out = a * (1.0 - alpha) + b * alpha;
        Color::new(to_channel(out.x), to_channel(out.y), to_channel(out.z))
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn start_map(&self) -> f64 {
        self.start_map
    }

    pub fn end_map(&self) -> f64 {
        self.end_map
    }

    /// Signed width of the whole range, `end_map − start_map`.
    pub fn value_range(&self) -> f64 {
        self.value_range
    }

    /// Signed width of one segment between adjacent colors.
    pub fn color_distance(&self) -> f64 {
        self.color_distance
    }
}

fn to_vec(color: Color) -> DVec3 {
    DVec3::new(color.r as f64, color.g as f64, color.b as f64)
}

/// Truncate toward zero.
fn to_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}
