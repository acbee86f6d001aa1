//! Grayscale reductions of a single color.

use super::Color;

/// Luminosity weights for R, G, B.
const LUMINOSITY_WEIGHTS: [f64; 3] = [0.21, 0.71, 0.07];

/// Mean of the three channels, truncated.
pub fn average(color: Color) -> u8 {
    ((color.r as u32 + color.g as u32 + color.b as u32) / 3) as u8
}

/// Midpoint of the brightest and darkest channel, truncated.
pub fn lightness(color: Color) -> u8 {
    let max = color.r.max(color.g).max(color.b) as u16;
    let min = color.r.min(color.g).min(color.b) as u16;
    ((max + min) / 2) as u8
}

/// Weighted sum `0.21·R + 0.71·G + 0.07·B`, truncated.
pub fn luminosity(color: Color) -> u8 {
    let [wr, wg, wb] = LUMINOSITY_WEIGHTS;
    (wr * color.r as f64 + wg * color.g as f64 + wb * color.b as f64) as u8
}

impl Color {
    pub fn average(self) -> u8 {
        average(self)
    }

    pub fn lightness(self) -> u8 {
        lightness(self)
    }

    pub fn luminosity(self) -> u8 {
        luminosity(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminosity_of_red() {
        assert_eq!(luminosity(Color::RED), 53);
        assert_eq!(Color::RED.luminosity(), 53);
    }

    #[test]
    fn test_lightness_midpoint() {
        assert_eq!(lightness(Color::new(10, 200, 30)), 105);
    }

    #[test]
    fn test_average_truncates() {
        assert_eq!(average(Color::new(1, 1, 2)), 1);
        assert_eq!(average(Color::WHITE), 255);
    }

    #[test]
    fn test_white_stays_in_range() {
        assert_eq!(lightness(Color::WHITE), 255);
        // Weights sum to 0.99, so white does not reach 255.
        assert_eq!(luminosity(Color::WHITE), 252);
        assert_eq!(luminosity(Color::BLACK), 0);
    }
}
