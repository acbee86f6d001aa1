//! RGB ↔ HSV conversion in the 8-bit friendly convention.
//!
//! Hue is stored on [0, 180) (half degrees) so it fits a byte; saturation
//! and value share the 0–255 scale of the RGB channels.
//!
//! ```text
//! H' = H° / 2        (H° in [0, 360))
//! S' = S × 255       (S in [0, 1])
//! V' = max(R, G, B)
//! ```
//!
//! Hue and saturation are invariant to the scale of the input channels,
//! so the raw 0–255 components give the same H and S as normalized ones,
//! while V stays on the raw channel scale.

use palette::{FromColor, Hsv, Srgb};

use super::Color;

/// Upper bound of the scaled hue range.
pub const HUE_MAX: f64 = 180.0;

/// Convert an RGB color to scaled `(H, S, V)`.
pub fn rgb2hsv(color: Color) -> (f64, f64, f64) {
    let hsv = to_hsv(color);
    let hue = hsv.hue.into_positive_degrees() / 360.0 * HUE_MAX;
    (hue % HUE_MAX, hsv.saturation * 255.0, hsv.value * 255.0)
}

/// Scaled hue of an RGB color, in [0, 180).
pub fn hue(color: Color) -> f64 {
    rgb2hsv(color).0
}

/// Fully saturated, full-value RGB color for a scaled hue.
///
/// The hue is periodic: 180 maps back to red.
pub fn hue2rgb(hue: f64) -> Color {
    hsv2rgb(hue, 255.0, 255.0)
}

/// [`hue2rgb`] with channels in BGR order.
pub fn hue2bgr(hue: f64) -> Color {
    hue2rgb(hue).reversed()
}

/// Convert scaled `(H, S, V)` back to RGB. Channels are rounded to nearest,
/// ties to even.
///
/// Saturation and value are clamped to [0, 255]; hue wraps around.
pub fn hsv2rgb(hue: f64, saturation: f64, value: f64) -> Color {
    let degrees = (hue / HUE_MAX * 360.0).rem_euclid(360.0);
    let hsv = Hsv::<palette::encoding::Srgb, f64>::new(
        degrees,
        (saturation / 255.0).clamp(0.0, 1.0),
        (value / 255.0).clamp(0.0, 1.0),
    );
    let rgb = Srgb::<f64>::from_color(hsv);
    Color::new(
        to_channel(rgb.red),
        to_channel(rgb.green),
        to_channel(rgb.blue),
    )
}

impl Color {
    /// Method form of [`rgb2hsv`].
    pub fn to_hsv(self) -> (f64, f64, f64) {
        rgb2hsv(self)
    }

    pub fn hue(self) -> f64 {
        hue(self)
    }

    /// Method form of [`hue2rgb`].
    pub fn from_hue(hue: f64) -> Self {
        hue2rgb(hue)
    }
}

fn to_hsv(color: Color) -> Hsv<palette::encoding::Srgb, f64> {
    let rgb = Srgb::new(
        color.r as f64 / 255.0,
        color.g as f64 / 255.0,
        color.b as f64 / 255.0,
    );
    Hsv::from_color(rgb)
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_primaries_hue() {
        assert!(hue(Color::RED).abs() < EPSILON);
        assert!((hue(Color::new(0, 255, 0)) - 60.0).abs() < EPSILON);
        assert!((hue(Color::BLUE) - 120.0).abs() < EPSILON);
        assert!((hue(Color::YELLOW) - 30.0).abs() < EPSILON);
        assert!((Color::CYAN.hue() - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_rgb2hsv_scales() {
        let (h, s, v) = rgb2hsv(Color::new(128, 0, 0));
        assert!(h.abs() < EPSILON);
        assert!((s - 255.0).abs() < EPSILON);
        assert!((v - 128.0).abs() < EPSILON);
    }

    #[test]
    fn test_gray_has_zero_saturation() {
        let (h, s, v) = rgb2hsv(Color::GRAY);
        assert!(h.abs() < EPSILON);
        assert!(s.abs() < EPSILON);
        assert!((v - 128.0).abs() < EPSILON);

        let (_, s, v) = rgb2hsv(Color::BLACK);
        assert!(s.abs() < EPSILON);
        assert!(v.abs() < EPSILON);
    }

    #[test]
    fn test_hue_wraps_below_red() {
        // Red with a touch of blue sits just below 180.
        let h = hue(Color::new(255, 0, 1));
        assert!(h > 179.0 && h < HUE_MAX, "hue {h}");
    }

    #[test]
    fn test_hue2rgb_primaries() {
        assert_eq!(hue2rgb(0.0), Color::RED);
        assert_eq!(hue2rgb(60.0), Color::new(0, 255, 0));
        assert_eq!(hue2rgb(120.0), Color::BLUE);
        assert_eq!(hue2rgb(180.0), Color::RED);
        assert_eq!(hue2rgb(90.0), Color::CYAN);
    }

    #[test]
    fn test_hue2rgb_half_channels_round_to_even() {
        // Odd hues in the first sectors put the ramp channel on exactly .5.
        assert_eq!(hue2rgb(13.0), Color::new(255, 110, 0));
        assert_eq!(hue2rgb(15.0), Color::new(255, 128, 0));
        assert_eq!(hue2rgb(17.0), Color::new(255, 144, 0));
        assert_eq!(hue2rgb(43.0), Color::new(144, 255, 0));
        assert_eq!(hue2rgb(45.0), Color::new(128, 255, 0));
    }

    #[test]
    fn test_hue2bgr_reverses() {
        assert_eq!(hue2bgr(0.0), Color::new(0, 0, 255));
        assert_eq!(hue2bgr(120.0), Color::new(255, 0, 0));
    }

    #[test]
    fn test_hsv_roundtrip_preserves_color() {
        for c in [Color::VIOLET, Color::SALMON, Color::ROYALBLUE, Color::KHAKI] {
            let (h, s, v) = rgb2hsv(c);
            assert_eq!(hsv2rgb(h, s, v), c, "roundtrip of {c}");
        }
    }
}
