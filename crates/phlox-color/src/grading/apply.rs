//! Apply curves and color maps to in-memory 8-bit images.

use image::{GrayImage, Rgb, RgbImage};

use crate::color::Color;
use crate::color::hsv::{HUE_MAX, hsv2rgb, rgb2hsv};
use crate::grading::curves::ColorCurve;
use crate::transform::color_map::ColorMap;

/// Pass each channel through its own curve.
pub fn apply_rgb_curve(
    image: &mut RgbImage,
    red: &ColorCurve,
    green: &ColorCurve,
    blue: &ColorCurve,
) {
    for px in image.pixels_mut() {
        let [r, g, b] = px.0;
        px.0 = [red.map(r), green.map(g), blue.map(b)];
    }
}

/// Pass every channel through the same curve.
pub fn apply_intensity_curve(image: &mut RgbImage, curve: &ColorCurve) {
    apply_rgb_curve(image, curve, curve, curve);
}

/// Pass hue, saturation and value through separate curves.
///
/// The hue curve works on the scaled [0, 180] hue; its output is clamped
/// into that range. Saturation and value use the full 0–255 curve.
pub fn apply_hsv_curve(
    image: &mut RgbImage,
    hue: &ColorCurve,
    saturation: &ColorCurve,
    value: &ColorCurve,
) {
    for px in image.pixels_mut() {
        let (h, s, v) = rgb2hsv(Color::from(px.0));
        let h = hue.get(h as u8).min(HUE_MAX);
        let s = saturation.get(s as u8);
        let v = value.get(v as u8);
        px.0 = hsv2rgb(h, s, v).to_array();
    }
}

/// Colorize a grayscale image by looking each level up in `map`.
pub fn colorize(gray: &GrayImage, map: &ColorMap) -> RgbImage {
    let lut: Vec<Color> = (0..=255u8).map(|level| map.lookup(level as f64)).collect();
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let level = gray.get_pixel(x, y).0[0];
        Rgb(lut[level as usize].to_array())
    })
}
