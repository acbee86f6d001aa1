//! Tone curves baked into 256-entry lookup tables.
//!
//! A [`ColorCurve`] maps every 8-bit input level to an output level in
//! [0, 255]. Curves are built from a fitted [`SmoothingSpline`], from
//! sparse control points (fitted on the fly), or from any transfer function.
//! They are applied per channel by the functions in [`crate::grading::apply`].
//!
//! # Complexity
//! - Fit: O(N) for the single-cubic pass, then O(N) per λ trial (~40 trials)
//! - Bake: O(256 × log N)

use crate::error::Result;
use crate::grading::spline::SmoothingSpline;

/// Number of samples in a curve table.
pub const CURVE_SIZE: usize = 256;

/// Upper bound of the 8-bit domain.
const LEVEL_MAX: f64 = 255.0;

/// Smoothing factor used by [`ColorCurve::fit`].
pub const DEFAULT_SMOOTHING: f64 = 1.0;

/// A 256-entry transfer function over the 8-bit range, with every value
/// clamped to [0, 255].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCurve {
    curve: [f64; CURVE_SIZE],
}

impl ColorCurve {
    /// Fit a smoothing spline through `(x, y)` control points and bake it.
    ///
    /// Needs at least four points with strictly increasing x.
    ///
    /// ```
    /// use phlox_color::ColorCurve;
    ///
    /// let curve = ColorCurve::fit(&[(0.0, 0.0), (64.0, 32.0), (192.0, 224.0), (255.0, 255.0)])?;
    /// assert_eq!(curve.values().len(), 256);
    /// # Ok::<(), phlox_color::ColorError>(())
    /// ```
    pub fn fit(points: &[(f64, f64)]) -> Result<Self> {
        Self::fit_with_smoothing(points, DEFAULT_SMOOTHING)
    }

    /// Like [`ColorCurve::fit`] with an explicit smoothing factor.
    pub fn fit_with_smoothing(points: &[(f64, f64)], smoothing: f64) -> Result<Self> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
        let spline = SmoothingSpline::fit(&xs, &ys, smoothing)?;
        Ok(Self::from_spline(&spline))
    }

    /// Sample an already fitted spline.
    pub fn from_spline(spline: &SmoothingSpline) -> Self {
        Self::from_fn(|x| spline.evaluate(x))
    }

    /// Sample any transfer function at x = 0, 1, …, 255.
    pub fn from_fn(f: impl Fn(f64) -> f64) -> Self {
        let mut curve = [0.0; CURVE_SIZE];
        for (i, v) in curve.iter_mut().enumerate() {
            let x = i as f64 * LEVEL_MAX / (CURVE_SIZE - 1) as f64;
            let y = f(x);
            // NaN collapses to 0
            *v = if y.is_nan() { 0.0 } else { y.clamp(0.0, LEVEL_MAX) };
        }
        Self { curve }
    }

    /// The curve that maps every level to itself.
    pub fn identity() -> Self {
        Self::from_fn(|x| x)
    }

    pub fn values(&self) -> &[f64; CURVE_SIZE] {
        &self.curve
    }

    /// Curve value at an 8-bit input level.
    pub fn get(&self, level: u8) -> f64 {
        self.curve[level as usize]
    }

    /// Curve value at an 8-bit input level, truncated to a level.
    pub fn map(&self, level: u8) -> u8 {
        self.curve[level as usize] as u8
    }
}

impl Default for ColorCurve {
    fn default() -> Self {
        Self::identity()
    }
}
