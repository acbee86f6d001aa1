//! Serializable descriptions of curves and color maps.
//!
//! Pipelines keep their tone curves and gradients as data; these structs
//! are the JSON-facing form and build the runtime types on demand.
//!
//! ```json
//! {
//!   "curves": { "lift": { "points": [[0, 20], [64, 80], [192, 210], [255, 255]] } },
//!   "maps": {
//!     "heat": { "colors": [[0, 0, 0], [255, 0, 0], [255, 255, 0]], "start": 0, "end": 1 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ColorError, Result};
use crate::grading::curves::{ColorCurve, DEFAULT_SMOOTHING};
use crate::transform::color_map::ColorMap;

/// Control points for a [`ColorCurve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCurveConfig {
    /// `[x, y]` pairs with strictly increasing x.
    pub points: Vec<[f64; 2]>,
    /// Upper bound on the sum of squared residuals at the control points.
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
}

impl ColorCurveConfig {
    pub fn build(&self) -> Result<ColorCurve> {
        let points: Vec<(f64, f64)> = self.points.iter().map(|[x, y]| (*x, *y)).collect();
        ColorCurve::fit_with_smoothing(&points, self.smoothing)
    }
}

fn default_smoothing() -> f64 {
    DEFAULT_SMOOTHING
}

/// Colors and range for a [`ColorMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMapConfig {
    pub colors: Vec<Color>,
    pub start: f64,
    pub end: f64,
}

impl ColorMapConfig {
    pub fn build(&self) -> Result<ColorMap> {
        ColorMap::new(&self.colors, self.start, self.end)
    }
}

/// Named curves and color maps, usually loaded from a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorPresets {
    #[serde(default)]
    pub curves: BTreeMap<String, ColorCurveConfig>,
    #[serde(default)]
    pub maps: BTreeMap<String, ColorMapConfig>,
}

impl ColorPresets {
    pub fn from_json(json: &str) -> Result<Self> {
        let presets: Self = serde_json::from_str(json)?;
        tracing::debug!(
            curves = presets.curves.len(),
            maps = presets.maps.len(),
            "loaded color presets"
        );
        Ok(presets)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fit the named curve.
    pub fn curve(&self, name: &str) -> Result<ColorCurve> {
        self.curves
            .get(name)
            .ok_or_else(|| ColorError::UnknownPreset(name.to_string()))?
            .build()
    }

    /// Build the named color map.
    pub fn map(&self, name: &str) -> Result<ColorMap> {
        self.maps
            .get(name)
            .ok_or_else(|| ColorError::UnknownPreset(name.to_string()))?
            .build()
    }
}
