/// Errors raised while fitting a smoothing spline to control points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("spline fit needs at least {required} control points, got {got}")]
    TooFewPoints { required: usize, got: usize },
    #[error("x and y coordinate counts differ ({xs} vs {ys})")]
    LengthMismatch { xs: usize, ys: usize },
    #[error("control point x-coordinates must be strictly increasing (at index {index})")]
    NotIncreasing { index: usize },
    #[error("control point {index} is not finite")]
    NonFinite { index: usize },
    #[error("smoothing factor must be finite and non-negative, got {0}")]
    InvalidSmoothing(f64),
    #[error("smoothing system is not positive definite")]
    NotPositiveDefinite,
}

#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("curve fit failed: {0}")]
    Fit(#[from] FitError),
    #[error("color map needs at least one color")]
    EmptyColors,
    #[error("color map range is degenerate: start {start}, end {end}")]
    DegenerateRange { start: f64, end: f64 },
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ColorError>;
