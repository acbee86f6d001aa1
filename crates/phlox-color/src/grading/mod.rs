//! Tone curves — smoothing-spline fitting, curve tables, and per-pixel application.

pub mod apply;
pub mod curves;
pub mod spline;
