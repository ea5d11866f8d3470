//! Numeric ranges and interpolation over blade control points.
//!
//! [`Range`] maps a unit parameter affinely onto an interval, [`lerp`] and
//! [`quadratic_bezier`] blend [`Point`]s field by field.

use serde::{Deserialize, Serialize};

use crate::error::GrassError;

/// A closed numeric interval with `min <= max`.
///
/// Bounds given in reverse order are swapped at construction, so
/// `Range::new(5.0, 2.0)` and `Range::new(2.0, 5.0)` are identical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Creates a range, normalizing the operand order.
    ///
    /// Returns `GrassError::InvalidParameter` if either bound is NaN or infinite.
    pub fn new(a: f64, b: f64) -> Result<Self, GrassError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(GrassError::InvalidParameter(format!(
                "range bounds must be finite, got ({a}, {b})"
            )));
        }
        Ok(if b >= a {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Maps `t` affinely onto the range: `0` gives `min`, `1` gives `max`.
    ///
    /// `t` outside [0, 1] extrapolates; it is not clamped.
    pub fn sample(&self, t: f64) -> f64 {
        t * (self.max - self.min) + self.min
    }
}

/// Samples `t` within `[min, max]` without keeping the range around.
pub fn sample_range(min: f64, max: f64, t: f64) -> Result<f64, GrassError> {
    Ok(Range::new(min, max)?.sample(t))
}

/// Two-sided clamp of `v` into `[lower, upper]`.
///
/// Returns `GrassError::InvalidParameter` if `lower > upper` or either bound
/// is NaN.
pub fn clamp(v: f64, lower: f64, upper: f64) -> Result<f64, GrassError> {
    if lower.is_nan() || upper.is_nan() || lower > upper {
        return Err(GrassError::InvalidParameter(format!(
            "clamp bounds reversed or NaN: [{lower}, {upper}]"
        )));
    }
    Ok(v.max(lower).min(upper))
}

/// A blade control point: position `(x, y)` in model space and half-width `w`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub w: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, w: f64) -> Self {
        Self { x, y, w }
    }
}

/// Linear interpolation between two points, field by field.
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    let s = 1.0 - t;
    Point {
        x: a.x * s + b.x * t,
        y: a.y * s + b.y * t,
        w: a.w * s + b.w * t,
    }
}

/// Evaluates a quadratic Bézier curve at `t` by De Casteljau's method.
pub fn quadratic_bezier(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    lerp(lerp(p0, p1, t), lerp(p1, p2, t), t)
}
