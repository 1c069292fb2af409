pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Offset used to park the pen after the last stroke of a timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RestOffset {
    /// Horizontal offset in screen units.
    pub dx: f64,
    /// Vertical offset in screen units.
    pub dy: f64,
}

impl Default for RestOffset {
    fn default() -> Self {
        Self { dx: 20.0, dy: 20.0 }
    }
}

impl RestOffset {
    /// Resting point for a pen that stopped at `p`.
    pub fn apply(self, p: Point) -> Point {
        p + Vec2::new(self.dx, self.dy)
    }
}

/// Linear interpolation between two points.
pub(crate) fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    a.lerp(b, t)
}

/// Maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`, clamped at both ends.
///
/// A degenerate input band (`in_min == in_max`) maps everything at or above the band to
/// `out_max` and everything below it to `out_min`.
pub(crate) fn map_clamped(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    let t = if span.abs() <= f64::EPSILON {
        if value >= in_max { 1.0 } else { 0.0 }
    } else {
        (value - in_min) / span
    };
    if t <= 0.0 {
        return out_min;
    }
    if t >= 1.0 {
        return out_max;
    }
    out_min + (out_max - out_min) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
