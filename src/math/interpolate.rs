//! Affine interpolation helpers.

use super::Point2;

/// Linear interpolation between two scalars.
///
/// Written as a weighted sum so that `t = 0` and `t = 1` return `a` and `b`
/// exactly.
#[must_use]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Linear interpolation between two points, exact at `t = 0` and `t = 1`.
#[must_use]
pub fn lerp_point(t: f64, a: &Point2, b: &Point2) -> Point2 {
    Point2::from(a.coords * (1.0 - t) + b.coords * t)
}

/// Remaps `t` from the range `[in0, in1]` to `[out0, out1]`.
///
/// An empty input range maps everything to `out0`.
#[must_use]
pub fn map(t: f64, in0: f64, in1: f64, out0: f64, out1: f64) -> f64 {
    let span = in1 - in0;
    if span == 0.0 {
        return out0;
    }
    out0 + (out1 - out0) * ((t - in0) / span)
}

/// Clamps `value` to `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics; NaN passes through unchanged.
#[must_use]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}
