//! The "ABC" construction for building a curve through a given point.
//!
//! For a quadratic or cubic curve with start `S` and end `E`, the point `B`
//! at parameter `t`, the point `C` on the chord `S-E` and the control point
//! (or de Casteljau apex) `A` are always collinear, and the ratios
//! `|A-B| / |B-C|` and `|C-E| / |S-E|` depend only on the order and `t`.

use super::{Point2, Vector2};

/// Curve orders that support the ABC construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOrder {
    Quadratic,
    Cubic,
}

impl FitOrder {
    fn exponent(self) -> i32 {
        match self {
            FitOrder::Quadratic => 2,
            FitOrder::Cubic => 3,
        }
    }
}

/// The three collinear points of the ABC construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Abc {
    /// Control point (quadratic) or de Casteljau apex (cubic).
    pub a: Point2,
    /// The point the curve passes through at `t`.
    pub b: Point2,
    /// Foot of the construction line on the chord from start to end.
    pub c: Point2,
}

/// Ratio `|B - C| / |A - B|` used to place `A` along the `C -> B` line.
///
/// At `t = 0` and `t = 1` the general formula divides by zero; those values
/// are returned as-is.
#[must_use]
pub fn abc_ratio(order: FitOrder, t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let n = order.exponent();
    let bottom = t.powi(n) + (1.0 - t).powi(n);
    let top = bottom - 1.0;
    (top / bottom).abs()
}

/// Fraction `u` such that `C = u * S + (1 - u) * E`.
#[must_use]
pub fn projection_ratio(order: FitOrder, t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let n = order.exponent();
    let top = (1.0 - t).powi(n);
    let bottom = t.powi(n) + top;
    top / bottom
}

/// Computes `A`, `B` and `C` for a curve from `start` to `end` passing through `mid` at `t`.
///
/// `t` must lie strictly inside `(0, 1)`; the endpoints are handled by the
/// curve constructors directly.
#[must_use]
pub fn abc(order: FitOrder, start: &Point2, mid: &Point2, end: &Point2, t: f64) -> Abc {
    let u = projection_ratio(order, t);
    let c = Point2::from(start.coords * u + end.coords * (1.0 - u));
    let s = abc_ratio(order, t);
    let offset: Vector2 = (mid - c) / s;
    Abc {
        a: mid + offset,
        b: *mid,
        c,
    }
}
