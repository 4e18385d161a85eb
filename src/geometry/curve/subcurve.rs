use crate::math::interpolate::lerp;

use super::BezierCurve;

/// A piece of a curve together with the parameter interval it covers on the
/// curve it was cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct Subcurve<C> {
    /// Start of the interval on the original curve.
    pub t1: f64,
    /// End of the interval on the original curve.
    pub t2: f64,
    /// The piece itself, reparameterized to `[0, 1]`.
    pub curve: C,
}

impl<C: BezierCurve> Subcurve<C> {
    /// Wraps a whole curve, covering `[0, 1]`.
    #[must_use]
    pub fn new(curve: C) -> Self {
        Self::from_interval(curve, 0.0, 1.0)
    }

    /// Wraps a piece already cut from `[t1, t2]` of some curve.
    #[must_use]
    pub fn from_interval(curve: C, t1: f64, t2: f64) -> Self {
        Self { t1, t2, curve }
    }

    /// Maps a parameter on the piece back to the original curve.
    #[must_use]
    pub fn original_parameter(&self, t: f64) -> f64 {
        lerp(t, self.t1, self.t2)
    }

    /// Splits the piece at local parameter `t`.
    #[must_use]
    pub fn split_at(&self, t: f64) -> (Self, Self) {
        let (left, right) = self.curve.split_at(t);
        let mid = self.original_parameter(t);
        (
            Self::from_interval(left, self.t1, mid),
            Self::from_interval(right, mid, self.t2),
        )
    }

    /// The part of the piece between local parameters `t1` and `t2`.
    #[must_use]
    pub fn split(&self, t1: f64, t2: f64) -> Self {
        Self::from_interval(
            self.curve.split(t1, t2),
            self.original_parameter(t1),
            self.original_parameter(t2),
        )
    }
}
