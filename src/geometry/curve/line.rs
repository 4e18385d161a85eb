use crate::error::GeometryError;
use crate::math::interpolate::lerp_point;
use crate::math::Point2;

use super::BezierCurve;

/// A straight segment from `p0` to `p1`, the order 1 Bezier curve.
///
/// The parametric form is: `P(t) = (1 - t) * p0 + t * p1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    points: [Point2; 2],
}

impl LineSegment {
    /// Creates a segment between two points.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2) -> Self {
        Self { points: [p0, p1] }
    }
}

impl TryFrom<&[Point2]> for LineSegment {
    type Error = GeometryError;

    fn try_from(points: &[Point2]) -> std::result::Result<Self, Self::Error> {
        match *points {
            [p0, p1] => Ok(Self::new(p0, p1)),
            _ => Err(GeometryError::WrongPointCount {
                expected: 2,
                found: points.len(),
            }),
        }
    }
}

impl BezierCurve for LineSegment {
    fn points(&self) -> &[Point2] {
        &self.points
    }

    fn points_mut(&mut self) -> &mut [Point2] {
        &mut self.points
    }

    fn split_at(&self, t: f64) -> (Self, Self) {
        let [p0, p1] = self.points;
        let mid = lerp_point(t, &p0, &p1);
        (Self::new(p0, mid), Self::new(mid, p1))
    }

    fn flatness_squared(&self) -> f64 {
        0.0
    }
}
