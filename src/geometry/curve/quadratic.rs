use crate::error::{GeometryError, Result};
use crate::math::fit::{abc, FitOrder};
use crate::math::interpolate::lerp_point;
use crate::math::Point2;

use super::{check_fit_parameter, BezierCurve, LineSegment};

/// A quadratic Bezier curve with one interior control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezierCurve {
    points: [Point2; 3],
}

impl QuadraticBezierCurve {
    /// Creates a curve from its three control points.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }

    /// The straight segment `line` expressed as a quadratic.
    #[must_use]
    pub fn from_line(line: &LineSegment) -> Self {
        let [p0, p1] = [line.start_point(), line.end_point()];
        Self::new(p0, lerp_point(0.5, &p0, &p1), p1)
    }

    /// Builds the quadratic from `start` to `end` that passes through `mid` at parameter `t`.
    ///
    /// At `t = 0` (or `t = 1`) `mid` replaces the start (or end) and the
    /// control point collapses onto it.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside `[0, 1]`.
    pub fn through_point(start: Point2, end: Point2, mid: Point2, t: f64) -> Result<Self> {
        check_fit_parameter(t)?;
        if t == 0.0 {
            return Ok(Self::new(mid, mid, end));
        }
        if t == 1.0 {
            return Ok(Self::new(start, mid, mid));
        }
        let abc = abc(FitOrder::Quadratic, &start, &mid, &end, t);
        Ok(Self::new(start, abc.a, end))
    }
}

impl TryFrom<&[Point2]> for QuadraticBezierCurve {
    type Error = GeometryError;

    fn try_from(points: &[Point2]) -> std::result::Result<Self, Self::Error> {
        match *points {
            [p0, p1, p2] => Ok(Self::new(p0, p1, p2)),
            _ => Err(GeometryError::WrongPointCount {
                expected: 3,
                found: points.len(),
            }),
        }
    }
}

impl BezierCurve for QuadraticBezierCurve {
    fn points(&self) -> &[Point2] {
        &self.points
    }

    fn points_mut(&mut self) -> &mut [Point2] {
        &mut self.points
    }

    fn split_at(&self, t: f64) -> (Self, Self) {
        let [p0, p1, p2] = self.points;
        let a = lerp_point(t, &p0, &p1);
        let b = lerp_point(t, &p1, &p2);
        let mid = lerp_point(t, &a, &b);
        (Self::new(p0, a, mid), Self::new(mid, b, p2))
    }

    fn flatness_squared(&self) -> f64 {
        let [p0, p1, p2] = self.points;
        let a = p1.coords * 2.0 - p0.coords - p2.coords;
        a.norm_squared() / 16.0
    }
}
