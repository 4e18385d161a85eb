use crate::error::{GeometryError, Result};
use crate::math::fit::{abc, FitOrder};
use crate::math::interpolate::lerp_point;
use crate::math::{cross, Point2};

use super::{check_fit_parameter, end_normals_agree, BezierCurve, LineSegment, QuadraticBezierCurve};

/// A cubic Bezier curve with two interior control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierCurve {
    points: [Point2; 4],
}

impl CubicBezierCurve {
    /// Creates a curve from its four control points.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    /// The straight segment `line` expressed as a cubic.
    #[must_use]
    pub fn from_line(line: &LineSegment) -> Self {
        let [p0, p3] = [line.start_point(), line.end_point()];
        Self::new(
            p0,
            lerp_point(1.0 / 3.0, &p0, &p3),
            lerp_point(2.0 / 3.0, &p0, &p3),
            p3,
        )
    }

    /// Exact degree elevation of a quadratic.
    #[must_use]
    pub fn from_quadratic(quadratic: &QuadraticBezierCurve) -> Self {
        let [q0, q1, q2] = [quadratic.points()[0], quadratic.points()[1], quadratic.points()[2]];
        Self::new(
            q0,
            q0 + (q1 - q0) * (2.0 / 3.0),
            q2 + (q1 - q2) * (2.0 / 3.0),
            q2,
        )
    }

    /// Builds a cubic from `start` to `end` that passes through `mid` at parameter `t`.
    ///
    /// The two de Casteljau points on either side of `mid` (see
    /// [`BezierCurve::hull`]) are placed along the start-to-end direction,
    /// `strut` before `mid` and `strut * (1 - t) / t` after it. Without an
    /// explicit `strut` the distance from `mid` to the chord construction point
    /// is used.
    ///
    /// At `t = 0` (or `t = 1`) `mid` replaces the start (or end) and the
    /// control points collapse onto the endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside `[0, 1]`, or if `start` and `end`
    /// coincide for an interior `t`.
    pub fn through_point(
        start: Point2,
        end: Point2,
        mid: Point2,
        t: f64,
        strut: Option<f64>,
    ) -> Result<Self> {
        check_fit_parameter(t)?;
        if t == 0.0 {
            return Ok(Self::new(mid, mid, end, end));
        }
        if t == 1.0 {
            return Ok(Self::new(start, start, mid, mid));
        }

        let abc = abc(FitOrder::Cubic, &start, &mid, &end, t);
        let d1 = strut.unwrap_or_else(|| (mid - abc.c).norm());
        let d2 = d1 * (1.0 - t) / t;

        let direction = (end - start).try_normalize(0.0).ok_or_else(|| {
            GeometryError::Degenerate("cubic fit needs distinct start and end points".into())
        })?;
        let e1 = mid - direction * d1;
        let e2 = mid + direction * d2;

        let v1 = abc.a + (e1 - abc.a) / (1.0 - t);
        let v2 = abc.a + (e2 - abc.a) / t;
        let c1 = start + (v1 - start) / t;
        let c2 = end + (v2 - end) / (1.0 - t);
        Ok(Self::new(start, c1, c2, end))
    }
}

impl TryFrom<&[Point2]> for CubicBezierCurve {
    type Error = GeometryError;

    fn try_from(points: &[Point2]) -> std::result::Result<Self, Self::Error> {
        match *points {
            [p0, p1, p2, p3] => Ok(Self::new(p0, p1, p2, p3)),
            _ => Err(GeometryError::WrongPointCount {
                expected: 4,
                found: points.len(),
            }),
        }
    }
}

impl BezierCurve for CubicBezierCurve {
    fn points(&self) -> &[Point2] {
        &self.points
    }

    fn points_mut(&mut self) -> &mut [Point2] {
        &mut self.points
    }

    fn split_at(&self, t: f64) -> (Self, Self) {
        let [p0, p1, p2, p3] = self.points;
        let a = lerp_point(t, &p0, &p1);
        let b = lerp_point(t, &p1, &p2);
        let c = lerp_point(t, &p2, &p3);
        let d = lerp_point(t, &a, &b);
        let e = lerp_point(t, &b, &c);
        let mid = lerp_point(t, &d, &e);
        (Self::new(p0, a, d, mid), Self::new(mid, e, c, p3))
    }

    fn flatness_squared(&self) -> f64 {
        let [p0, p1, p2, p3] = self.points;
        let a = p1.coords * 3.0 - p0.coords * 2.0 - p3.coords;
        let b = p2.coords * 3.0 - p0.coords - p3.coords * 2.0;
        ((a.x * a.x).max(b.x * b.x) + (a.y * a.y).max(b.y * b.y)) / 16.0
    }

    /// A cubic is simple when its end normals agree and both interior control
    /// points lie on the same side of the chord.
    fn is_simple(&self) -> bool {
        let [p0, p1, p2, p3] = self.points;
        let chord = p3 - p0;
        let s1 = cross(&chord, &(p1 - p0));
        let s2 = cross(&chord, &(p2 - p0));
        if (s1 > 0.0 && s2 < 0.0) || (s1 < 0.0 && s2 > 0.0) {
            return false;
        }
        end_normals_agree(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn basic_properties() {
        let c = CubicBezierCurve::new(p(1.0, 1.0), p(3.0, 2.0), p(4.0, 2.0), p(6.0, 1.0));
        assert!(c.is_simple());
        assert_eq!(c.order(), 3);
        assert_eq!(c.start_point(), p(1.0, 1.0));
        assert_eq!(c.end_point(), p(6.0, 1.0));
    }

    #[test]
    fn compute() {
        let c = CubicBezierCurve::new(p(3.0, 5.0), p(4.0, 6.0), p(6.0, 6.0), p(7.0, 5.0));
        assert_eq!(c.compute(0.0), p(3.0, 5.0));
        assert_eq!(c.compute(0.5), p(5.0, 5.75));
        assert_eq!(c.compute(1.0), p(7.0, 5.0));
    }

    #[test]
    fn simple() {
        // Straight line.
        let c1 = CubicBezierCurve::new(p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0), p(4.0, 4.0));
        assert!(c1.is_simple());
        // Almost straight.
        let c2 = CubicBezierCurve::new(p(1.0, 1.0), p(2.0, 1.05), p(3.0, 1.05), p(4.0, 1.0));
        assert!(c2.is_simple());
        // Control points on opposite sides of the chord.
        let c3 = CubicBezierCurve::new(p(1.0, 1.0), p(2.0, 1.05), p(3.0, 0.95), p(4.0, 1.0));
        assert!(!c3.is_simple());
        // End normals 90 degrees apart.
        let c4 = CubicBezierCurve::new(p(1.0, 1.0), p(1.0, 2.0), p(2.0, 3.0), p(3.0, 3.0));
        assert!(!c4.is_simple());
    }

    #[test]
    fn flatness() {
        let c1 = CubicBezierCurve::new(p(1.0, 2.0), p(2.0, 3.0), p(3.0, 2.0), p(4.0, 2.0));
        let c2 = CubicBezierCurve::new(p(2.0, 1.0), p(2.0, 2.0), p(3.0, 3.0), p(2.0, 4.0));
        assert_eq!(c1.flatness_squared(), 9.0 / 16.0);
        assert_eq!(c2.flatness_squared(), 9.0 / 16.0);
        assert_eq!(c1.flatness(), 0.75);

        let q1 = QuadraticBezierCurve::new(p(1.0, 2.0), p(2.0, 3.0), p(3.0, 2.0));
        let q2 = QuadraticBezierCurve::new(p(1.0, 1.0), p(3.0, 2.0), p(1.0, 3.0));
        assert_abs_diff_eq!(
            CubicBezierCurve::from_quadratic(&q1).flatness_squared(),
            0.25,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            CubicBezierCurve::from_quadratic(&q2).flatness_squared(),
            1.0,
            epsilon = 1e-12
        );
        let line = LineSegment::new(p(1.0, 2.0), p(3.0, 4.0));
        assert_abs_diff_eq!(
            CubicBezierCurve::from_line(&line).flatness_squared(),
            0.0,
            epsilon = 1e-24
        );
    }

    #[test]
    fn from_quadratic_samples_identically() {
        let q = QuadraticBezierCurve::new(p(1.0, 1.0), p(2.0, 2.0), p(3.0, 1.0));
        let c = CubicBezierCurve::from_quadratic(&q);
        for i in 0..10 {
            let t = f64::from(i) / 9.0;
            assert_abs_diff_eq!(c.compute(t), q.compute(t), epsilon = 1e-12);
        }
    }

    #[test]
    fn length_of_straight_cubic() {
        let c = CubicBezierCurve::new(
            p(1.0, 2.0),
            p(7.0 / 3.0, 3.0),
            p(11.0 / 3.0, 4.0),
            p(5.0, 5.0),
        );
        assert_abs_diff_eq!(c.length(), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn length_of_curved_cubic() {
        // Dense polyline approximation from below.
        let c = CubicBezierCurve::new(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0));
        let lut = c.lookup_table(10_000);
        let polyline: f64 = lut.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
        assert_abs_diff_eq!(c.length(), polyline, epsilon = 1e-6);
    }

    #[test]
    fn bounding_box() {
        let c = CubicBezierCurve::new(p(0.0, 0.0), p(1.0, 2.0), p(2.0, 2.0), p(3.0, 0.0));
        let bbox = c.bounding_box();
        assert_abs_diff_eq!(bbox.min, p(0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(bbox.max, p(3.0, 1.5), epsilon = 1e-12);
    }

    #[test]
    fn bounding_box_is_tight() {
        let c = CubicBezierCurve::new(p(0.0, 0.0), p(-2.0, 3.0), p(4.0, -1.0), p(1.0, 1.0));
        let bbox = c.bounding_box();
        let samples = BoundingBox::from_points(&c.lookup_table(20_000));
        assert_abs_diff_eq!(bbox.min, samples.min, epsilon = 1e-6);
        assert_abs_diff_eq!(bbox.max, samples.max, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_bounding_box() {
        let point = p(1.0, 1.0);
        let bbox = CubicBezierCurve::new(point, point, point, point).bounding_box();
        assert_eq!(bbox, BoundingBox::new(point, point));
    }

    #[test]
    fn through_point_with_strut() {
        let (start, mid, end) = (p(1.0, 1.0), p(2.0, 2.0), p(4.0, 0.0));
        let t = 7.0 / 9.0;
        let d = 1.5;
        let c = CubicBezierCurve::through_point(start, end, mid, t, Some(d)).unwrap();
        assert_eq!(c.start_point(), start);
        assert_eq!(c.end_point(), end);
        assert_abs_diff_eq!(c.compute(t), mid, epsilon = 1e-9);
        let hull = c.hull(t);
        assert_abs_diff_eq!((hull[8] - hull[7]).norm(), d / t, epsilon = 1e-9);
    }

    #[test]
    fn through_point_default_strut() {
        let (start, mid, end) = (p(0.0, 0.0), p(1.0, 1.0), p(3.0, 0.0));
        let c = CubicBezierCurve::through_point(start, end, mid, 0.4, None).unwrap();
        assert_abs_diff_eq!(c.compute(0.4), mid, epsilon = 1e-9);
    }

    #[test]
    fn through_point_edge_cases() {
        let (start, mid, end) = (p(0.0, 0.0), p(1.0, 1.0), p(3.0, 0.0));
        let c = CubicBezierCurve::through_point(start, end, mid, 0.0, None).unwrap();
        assert_eq!(c.points(), &[mid, mid, end, end]);
        let c = CubicBezierCurve::through_point(start, end, mid, 1.0, None).unwrap();
        assert_eq!(c.points(), &[start, start, mid, mid]);
        assert!(CubicBezierCurve::through_point(start, end, mid, -0.1, None).is_err());
        assert!(CubicBezierCurve::through_point(start, start, mid, 0.5, None).is_err());
    }

    #[test]
    fn self_intersection() {
        let c = CubicBezierCurve::new(p(0.0, 0.0), p(2.0, 1.0), p(-1.0, 1.0), p(1.0, 0.0));
        let found = c.self_intersections();
        assert_eq!(found.len(), 1);
        let expected = 60.0_f64.sqrt() / 20.0;
        assert_abs_diff_eq!(found[0].t1, 0.5 - expected, epsilon = 1e-5);
        assert_abs_diff_eq!(found[0].t2, 0.5 + expected, epsilon = 1e-5);
        assert_abs_diff_eq!(c.compute(found[0].t1), c.compute(found[0].t2), epsilon = 1e-5);
    }

    #[test]
    fn simple_cubic_has_no_self_intersection() {
        let c = CubicBezierCurve::new(p(0.0, 0.0), p(1.0, 2.0), p(2.0, 2.0), p(3.0, 0.0));
        assert!(c.self_intersections().is_empty());
    }

    #[test]
    fn try_from_slice() {
        let points = [p(0.0, 0.0); 3];
        assert_eq!(
            CubicBezierCurve::try_from(&points[..]),
            Err(GeometryError::WrongPointCount {
                expected: 4,
                found: 3
            })
        );
    }
}
