use crate::geometry::BezierCurve;

use super::{curve_curve, sort_and_merge, Intersection, IntersectionParams};

/// Finds the points where a curve crosses itself.
///
/// Lines and quadratics cannot cross themselves and always yield nothing.
/// A cubic is cut into simple pieces (see [`BezierCurve::reduce`]) and every
/// pair of non-adjacent pieces is intersected. Results have `t1 < t2`.
pub struct SelfIntersect<'a, C> {
    curve: &'a C,
    params: IntersectionParams,
}

impl<'a, C: BezierCurve> SelfIntersect<'a, C> {
    /// Creates a new `SelfIntersect` query with default parameters.
    #[must_use]
    pub fn new(curve: &'a C) -> Self {
        Self {
            curve,
            params: IntersectionParams::default(),
        }
    }

    /// Sets custom search parameters.
    #[must_use]
    pub fn with_params(mut self, params: IntersectionParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> Vec<Intersection> {
        if self.curve.order() < 3 {
            return Vec::new();
        }

        let pieces = self.curve.reduce();
        let mut found = Vec::new();
        for (i, left) in pieces.iter().enumerate() {
            for right in pieces.iter().skip(i + 2) {
                for hit in curve_curve::intersect(&left.curve, &right.curve, &self.params) {
                    let t1 = left.original_parameter(hit.t1);
                    let t2 = right.original_parameter(hit.t2);
                    // Pieces meeting end to end touch without crossing.
                    if (t2 - t1).abs() < self.params.tolerance {
                        continue;
                    }
                    found.push(Intersection::new(t1, t2));
                }
            }
        }
        sort_and_merge(found, self.params.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CubicBezierCurve, Curve, LineSegment, QuadraticBezierCurve};
    use crate::math::Point2;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn lower_orders_never_self_intersect() {
        let curves: Vec<Curve> = vec![
            LineSegment::new(p(0.0, 0.0), p(3.0, 1.0)).into(),
            QuadraticBezierCurve::new(p(0.0, 0.0), p(5.0, 5.0), p(0.0, 0.1)).into(),
            QuadraticBezierCurve::new(p(1.0, 1.0), p(1.0, 1.0), p(1.0, 1.0)).into(),
        ];
        for curve in &curves {
            assert!(SelfIntersect::new(curve).execute().is_empty());
        }
    }

    #[test]
    fn looped_cubic() {
        let c = CubicBezierCurve::new(p(0.0, 0.0), p(2.0, 1.0), p(-1.0, 1.0), p(1.0, 0.0));
        let found = SelfIntersect::new(&c).execute();
        assert_eq!(found.len(), 1);
        let hit = found[0];
        assert!(hit.t1 < hit.t2);
        assert_abs_diff_eq!(c.compute(hit.t1), p(0.5, 0.3), epsilon = 1e-5);
        assert_abs_diff_eq!(c.compute(hit.t2), p(0.5, 0.3), epsilon = 1e-5);
    }

    #[test]
    fn cusp_free_s_curve() {
        let c = CubicBezierCurve::new(p(0.0, 0.0), p(1.0, 1.0), p(2.0, -1.0), p(3.0, 0.0));
        assert!(SelfIntersect::new(&c).execute().is_empty());
    }
}
