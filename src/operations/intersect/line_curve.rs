use crate::geometry::BezierCurve;
use crate::math::interpolate::clamp;
use crate::math::roots::bernstein_roots;
use crate::math::{cross, Point2};

use super::Intersection;

/// Line parameters this far outside `[0, 1]` still count as on the segment.
const SEGMENT_SLACK: f64 = 1e-9;

/// Intersections of the segment `p0 -> p1` with `curve`, solved in closed form.
///
/// The signed distances of the control points from the line are the Bernstein
/// coefficients of the curve's distance function, so its roots are the
/// crossings. Results carry the segment parameter in `t1`.
pub(super) fn intersect<C: BezierCurve>(p0: &Point2, p1: &Point2, curve: &C) -> Vec<Intersection> {
    let direction = p1 - p0;
    let length_squared = direction.norm_squared();
    if length_squared == 0.0 {
        return Vec::new();
    }

    let distances: Vec<f64> = curve
        .points()
        .iter()
        .map(|p| cross(&direction, &(p - p0)))
        .collect();

    bernstein_roots(&distances)
        .into_iter()
        .filter_map(|t| {
            let s = (curve.compute(t) - p0).dot(&direction) / length_squared;
            (s >= -SEGMENT_SLACK && s <= 1.0 + SEGMENT_SLACK)
                .then(|| Intersection::new(clamp(s, 0.0, 1.0), t))
        })
        .collect()
}
