use tracing::{debug, trace};

use crate::geometry::{BezierCurve, Subcurve};
use crate::math::intersect_2d::segment_segment_intersect_2d;

use super::{Intersection, IntersectionParams};

/// Intersections of two curves by recursive subdivision.
///
/// Pairs of pieces whose boxes overlap are halved until both are flat enough
/// to stand in for their chords, which are then intersected as segments.
/// Results are unsorted and may contain near duplicates.
pub(super) fn intersect<A: BezierCurve, B: BezierCurve>(
    a: &A,
    b: &B,
    params: &IntersectionParams,
) -> Vec<Intersection> {
    let mut found = Vec::new();
    search(
        &Subcurve::new(a.clone()),
        &Subcurve::new(b.clone()),
        0,
        params,
        &mut found,
    );
    trace!(candidates = found.len(), "curve/curve subdivision finished");
    found
}

fn search<A: BezierCurve, B: BezierCurve>(
    a: &Subcurve<A>,
    b: &Subcurve<B>,
    depth: usize,
    params: &IntersectionParams,
    found: &mut Vec<Intersection>,
) {
    if !a.curve.bounding_box().overlaps(&b.curve.bounding_box()) {
        return;
    }

    if a.curve.flatness_squared() < params.flatness_threshold
        && b.curve.flatness_squared() < params.flatness_threshold
    {
        if let Some((s, u)) = segment_segment_intersect_2d(
            &a.curve.start_point(),
            &a.curve.end_point(),
            &b.curve.start_point(),
            &b.curve.end_point(),
        ) {
            found.push(Intersection::new(
                a.original_parameter(s),
                b.original_parameter(u),
            ));
        }
        return;
    }

    if depth >= params.max_depth {
        debug!(
            depth,
            a_t1 = a.t1,
            a_t2 = a.t2,
            b_t1 = b.t1,
            b_t2 = b.t2,
            "subdivision depth limit reached, dropping branch"
        );
        return;
    }

    let (a_left, a_right) = a.split_at(0.5);
    let (b_left, b_right) = b.split_at(0.5);
    for a_half in [&a_left, &a_right] {
        for b_half in [&b_left, &b_right] {
            search(a_half, b_half, depth + 1, params, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CubicBezierCurve, LineSegment};
    use crate::math::Point2;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn flat_inputs_resolve_without_subdividing() {
        let a = LineSegment::new(p(0.0, 0.0), p(2.0, 2.0));
        let b = LineSegment::new(p(0.0, 2.0), p(2.0, 0.0));
        let params = IntersectionParams {
            max_depth: 0,
            ..IntersectionParams::default()
        };
        let found = intersect(&a, &b, &params);
        assert_eq!(found, vec![Intersection::new(0.5, 0.5)]);
    }

    #[test]
    fn maps_back_to_original_parameters() {
        // x = 3t on both curves, so each crossing has t1 == t2.
        let a = CubicBezierCurve::new(p(0.0, 0.0), p(1.0, 3.0), p(2.0, -2.0), p(3.0, 1.0));
        let b = CubicBezierCurve::new(p(0.0, 1.0), p(1.0, -2.0), p(2.0, 3.0), p(3.0, 0.0));
        let found = intersect(&a, &b, &IntersectionParams::default());
        assert!(!found.is_empty());
        for hit in &found {
            assert_abs_diff_eq!(hit.t1, hit.t2, epsilon = 1e-6);
        }
        assert!(found.iter().any(|hit| (hit.t1 - 0.5).abs() < 1e-6));
    }
}
