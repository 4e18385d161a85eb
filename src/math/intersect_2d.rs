use super::{cross, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
///
/// The parallel test is relative to the direction lengths, so very short
/// (but well-conditioned) directions still intersect.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let det = cross(d1, d2);
    let scale = d1.norm() * d2.norm();
    if !(det.abs() > TOLERANCE * scale) {
        return None;
    }
    let offset = p2 - p1;
    let t = cross(&offset, d2) / det;
    let u = cross(&offset, d1) / det;
    if t.is_finite() && u.is_finite() {
        Some((t, u))
    } else {
        None
    }
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(t, u)` where `t` is the parameter on `a0 -> a1` and `u` the
/// parameter on `b0 -> b1`, both clamped to `[0, 1]`. Parallel, collinear and
/// degenerate segments never intersect.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(f64, f64)> {
    let (t, u) = line_line_intersect_2d(a0, &(a1 - a0), b0, &(b1 - b0))?;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        Some((t.clamp(0.0, 1.0), u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn crossing_segments() {
        let (t, u) = segment_segment_intersect_2d(
            &Point2::new(1.0, 2.0),
            &Point2::new(7.0, 8.0),
            &Point2::new(1.0, 4.0),
            &Point2::new(5.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 1.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn crossing_segments_reversed_direction() {
        let (t, u) = segment_segment_intersect_2d(
            &Point2::new(3.0, 4.0),
            &Point2::new(1.0, 2.0),
            &Point2::new(1.0, 4.0),
            &Point2::new(5.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn touching_at_endpoints() {
        let (t, u) = segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(2.0, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 1.0);
        assert_abs_diff_eq!(u, 0.0);
    }

    #[test]
    fn missing_segments() {
        assert!(segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, -1.0),
            &Point2::new(2.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn parallel_and_collinear_segments() {
        assert!(segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 1.0),
        )
        .is_none());
        assert!(segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(3.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn nearly_parallel_segments() {
        assert!(segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1e-15),
            &Point2::new(1.0, 2e-15),
        )
        .is_none());
    }

    #[test]
    fn degenerate_segment() {
        let p = Point2::new(0.5, 0.0);
        assert!(segment_segment_intersect_2d(
            &p,
            &p,
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn tiny_segments_still_intersect() {
        let (t, u) = segment_segment_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(1e-8, 1e-8),
            &Point2::new(0.0, 1e-8),
            &Point2::new(1e-8, 0.0),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(u, 0.5, epsilon = 1e-9);
    }
}
