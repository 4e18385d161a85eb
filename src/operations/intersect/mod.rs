mod curve_curve;
mod line_curve;
mod self_intersect;

pub use self_intersect::SelfIntersect;

use crate::geometry::BezierCurve;
use crate::math::intersect_2d::segment_segment_intersect_2d;

/// A point where two curves meet: `t1` on the first curve, `t2` on the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Parameter on the first curve.
    pub t1: f64,
    /// Parameter on the second curve.
    pub t2: f64,
}

impl Intersection {
    /// Creates an intersection from its two curve parameters.
    #[must_use]
    pub fn new(t1: f64, t2: f64) -> Self {
        Self { t1, t2 }
    }

    /// The same intersection seen from the other curve.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self::new(self.t2, self.t1)
    }
}

/// Parameters controlling the intersection search.
#[derive(Debug, Clone, Copy)]
pub struct IntersectionParams {
    /// Parameter distance below which two intersections are the same one.
    pub tolerance: f64,
    /// Squared flatness below which a sub-curve is replaced by its chord.
    pub flatness_threshold: f64,
    /// Maximum number of subdivision levels in the curve/curve search.
    pub max_depth: usize,
}

impl Default for IntersectionParams {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            flatness_threshold: 1e-14,
            max_depth: 40,
        }
    }
}

/// Finds the intersections between two curves of any order.
///
/// Results are sorted by `t1`, then `t2`, with `t1` on the first curve.
pub struct CurveIntersect<'a, A, B> {
    first: &'a A,
    second: &'a B,
    params: IntersectionParams,
}

impl<'a, A: BezierCurve, B: BezierCurve> CurveIntersect<'a, A, B> {
    /// Creates a new `CurveIntersect` query with default parameters.
    #[must_use]
    pub fn new(first: &'a A, second: &'a B) -> Self {
        Self {
            first,
            second,
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
    ///
    /// Lines against lines are solved directly, lines against curves in
    /// closed form, and curves against curves by recursive subdivision.
    #[must_use]
    pub fn execute(&self) -> Vec<Intersection> {
        let (a, b) = (self.first, self.second);
        let found = match (a.order(), b.order()) {
            (1, 1) => segment_segment_intersect_2d(
                &a.start_point(),
                &a.end_point(),
                &b.start_point(),
                &b.end_point(),
            )
            .map(|(t1, t2)| Intersection::new(t1, t2))
            .into_iter()
            .collect(),
            (1, _) => line_curve::intersect(&a.start_point(), &a.end_point(), b),
            (_, 1) => line_curve::intersect(&b.start_point(), &b.end_point(), a)
                .into_iter()
                .map(Intersection::swapped)
                .collect(),
            _ => curve_curve::intersect(a, b, &self.params),
        };
        sort_and_merge(found, self.params.tolerance)
    }
}

/// Sorts by `(t1, t2)` and drops entries within `tolerance` of a kept one in both parameters.
pub(crate) fn sort_and_merge(mut found: Vec<Intersection>, tolerance: f64) -> Vec<Intersection> {
    found.sort_by(|a, b| a.t1.total_cmp(&b.t1).then(a.t2.total_cmp(&b.t2)));
    let mut merged: Vec<Intersection> = Vec::with_capacity(found.len());
    for candidate in found {
        // `merged` is sorted by `t1`, so only its tail can lie within `tolerance`.
        let duplicate = merged
            .iter()
            .rev()
            .take_while(|kept| candidate.t1 - kept.t1 <= tolerance)
            .any(|kept| (kept.t2 - candidate.t2).abs() <= tolerance);
        if !duplicate {
            merged.push(candidate);
        }
    }
    merged
}
