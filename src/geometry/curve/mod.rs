mod cubic;
mod line;
mod quadratic;
mod subcurve;

pub use cubic::CubicBezierCurve;
pub use line::LineSegment;
pub use quadratic::QuadraticBezierCurve;
pub use subcurve::Subcurve;

use std::f64::consts::FRAC_PI_3;

use crate::error::{GeometryError, Result};
use crate::geometry::BoundingBox;
use crate::math::interpolate::{clamp, lerp_point, map};
use crate::math::quadrature::integrate_unit;
use crate::math::roots::droots;
use crate::math::{Affine2, Point2, Vector2};
use crate::operations::intersect::{CurveIntersect, Intersection, SelfIntersect};

/// Smallest parameter step taken by [`BezierCurve::reduce`].
const REDUCE_STEP: f64 = 0.01;

/// Critical parameters of a curve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extrema {
    /// Interior roots of the derivative along x (`per_axis[0]`) and y (`per_axis[1]`),
    /// sorted and deduplicated.
    pub per_axis: [Vec<f64>; 2],
    /// All per-axis roots merged with `0` and `1`, sorted and deduplicated.
    pub values: Vec<f64>,
}

/// A planar Bezier curve of order 1, 2 or 3.
///
/// Implementors only provide access to their control points plus the
/// order-specific pieces (`split_at`, `flatness_squared`); everything else is
/// derived from the control points.
pub trait BezierCurve: Clone + std::fmt::Debug {
    /// Control points, first to last.
    fn points(&self) -> &[Point2];

    /// Mutable control points. The number of points is fixed.
    fn points_mut(&mut self) -> &mut [Point2];

    /// Splits the curve at `t` into the part before and the part after.
    fn split_at(&self, t: f64) -> (Self, Self);

    /// Squared flatness: zero for a straight line, growing as the interior
    /// control points move away from the chord.
    fn flatness_squared(&self) -> f64;

    /// Order of the curve: 1 (line), 2 (quadratic) or 3 (cubic).
    fn order(&self) -> usize {
        self.points().len() - 1
    }

    /// First control point; the curve starts here.
    fn start_point(&self) -> Point2 {
        self.points()[0]
    }

    /// Last control point; the curve ends here.
    fn end_point(&self) -> Point2 {
        self.points()[self.order()]
    }

    /// Moves the first control point, leaving the others untouched.
    fn set_start_point(&mut self, point: Point2) {
        self.points_mut()[0] = point;
    }

    /// Moves the last control point, leaving the others untouched.
    fn set_end_point(&mut self, point: Point2) {
        let last = self.order();
        self.points_mut()[last] = point;
    }

    /// Evaluates the curve at `t`.
    ///
    /// `t = 0` and `t = 1` return the first and last control point exactly.
    fn compute(&self, t: f64) -> Point2 {
        let points = self.points();
        if t == 0.0 {
            return points[0];
        }
        if t == 1.0 {
            return points[points.len() - 1];
        }
        blend(points, t)
    }

    /// Evaluates the hodograph (first derivative) at `t`.
    #[allow(clippy::cast_precision_loss)]
    fn derivative(&self, t: f64) -> Vector2 {
        let points = self.points();
        let order = (points.len() - 1) as f64;
        let mut hodograph = [Point2::origin(); 3];
        for (h, w) in hodograph.iter_mut().zip(points.windows(2)) {
            *h = Point2::from((w[1] - w[0]) * order);
        }
        blend(&hodograph[..points.len() - 1], t).coords
    }

    /// Unit normal at `t`: the derivative rotated a quarter turn counter-clockwise.
    ///
    /// A vanishing derivative falls back to the chord direction, and a curve
    /// collapsed to a point has normal `(0, 1)`.
    fn normal(&self, t: f64) -> Vector2 {
        let d = self.derivative(t);
        let tangent = match d.try_normalize(0.0) {
            Some(unit) => unit,
            None => (self.end_point() - self.start_point())
                .try_normalize(0.0)
                .unwrap_or_else(|| Vector2::new(1.0, 0.0)),
        };
        Vector2::new(-tangent.y, tangent.x)
    }

    /// Every de Casteljau point of the evaluation at `t`, level by level.
    ///
    /// The first `order + 1` points are the control points and the last one is
    /// `compute(t)`.
    fn hull(&self, t: f64) -> Vec<Point2> {
        let mut level = self.points().to_vec();
        let mut hull = level.clone();
        while level.len() > 1 {
            level = level
                .windows(2)
                .map(|w| lerp_point(t, &w[0], &w[1]))
                .collect();
            hull.extend_from_slice(&level);
        }
        hull
    }

    /// The part of the curve between `t1` and `t2`, as a curve of the same order.
    fn split(&self, t1: f64, t2: f64) -> Self {
        if t1 == 0.0 && t2 == 1.0 {
            return self.clone();
        }
        let (_, right) = self.split_at(t1);
        let local = map(t2, t1, 1.0, 0.0, 1.0);
        right.split_at(local).0
    }

    /// Exact axis-aligned bounds of the curve.
    fn bounding_box(&self) -> BoundingBox {
        let extrema = self.extrema();
        extrema.per_axis.iter().flatten().fold(
            BoundingBox::from_points(&[self.start_point(), self.end_point()]),
            |bbox, t| bbox.union_point(&self.compute(*t)),
        )
    }

    /// Flatness of the curve, see [`BezierCurve::flatness_squared`].
    fn flatness(&self) -> f64 {
        self.flatness_squared().sqrt()
    }

    /// Returns `true` if the curve does not turn back on itself: the end
    /// normals differ by less than 60 degrees.
    fn is_simple(&self) -> bool {
        end_normals_agree(self)
    }

    /// Arc length, by 24-point Gauss-Legendre quadrature of the speed.
    fn length(&self) -> f64 {
        integrate_unit(|t| self.derivative(t).norm())
    }

    /// Interior parameters where the derivative vanishes along an axis.
    #[allow(clippy::cast_precision_loss)]
    fn extrema(&self) -> Extrema {
        let points = self.points();
        let order = (points.len() - 1) as f64;
        let per_axis = [0, 1].map(|axis| {
            let coeffs: Vec<f64> = points
                .windows(2)
                .map(|w| order * (w[1][axis] - w[0][axis]))
                .collect();
            let mut roots: Vec<f64> = droots(&coeffs)
                .into_iter()
                .filter(|t| *t > 0.0 && *t < 1.0)
                .collect();
            roots.sort_by(f64::total_cmp);
            roots.dedup();
            roots
        });

        let mut values: Vec<f64> = per_axis
            .iter()
            .flatten()
            .copied()
            .chain([0.0, 1.0])
            .collect();
        values.sort_by(f64::total_cmp);
        values.dedup();

        Extrema { per_axis, values }
    }

    /// Decomposes the curve into simple pieces.
    ///
    /// The curve is first cut at its extrema, then each piece is cut again
    /// wherever it stops being simple. Pieces carry their interval on the
    /// original curve and together cover `[0, 1]` in order.
    ///
    /// Cuts are searched with a resolution of `0.01` of each monotonic piece.
    /// Near a cusp a sliver no wider than that step may still fail
    /// [`is_simple`](BezierCurve::is_simple); it is kept as is.
    fn reduce(&self) -> Vec<Subcurve<Self>> {
        let values = self.extrema().values;
        let monotonic = values
            .windows(2)
            .map(|w| Subcurve::from_interval(self.split(w[0], w[1]), w[0], w[1]));

        let mut pieces = Vec::new();
        for piece in monotonic {
            let mut t1 = 0.0;
            while t1 < 1.0 {
                if 1.0 - t1 <= REDUCE_STEP || piece.curve.split(t1, 1.0).is_simple() {
                    pieces.push(piece.split(t1, 1.0));
                    break;
                }
                let t2 = largest_simple_end(&piece.curve, t1);
                pieces.push(piece.split(t1, t2));
                t1 = t2;
            }
        }
        pieces
    }

    /// Points where the curve crosses itself, ordered by `t1`.
    fn self_intersections(&self) -> Vec<Intersection> {
        SelfIntersect::new(self).execute()
    }

    /// The curve with every control point passed through `transform`.
    #[must_use]
    fn transformed(&self, transform: &Affine2) -> Self {
        let mut curve = self.clone();
        for p in curve.points_mut() {
            *p = transform.transform_point(p);
        }
        curve
    }

    /// The same geometric curve traversed from end to start.
    #[must_use]
    fn reversed(&self) -> Self {
        let mut curve = self.clone();
        curve.points_mut().reverse();
        curve
    }

    /// `steps + 1` evenly spaced samples, from start to end.
    #[allow(clippy::cast_precision_loss)]
    fn lookup_table(&self, steps: usize) -> Vec<Point2> {
        if steps == 0 {
            return vec![self.start_point()];
        }
        (0..=steps)
            .map(|i| self.compute(i as f64 / steps as f64))
            .collect()
    }

    /// Intersections with `other`, with `t1` on `self` and `t2` on `other`.
    fn intersections<C: BezierCurve>(&self, other: &C) -> Vec<Intersection> {
        CurveIntersect::new(self, other).execute()
    }
}

/// Bernstein evaluation for up to four control points.
fn blend(points: &[Point2], t: f64) -> Point2 {
    let mt = 1.0 - t;
    let coords = match points {
        [] => Vector2::zeros(),
        [p0] => p0.coords,
        [p0, p1] => p0.coords * mt + p1.coords * t,
        [p0, p1, p2] => p0.coords * (mt * mt) + p1.coords * (2.0 * mt * t) + p2.coords * (t * t),
        [p0, p1, p2, p3] => {
            p0.coords * (mt * mt * mt)
                + p1.coords * (3.0 * mt * mt * t)
                + p2.coords * (3.0 * mt * t * t)
                + p3.coords * (t * t * t)
        }
        _ => {
            let mut level = points.to_vec();
            while level.len() > 1 {
                level = level
                    .windows(2)
                    .map(|w| lerp_point(t, &w[0], &w[1]))
                    .collect();
            }
            level[0].coords
        }
    };
    Point2::from(coords)
}

/// Returns `true` if the normals at both ends are less than 60 degrees apart.
fn end_normals_agree<C: BezierCurve>(curve: &C) -> bool {
    let angle = clamp(curve.normal(0.0).dot(&curve.normal(1.0)), -1.0, 1.0).acos();
    angle < FRAC_PI_3
}

/// Largest `t2` in `[t1 + step, 1]` (to within one step) for which
/// `curve.split(t1, t2)` is simple.
fn largest_simple_end<C: BezierCurve>(curve: &C, t1: f64) -> f64 {
    let mut lo = (t1 + REDUCE_STEP).min(1.0);
    let mut hi = 1.0;
    while hi - lo > REDUCE_STEP {
        let mid = 0.5 * (lo + hi);
        if curve.split(t1, mid).is_simple() {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// A Bezier curve of any supported order.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Line(LineSegment),
    Quadratic(QuadraticBezierCurve),
    Cubic(CubicBezierCurve),
}

impl Curve {
    /// Builds the curve whose order matches the number of control points.
    ///
    /// # Panics
    ///
    /// Panics if `points` does not hold 2, 3 or 4 points. Use
    /// `Curve::try_from` to handle that case instead.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        match Self::try_from(points) {
            Ok(curve) => curve,
            Err(err) => panic!("{err}"),
        }
    }
}

impl TryFrom<&[Point2]> for Curve {
    type Error = GeometryError;

    fn try_from(points: &[Point2]) -> std::result::Result<Self, Self::Error> {
        match *points {
            [p0, p1] => Ok(Curve::Line(LineSegment::new(p0, p1))),
            [p0, p1, p2] => Ok(Curve::Quadratic(QuadraticBezierCurve::new(p0, p1, p2))),
            [p0, p1, p2, p3] => Ok(Curve::Cubic(CubicBezierCurve::new(p0, p1, p2, p3))),
            _ => Err(GeometryError::ControlPointCount {
                found: points.len(),
            }),
        }
    }
}

impl From<LineSegment> for Curve {
    fn from(line: LineSegment) -> Self {
        Curve::Line(line)
    }
}

impl From<QuadraticBezierCurve> for Curve {
    fn from(curve: QuadraticBezierCurve) -> Self {
        Curve::Quadratic(curve)
    }
}

impl From<CubicBezierCurve> for Curve {
    fn from(curve: CubicBezierCurve) -> Self {
        Curve::Cubic(curve)
    }
}

impl BezierCurve for Curve {
    fn points(&self) -> &[Point2] {
        match self {
            Curve::Line(c) => c.points(),
            Curve::Quadratic(c) => c.points(),
            Curve::Cubic(c) => c.points(),
        }
    }

    fn points_mut(&mut self) -> &mut [Point2] {
        match self {
            Curve::Line(c) => c.points_mut(),
            Curve::Quadratic(c) => c.points_mut(),
            Curve::Cubic(c) => c.points_mut(),
        }
    }

    fn split_at(&self, t: f64) -> (Self, Self) {
        match self {
            Curve::Line(c) => {
                let (l, r) = c.split_at(t);
                (l.into(), r.into())
            }
            Curve::Quadratic(c) => {
                let (l, r) = c.split_at(t);
                (l.into(), r.into())
            }
            Curve::Cubic(c) => {
                let (l, r) = c.split_at(t);
                (l.into(), r.into())
            }
        }
    }

    fn flatness_squared(&self) -> f64 {
        match self {
            Curve::Line(c) => c.flatness_squared(),
            Curve::Quadratic(c) => c.flatness_squared(),
            Curve::Cubic(c) => c.flatness_squared(),
        }
    }

    fn is_simple(&self) -> bool {
        match self {
            Curve::Line(c) => c.is_simple(),
            Curve::Quadratic(c) => c.is_simple(),
            Curve::Cubic(c) => c.is_simple(),
        }
    }
}

/// Checks that a fit parameter lies in `[0, 1]`.
fn check_fit_parameter(t: f64) -> Result<()> {
    if (0.0..=1.0).contains(&t) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: t,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}
