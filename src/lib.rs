pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod spatial;

pub use error::{GeometryError, KernelError, Result};
pub use geometry::{
    BezierCurve, BoundingBox, CubicBezierCurve, Curve, Extrema, LineSegment,
    QuadraticBezierCurve, Subcurve,
};
pub use operations::intersect::{CurveIntersect, Intersection, IntersectionParams, SelfIntersect};
pub use spatial::{Bvh, BvhNode, NodeKind};
