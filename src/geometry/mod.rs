mod bounding_box;
pub mod curve;

pub use bounding_box::BoundingBox;
pub use curve::{
    BezierCurve, CubicBezierCurve, Curve, Extrema, LineSegment, QuadraticBezierCurve, Subcurve,
};
