pub mod fit;
pub mod interpolate;
pub mod intersect_2d;
pub mod quadrature;
pub mod roots;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 2D affine transformation.
pub type Affine2 = nalgebra::Affine2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Band around zero inside which a polynomial discriminant or leading
/// coefficient is treated as exactly zero.
pub const ROOT_EPSILON: f64 = 1e-12;

/// 2D cross product (z-component of the 3D cross product).
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
