use crate::math::{Point2, Vector2};

/// An axis-aligned bounding box in the plane.
///
/// `min` is component-wise less than or equal to `max`, except for the
/// [`BoundingBox::empty`] value which has `min = +inf` and `max = -inf` so
/// that any union with it yields the other operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Lower-left corner.
    pub min: Point2,
    /// Upper-right corner.
    pub max: Point2,
}

impl BoundingBox {
    /// Creates a box from two corners.
    #[must_use]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// The box that contains nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing all `points`, or [`BoundingBox::empty`] for no points.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        points
            .iter()
            .fold(Self::empty(), |bbox, p| bbox.union_point(p))
    }

    /// Returns `true` for the empty box (or any box with inverted corners).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Component-wise union of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Grows the box to contain `point`.
    #[must_use]
    pub fn union_point(&self, point: &Point2) -> Self {
        Self {
            min: self.min.inf(point),
            max: self.max.sup(point),
        }
    }

    /// Returns `true` if the two boxes share at least one point.
    ///
    /// Touching boundaries count as overlapping.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..2).all(|axis| self.min[axis] <= other.max[axis] && other.min[axis] <= self.max[axis])
    }

    /// Returns `true` if `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        (0..2).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }

    /// Extent of the box along each axis; zero for the empty box.
    #[must_use]
    pub fn size(&self) -> Vector2 {
        if self.is_empty() {
            Vector2::zeros()
        } else {
            self.max - self.min
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
