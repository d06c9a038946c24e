//! Exact 2D points in `K x K`.

use crate::numfield::K;

use super::trig::cos_sin_multiple;
use super::vector::Vector;

/// A point in the plane, with both coordinates in `K`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    /// X coordinate.
    pub x: K,
    /// Y coordinate.
    pub y: K,
}

impl Point {
    /// Builds a point from its coordinates.
    pub fn new(x: K, y: K) -> Self {
        Self { x, y }
    }

    /// The origin, `(0, 0)`.
    pub fn origin() -> Self {
        Self::new(K::new_i64(0, 0, 0, 0), K::new_i64(0, 0, 0, 0))
    }

    /// The vector from `other` to `self`.
    pub fn minus(&self, other: &Self) -> Vector {
        Vector::new(self.x.sub(&other.x), self.y.sub(&other.y))
    }

    /// Translates this point by a vector.
    pub fn plus(&self, v: &Vector) -> Self {
        Self::new(self.x.add(&v.dx), self.y.add(&v.dy))
    }

    /// Rotates this point about the origin by `n * 18` degrees.
    #[must_use]
    pub fn rotate(&self, n: i32) -> Self {
        let (c, s) = cos_sin_multiple(n);
        Self::new(
            self.x.mul(&c).sub(&self.y.mul(&s)),
            self.x.mul(&s).add(&self.y.mul(&c)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_turn_is_identity() {
        let p = Point::new(K::new_i64(1, 2, 0, 0), K::new_i64(3, 0, 1, 0));
        assert_eq!(p.rotate(20), p);
    }
}
