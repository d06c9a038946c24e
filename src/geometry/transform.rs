//! Exact affine transforms of the plane.

use crate::numfield::{Sign, K};

use super::point::Point;
use super::trig::cos_sin_multiple;
use super::vector::Vector;

/// An affine map `(x, y) -> (a*x + b*y + e, c*x + d*y + f)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AffineTransform {
    a: K,
    b: K,
    c: K,
    d: K,
    e: K,
    f: K,
}

impl AffineTransform {
    /// Builds a transform from its six coefficients.
    pub fn new(a: K, b: K, c: K, d: K, e: K, f: K) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(
            K::new_i64(1, 0, 0, 0),
            K::new_i64(0, 0, 0, 0),
            K::new_i64(0, 0, 0, 0),
            K::new_i64(1, 0, 0, 0),
            K::new_i64(0, 0, 0, 0),
            K::new_i64(0, 0, 0, 0),
        )
    }

    /// Rotation by `n * 18` degrees about the origin.
    pub fn rotation(n: i32) -> Self {
        let (c, s) = cos_sin_multiple(n);
        Self::new(c.clone(), s.neg(), s, c, K::new_i64(0, 0, 0, 0), K::new_i64(0, 0, 0, 0))
    }

    /// Anisotropic scaling about the origin.
    pub fn scaling(sx: K, sy: K) -> Self {
        Self::new(
            sx,
            K::new_i64(0, 0, 0, 0),
            K::new_i64(0, 0, 0, 0),
            sy,
            K::new_i64(0, 0, 0, 0),
            K::new_i64(0, 0, 0, 0),
        )
    }

    /// Uniform scaling about the origin.
    pub fn uniform_scaling(s: K) -> Self {
        Self::scaling(s.clone(), s)
    }

    /// Pure translation.
    pub fn translation(dx: K, dy: K) -> Self {
        Self::new(
            K::new_i64(1, 0, 0, 0),
            K::new_i64(0, 0, 0, 0),
            K::new_i64(0, 0, 0, 0),
            K::new_i64(1, 0, 0, 0),
            dx,
            dy,
        )
    }

    /// Applies this transform to a point.
    pub fn transform(&self, p: &Point) -> Point {
        Point::new(
            self.a.mul(&p.x).add(&self.b.mul(&p.y)).add(&self.e),
            self.c.mul(&p.x).add(&self.d.mul(&p.y)).add(&self.f),
        )
    }

    /// Applies the linear part of this transform to a vector (no translation).
    pub fn transform_vector(&self, v: &Vector) -> Vector {
        Vector::new(
            self.a.mul(&v.dx).add(&self.b.mul(&v.dy)),
            self.c.mul(&v.dx).add(&self.d.mul(&v.dy)),
        )
    }

    /// Composes `self` then `next`: applying the result to a point is the
    /// same as applying `self` and then applying `next` to the outcome.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self::new(
            next.a.mul(&self.a).add(&next.b.mul(&self.c)),
            next.a.mul(&self.b).add(&next.b.mul(&self.d)),
            next.c.mul(&self.a).add(&next.d.mul(&self.c)),
            next.c.mul(&self.b).add(&next.d.mul(&self.d)),
            next.a.mul(&self.e).add(&next.b.mul(&self.f)).add(&next.e),
            next.c.mul(&self.e).add(&next.d.mul(&self.f)).add(&next.f),
        )
    }

    /// The determinant of the linear part, `a*d - b*c`.
    pub fn det(&self) -> K {
        self.a.mul(&self.d).sub(&self.b.mul(&self.c))
    }

    /// True if this transform preserves orientation (positive determinant).
    pub fn is_orientation_preserving(&self) -> bool {
        self.det().sgn() == Sign::Positive
    }

    /// True if this transform is a similarity (rotation/reflection plus
    /// uniform scale, no shear): `a == d && b == -c` (orientation preserving)
    /// or `a == -d && b == c` (orientation reversing).
    pub fn is_conformal(&self) -> bool {
        (self.a == self.d && self.b == self.c.neg()) || (self.a == self.d.neg() && self.b == self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_by_twenty_steps_is_identity() {
        let r = AffineTransform::rotation(20);
        let p = Point::new(K::new_i64(2, 1, 0, 0), K::new_i64(0, 0, 1, 0));
        assert_eq!(r.transform(&p), p);
    }

    #[test]
    fn rotations_are_orientation_preserving_and_conformal() {
        let r = AffineTransform::rotation(7);
        assert!(r.is_orientation_preserving());
        assert!(r.is_conformal());
    }

    #[test]
    fn composition_matches_sequential_application() {
        let r = AffineTransform::rotation(3);
        let t = AffineTransform::translation(K::new_i64(1, 0, 0, 0), K::new_i64(2, 0, 0, 0));
        let combined = r.then(&t);
        let p = Point::new(K::new_i64(1, 0, 0, 0), K::new_i64(0, 0, 0, 0));
        assert_eq!(combined.transform(&p), t.transform(&r.transform(&p)));
    }
}
