//! Directed line segments.

use crate::error::{KernelError, Result};
use crate::numfield::{Sign, K};

use super::point::Point;
use super::rectangle::Rectangle;
use super::vector::Vector;

/// A directed segment from `begin` to `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSegment {
    /// Start point.
    pub begin: Point,
    /// End point.
    pub end: Point,
}

impl LineSegment {
    /// Builds a segment from its endpoints.
    ///
    /// # Errors
    /// Returns [`KernelError::DomainValue`] if `begin == end`: a degenerate
    /// segment has no direction, which every predicate below depends on.
    pub fn new(begin: Point, end: Point) -> Result<Self> {
        if begin == end {
            return Err(KernelError::DomainValue {
                constraint: "segment begin != end",
                detail: format!("both endpoints are {begin:?}"),
            });
        }
        Ok(Self { begin, end })
    }

    /// The displacement from `begin` to `end`.
    pub fn direction(&self) -> Vector {
        self.end.minus(&self.begin)
    }

    /// The axis-aligned bounding box of this segment.
    pub fn bbox(&self) -> Rectangle {
        Rectangle::from_corners(&self.begin, &self.end)
    }

    /// True if `self` and `other` lie on the same infinite line (not merely
    /// parallel): their directions are collinear, and `other.begin` lies on
    /// `self`'s line.
    pub fn is_along_same_line(&self, other: &Self) -> bool {
        let d1 = self.direction();
        let d2 = other.direction();
        if d1.cross(&d2).sgn() != Sign::Zero {
            return false;
        }
        self.begin.minus(&other.begin).cross(&d2).sgn() == Sign::Zero
    }

    /// True if `p` lies on this segment (on its line, and between its
    /// endpoints inclusive).
    pub fn contains_point(&self, p: &Point) -> bool {
        let d = self.direction();
        if self.begin.minus(p).cross(&d).sgn() != Sign::Zero {
            return false;
        }
        if d.dx.sgn() != Sign::Zero {
            between(&self.begin.x, p.x.clone(), &self.end.x)
        } else {
            between(&self.begin.y, p.y.clone(), &self.end.y)
        }
    }

    /// True if `self` and `other` lie along the same line and their spans
    /// overlap over a stretch of positive length (a shared endpoint alone
    /// does not count). This is the "edges may be glued" test used by the
    /// tile matching rule, which only requires a partial overlap, not exact
    /// endpoint equality.
    pub fn significantly_overlaps_with(&self, other: &Self) -> bool {
        if !self.is_along_same_line(other) {
            return false;
        }
        let d = self.direction();
        if d.dx.sgn() != Sign::Zero {
            overlap_has_positive_length(&self.begin.x, &self.end.x, &other.begin.x, &other.end.x)
        } else {
            overlap_has_positive_length(&self.begin.y, &self.end.y, &other.begin.y, &other.end.y)
        }
    }
}

fn ordered(a: &K, b: &K) -> (K, K) {
    if a.cmp(b) == std::cmp::Ordering::Greater {
        (b.clone(), a.clone())
    } else {
        (a.clone(), b.clone())
    }
}

fn between(a: &K, p: K, b: &K) -> bool {
    let (lo, hi) = ordered(a, b);
    lo.cmp(&p) != std::cmp::Ordering::Greater && p.cmp(&hi) != std::cmp::Ordering::Greater
}

fn overlap_has_positive_length(a1: &K, a2: &K, b1: &K, b2: &K) -> bool {
    let (lo_a, hi_a) = ordered(a1, a2);
    let (lo_b, hi_b) = ordered(b1, b2);
    let lo = if lo_a.cmp(&lo_b) == std::cmp::Ordering::Greater { lo_a } else { lo_b };
    let hi = if hi_a.cmp(&hi_b) == std::cmp::Ordering::Less { hi_a } else { hi_b };
    lo.cmp(&hi) == std::cmp::Ordering::Less
}
