//! Simple polygons and the convexity check used throughout the tile model.

use crate::error::{KernelError, Result};
use crate::numfield::Sign;

use super::point::Point;
use super::rectangle::Rectangle;
use super::segment::LineSegment;

/// A simple polygon, stored as an ordered list of vertices (no implied
/// closing duplicate of the first vertex).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Builds a polygon from at least three vertices.
    ///
    /// # Errors
    /// Returns [`KernelError::DomainValue`] if fewer than three vertices are
    /// supplied.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(KernelError::DomainValue {
                constraint: "polygon has at least 3 vertices",
                detail: format!("got {}", vertices.len()),
            });
        }
        Ok(Self { vertices })
    }

    /// The polygon's vertices, in order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The polygon's edges, each directed from one vertex to the next, with
    /// the last edge wrapping back to the first vertex.
    ///
    /// # Panics
    /// Panics if two consecutive vertices coincide. Every prototile and
    /// tile transform in this crate keeps consecutive vertices distinct, so
    /// this should never happen for a `Polygon` built from this crate's own
    /// data.
    pub fn edges(&self) -> Vec<LineSegment> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                LineSegment::new(self.vertices[i].clone(), self.vertices[(i + 1) % n].clone())
                    .expect("polygon has two coincident consecutive vertices")
            })
            .collect()
    }

    /// True if the polygon is convex: consecutive edges always turn the same
    /// way (collinear edges, with a zero turn, are allowed).
    pub fn is_convex(&self) -> bool {
        let edges = self.edges();
        let n = edges.len();
        let mut seen_positive = false;
        let mut seen_negative = false;
        for i in 0..n {
            let a = edges[i].direction();
            let b = edges[(i + 1) % n].direction();
            match a.cross(&b).sgn() {
                Sign::Positive => seen_positive = true,
                Sign::Negative => seen_negative = true,
                Sign::Zero => {}
            }
            if seen_positive && seen_negative {
                return false;
            }
        }
        true
    }

    /// The axis-aligned bounding box of this polygon's vertices.
    pub fn bbox(&self) -> Rectangle {
        Rectangle::bounding(&self.vertices)
            .expect("Polygon::new guarantees at least 3 vertices")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numfield::K;

    fn p(x: i64, y: i64) -> Point {
        Point::new(K::new_i64(x, 0, 0, 0), K::new_i64(y, 0, 0, 0))
    }

    #[test]
    fn unit_square_is_convex() {
        let square = Polygon::new(vec![p(0, 0), p(1, 0), p(1, 1), p(0, 1)]).expect("valid polygon");
        assert!(square.is_convex());
    }

    #[test]
    fn notched_polygon_is_not_convex() {
        let notched =
            Polygon::new(vec![p(0, 0), p(2, 0), p(2, 2), p(1, 1), p(0, 2)]).expect("valid polygon");
        assert!(!notched.is_convex());
    }

    #[test]
    fn fewer_than_three_vertices_rejected() {
        assert!(Polygon::new(vec![p(0, 0), p(1, 0)]).is_err());
    }
}
