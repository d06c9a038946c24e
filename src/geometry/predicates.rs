//! Exact geometric predicates: point-in-polygon and convex polygon
//! intersection, both decided purely through [`K::sgn`] comparisons.

use crate::error::{KernelError, Result};
use crate::numfield::Sign;

use super::point::Point;
use super::polygon::Polygon;
use super::rectangle::bboxes_overlap;
use super::vector::Vector;

/// True if `pt` lies inside (or on the boundary of) `poly`.
///
/// Uses the standard crossing-number test: a horizontal ray from `pt` to
/// `+x` infinity crosses the boundary an odd number of times iff `pt` is
/// inside. Each edge is tested with a half-open `y`-interval
/// (`a.y > pt.y` XOR `b.y > pt.y`) so that a ray passing exactly through a
/// shared vertex of two edges is counted once, not twice or zero times.
/// The crossing itself is detected via a cross product rather than a
/// division, since `K` division is not needed anywhere else in this crate
/// and avoiding it keeps every comparison exact-integer-like.
pub fn point_in_polygon(pt: &Point, poly: &Polygon) -> bool {
    let mut inside = false;
    for edge in poly.edges() {
        let (a, b) = (&edge.begin, &edge.end);
        let straddles = (a.y.cmp(&pt.y) == std::cmp::Ordering::Greater)
            != (b.y.cmp(&pt.y) == std::cmp::Ordering::Greater);
        if !straddles {
            continue;
        }
        // x_intersect - pt.x has the same sign as cross / dy, i.e. the same
        // sign as cross * dy (since dy != 0 here: the edge straddles pt.y).
        let cross = b.minus(a).cross(&pt.minus(a));
        let dy = b.y.sub(&a.y);
        let product_sign = cross.mul(&dy).sgn();
        if product_sign == Sign::Positive {
            inside = !inside;
        }
    }
    inside
}

/// Projects every vertex of `poly` onto `axis` (via dot product) and returns
/// `(min, max)`.
fn project(poly: &Polygon, axis: &Vector) -> (crate::numfield::K, crate::numfield::K) {
    let mut iter = poly.vertices().iter().map(|p| {
        let v = Vector::new(p.x.clone(), p.y.clone());
        v.dot(axis)
    });
    let first = iter.next().expect("Polygon::new guarantees at least 3 vertices");
    iter.fold((first.clone(), first), |(lo, hi), v| {
        let new_lo = if v.cmp(&lo) == std::cmp::Ordering::Less { v.clone() } else { lo };
        let new_hi = if v.cmp(&hi) == std::cmp::Ordering::Greater { v } else { hi };
        (new_lo, new_hi)
    })
}

/// The separating axes to test: the outward normal of every edge of both
/// polygons (sufficient for convex polygons per the separating axis
/// theorem).
fn candidate_axes(a: &Polygon, b: &Polygon) -> Vec<Vector> {
    a.edges()
        .iter()
        .chain(b.edges().iter())
        .map(|e| e.direction().rot90())
        .collect()
}

/// Tests whether two convex polygons intersect, and classifies the contact.
///
/// Returns `(any, areal, edge_pair)`: `any` is true if the polygons touch or
/// overlap at all; `areal` is true if they overlap over a region of
/// positive area; `edge_pair` names, as `(edge index of a, edge index of
/// b)`, a pair of edges that significantly overlap, when the contact is a
/// shared boundary segment rather than a single point or an areal overlap.
///
/// Implements the Separating Axis Theorem: the polygons are disjoint iff
/// some edge-normal axis separates their projections. If no axis separates
/// them, the polygons touch or overlap; the contact is areal iff no
/// candidate axis has a zero-width projection overlap (i.e. none is a
/// supporting line of both polygons).
///
/// # Errors
/// Returns [`KernelError::DomainValue`] if either polygon is not convex:
/// the separating axis theorem this predicate implements only holds for
/// convex shapes.
pub fn do_convex_polygons_intersect(a: &Polygon, b: &Polygon) -> Result<(bool, bool, Option<(usize, usize)>)> {
    if !a.is_convex() || !b.is_convex() {
        return Err(KernelError::DomainValue {
            constraint: "both polygons convex",
            detail: "do_convex_polygons_intersect requires convex input".to_owned(),
        });
    }

    if !bboxes_overlap(&a.bbox(), &b.bbox()) {
        return Ok((false, false, None));
    }

    let mut touching_axis_count = 0usize;

    for axis in candidate_axes(a, b) {
        let (min_a, max_a) = project(a, &axis);
        let (min_b, max_b) = project(b, &axis);
        let lo = if min_a.cmp(&min_b) == std::cmp::Ordering::Greater { min_a } else { min_b };
        let hi = if max_a.cmp(&max_b) == std::cmp::Ordering::Less { max_a } else { max_b };
        match lo.cmp(&hi) {
            std::cmp::Ordering::Greater => return Ok((false, false, None)),
            std::cmp::Ordering::Equal => touching_axis_count += 1,
            std::cmp::Ordering::Less => {}
        }
    }

    if touching_axis_count == 0 {
        return Ok((true, true, None));
    }

    for (i, ea) in a.edges().iter().enumerate() {
        for (j, eb) in b.edges().iter().enumerate() {
            if ea.significantly_overlaps_with(eb) {
                return Ok((true, false, Some((i, j))));
            }
        }
    }
    Ok((true, false, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numfield::K;

    fn p(x: i64, y: i64) -> Point {
        Point::new(K::new_i64(x, 0, 0, 0), K::new_i64(y, 0, 0, 0))
    }

    fn square(x0: i64, y0: i64, side: i64) -> Polygon {
        Polygon::new(vec![
            p(x0, y0),
            p(x0 + side, y0),
            p(x0 + side, y0 + side),
            p(x0, y0 + side),
        ])
        .expect("valid polygon")
    }

    #[test]
    fn point_strictly_inside_square() {
        let sq = square(0, 0, 4);
        assert!(point_in_polygon(&p(2, 2), &sq));
    }

    #[test]
    fn point_strictly_outside_square() {
        let sq = square(0, 0, 4);
        assert!(!point_in_polygon(&p(10, 10), &sq));
    }

    #[test]
    fn disjoint_squares() {
        let a = square(0, 0, 1);
        let b = square(5, 5, 1);
        assert_eq!(do_convex_polygons_intersect(&a, &b).expect("convex"), (false, false, None));
    }

    #[test]
    fn edge_touching_squares() {
        let a = square(0, 0, 1);
        let b = square(1, 0, 1);
        let (any, areal, edge_pair) = do_convex_polygons_intersect(&a, &b).expect("convex");
        assert!(any);
        assert!(!areal);
        assert!(edge_pair.is_some());
    }

    #[test]
    fn corner_touching_squares() {
        let a = square(0, 0, 1);
        let b = square(1, 1, 1);
        assert_eq!(do_convex_polygons_intersect(&a, &b).expect("convex"), (true, false, None));
    }

    #[test]
    fn overlapping_squares() {
        let a = square(0, 0, 2);
        let b = square(1, 1, 2);
        assert_eq!(do_convex_polygons_intersect(&a, &b).expect("convex"), (true, true, None));
    }

    #[test]
    fn non_convex_input_is_rejected() {
        let notched =
            Polygon::new(vec![p(0, 0), p(2, 0), p(2, 2), p(1, 1), p(0, 2)]).expect("valid polygon");
        let sq = square(5, 5, 1);
        assert!(do_convex_polygons_intersect(&notched, &sq).is_err());
    }
}
