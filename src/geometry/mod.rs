//! Exact 2D computational geometry over the algebraic number field `K`.

mod point;
mod polygon;
mod predicates;
mod rectangle;
mod segment;
mod transform;
mod trig;
mod vector;

pub use point::Point;
pub use polygon::Polygon;
pub use predicates::{do_convex_polygons_intersect, point_in_polygon};
pub use rectangle::{bboxes_overlap, Rectangle};
pub use segment::LineSegment;
pub use transform::AffineTransform;
pub use trig::cos_sin_multiple;
pub use vector::Vector;
