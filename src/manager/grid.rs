//! Spatial grid indexing helpers for the tile manager.
//!
//! The grid is a performance aid only: cell size is derived from an `f64`
//! approximation of tile scale, never from exact arithmetic, and nothing
//! here is consulted when deciding whether two tiles actually overlap or
//! share a matching edge. Those decisions always go through
//! [`crate::numfield::K::sgn`].

use crate::geometry::Rectangle;

/// Newton's method approximation of `1/sqrt(x)` for `x > 0`, used only to
/// pick a grid cell size proportional to a tile's footprint. A handful of
/// iterations from a cheap initial guess is ample precision for bucketing.
pub fn approx_inv_sqrt(x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    let mut y = x.recip();
    for _ in 0..8 {
        y = y * (1.5 - 0.5 * x * y * y);
    }
    y
}

/// The grid cell coordinates covered by `bbox` at the given `scale_factor`
/// (cells per unit length).
pub fn grid_bounds(bbox: &Rectangle, scale_factor: f64) -> ((i32, i32), (i32, i32)) {
    let min_ix = (bbox.min_x().to_f64_approx() * scale_factor).floor() as i32;
    let max_ix = (bbox.max_x().to_f64_approx() * scale_factor).floor() as i32;
    let min_iy = (bbox.min_y().to_f64_approx() * scale_factor).floor() as i32;
    let max_iy = (bbox.max_y().to_f64_approx() * scale_factor).floor() as i32;
    ((min_ix, min_iy), (max_ix, max_iy))
}

/// Every grid cell covered by `bbox` at the given `scale_factor`.
pub fn cells_for(bbox: &Rectangle, scale_factor: f64) -> Vec<(i32, i32)> {
    let ((min_ix, min_iy), (max_ix, max_iy)) = grid_bounds(bbox, scale_factor);
    let mut cells = Vec::new();
    for ix in min_ix..=max_ix {
        for iy in min_iy..=max_iy {
            cells.push((ix, iy));
        }
    }
    cells
}
