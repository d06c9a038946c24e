//! Exact-arithmetic core for Penrose P2/P3 tilings.
//!
//! This crate builds Penrose tilings (and the Robinson-triangle
//! decomposition that drives their substitution rule) entirely in exact
//! arithmetic: every vertex coordinate lives in `K = Q(alpha)`, the degree-4
//! algebraic number field generated by `alpha = sqrt(2*(5+sqrt(5)))`, so
//! every geometric decision (is this polygon convex? do these two tiles
//! overlap? does this point lie inside that polygon?) is decided by an
//! exact sign computation rather than by floating point.
//!
//! - [`rational`] — exact rational interval arithmetic, used to bound
//!   `alpha`'s location closely enough to decide any sign in `K`.
//! - [`numfield`] — `K` itself: its arithmetic, comparisons, and the
//!   well-known constants (`phi`, `sqrt(5)`, `alpha`) used throughout.
//! - [`geometry`] — points, vectors, affine transforms, polygons, and the
//!   point-in-polygon / convex-polygon-intersection predicates.
//! - [`tiles`] — the prototile catalogue (P2 kite/dart, P3 rhombs, and
//!   their Robinson-triangle halves), placed tiles, matching rules, and
//!   substitution (deflation) rules.
//! - [`manager`] — [`manager::TileManager`], the mutable, spatially-indexed
//!   collection of placed tiles that enforces non-overlap and matching
//!   rules as tiles are added.

pub mod error;
pub mod geometry;
pub mod manager;
pub mod numfield;
pub mod rational;
pub mod tiles;

#[cfg(test)]
mod tests;

use geometry::AffineTransform;
use manager::TileManager;
use numfield::phi;
use tiles::{ProtoId, Tile};

/// Builds the classic "sun" configuration: five kites sharing their acute
/// vertex at the origin, related to each other by rotations of
/// `18 * {-1, 3, 7, 11, 15}` degrees, scaled up by `phi^7` so that several
/// generations of deflation stay comfortably exact before shrinking back
/// toward unit size.
#[must_use]
pub fn sun_configuration() -> TileManager {
    let mut scale = numfield::one();
    for _ in 0..7 {
        scale = scale.mul(&phi());
    }
    let mut manager = TileManager::new();
    for steps in [-1, 3, 7, 11, 15] {
        let placement = AffineTransform::rotation(steps).then(&AffineTransform::uniform_scaling(scale.clone()));
        if let Ok(tile) = Tile::new(ProtoId::Kite, placement) {
            manager.try_add_tile(tile);
        }
    }
    manager
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_configuration_has_five_kites() {
        let mgr = sun_configuration();
        assert_eq!(mgr.get_tiles().count(), 5);
    }
}
