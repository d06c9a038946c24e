//! A placed tile: a prototile shape plus the transform that puts it
//! somewhere in the plane, and the matching-rule check that decides whether
//! two placed tiles may share an edge.

use std::hash::{Hash, Hasher};

use crate::error::{KernelError, Result};
use crate::geometry::{
    do_convex_polygons_intersect, AffineTransform, LineSegment, Point, Polygon, Rectangle,
};

use super::prototile::{ProtoData, ProtoId, TileSet, PROTO_TABLE};

/// A prototile placed in the plane by an orientation-preserving similarity
/// transform.
///
/// Equality and hashing compare the tile's actual vertex/edge-label
/// sequence rather than its `(proto, transform)` representation: two
/// `Tile`s built from different prototiles (or different but
/// transform-equivalent placements) can still describe the same physical
/// shape in the same place, and tile-set membership requires recognizing
/// that. Vertex lists are disambiguated by rotating to start at the
/// lexicographically-smallest vertex before comparing, since the same
/// physical tile may be listed starting at any of its vertices.
#[derive(Debug, Clone)]
pub struct Tile {
    proto: ProtoId,
    transform: AffineTransform,
}

impl Tile {
    /// Places `proto` according to `transform`.
    ///
    /// # Errors
    /// Returns [`KernelError::TypeMismatch`] if `transform` is not an
    /// orientation-preserving similarity (rotation/scale, no shear or
    /// reflection): every tile in this model is placed by such a transform.
    pub fn new(proto: ProtoId, transform: AffineTransform) -> Result<Self> {
        if !transform.is_orientation_preserving() || !transform.is_conformal() {
            return Err(KernelError::TypeMismatch {
                expected: "orientation-preserving similarity transform",
                found: "a transform with shear or reflection".to_owned(),
            });
        }
        Ok(Self { proto, transform })
    }

    /// The prototile shape being placed.
    pub fn proto(&self) -> ProtoId {
        self.proto
    }

    /// The placement transform.
    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    /// The tile set this tile belongs to.
    pub fn tile_set(&self) -> TileSet {
        self.proto.tile_set()
    }

    fn data(&self) -> &'static ProtoData {
        &PROTO_TABLE[&self.proto]
    }

    /// This tile's vertices in the plane, in order.
    pub fn vertices(&self) -> Vec<Point> {
        self.data().vertices.iter().map(|p| self.transform.transform(p)).collect()
    }

    /// This tile's matching-rule edge labels, in the same order as
    /// [`Tile::vertices`]'s implied edges.
    pub fn edge_labels(&self) -> &'static [i32] {
        &self.data().edge_labels
    }

    /// A decomposition of this tile into convex polygons, useful for SAT
    /// overlap tests against other tiles.
    pub fn convex_decomposition(&self) -> Vec<Polygon> {
        let verts = self.vertices();
        self.data()
            .convex_decomposition
            .iter()
            .map(|indices| {
                let pieces = indices.iter().map(|&i| verts[i].clone()).collect();
                Polygon::new(pieces).expect("prototile decompositions are always valid convex polygons")
            })
            .collect()
    }

    /// The axis-aligned bounding box of this tile.
    pub fn bbox(&self) -> Rectangle {
        Rectangle::bounding(&self.vertices()).expect("every prototile has at least 3 vertices")
    }

    /// This tile's vertices and edge labels, rotated to start at the
    /// lexicographically-smallest vertex, so that two descriptions of the
    /// same physical tile starting at different vertices compare equal.
    fn canonical_key(&self) -> (Vec<Point>, Vec<i32>) {
        let verts = self.vertices();
        let labels = self.edge_labels();
        let n = verts.len();
        let min_idx = (0..n)
            .min_by(|&i, &j| verts[i].x.cmp(&verts[j].x).then_with(|| verts[i].y.cmp(&verts[j].y)))
            .unwrap_or(0);
        let rot_v = (0..n).map(|k| verts[(min_idx + k) % n].clone()).collect();
        let rot_l = (0..n).map(|k| labels[(min_idx + k) % n]).collect();
        (rot_v, rot_l)
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_key().hash(state);
    }
}

/// True if edge `ei` of `a` and edge `ej` of `b` may be glued together: their
/// matching-rule labels must be negations of each other, and the edges must
/// significantly overlap (share a boundary stretch of positive length, not
/// just a touching endpoint).
pub fn edges_match(a: &Tile, ei: usize, b: &Tile, ej: usize) -> bool {
    let la = a.edge_labels()[ei];
    let lb = b.edge_labels()[ej];
    if la != -lb {
        return false;
    }
    let va = a.vertices();
    let vb = b.vertices();
    let edge_a = LineSegment::new(va[ei].clone(), va[(ei + 1) % va.len()].clone());
    let edge_b = LineSegment::new(vb[ej].clone(), vb[(ej + 1) % vb.len()].clone());
    match (edge_a, edge_b) {
        (Ok(ea), Ok(eb)) => ea.significantly_overlaps_with(&eb),
        _ => false,
    }
}

/// True if `a` and `b` may coexist in the same tiling: neither tile's
/// interior significantly overlaps the other's, and every pair of edges
/// that significantly overlap satisfies the matching rule.
///
/// Implements the four-step check a tile manager needs before accepting a
/// new tile: (1) decompose both tiles into convex pieces, (2) reject any
/// pair of pieces with a positive-area intersection, (3) for every pair of
/// edges, test whether they significantly overlap, and (4) if they do,
/// require the matching rule to hold on that shared stretch.
pub fn matches(a: &Tile, b: &Tile) -> bool {
    for piece_a in a.convex_decomposition() {
        for piece_b in b.convex_decomposition() {
            if let Ok((_, areal, _)) = do_convex_polygons_intersect(&piece_a, &piece_b) {
                if areal {
                    return false;
                }
            }
        }
    }

    let va = a.vertices();
    let vb = b.vertices();
    for ei in 0..va.len() {
        for ej in 0..vb.len() {
            let edge_a = LineSegment::new(va[ei].clone(), va[(ei + 1) % va.len()].clone());
            let edge_b = LineSegment::new(vb[ej].clone(), vb[(ej + 1) % vb.len()].clone());
            if let (Ok(ea), Ok(eb)) = (edge_a, edge_b) {
                if ea.significantly_overlaps_with(&eb) && !edges_match(a, ei, b, ej) {
                    return false;
                }
            }
        }
    }
    true
}
