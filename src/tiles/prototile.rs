//! Prototile catalogue: canonical (untransformed) vertex coordinates,
//! matching-rule edge labels, and convex decompositions for every tile
//! shape this crate knows how to place.
//!
//! Tiles are modeled as a tagged union (`ProtoId`) over a static table,
//! rather than as a `dyn Trait` object hierarchy: the set of shapes is
//! small, fixed, and known at compile time, which is exactly the situation
//! the teacher's `ExprKind` enum-of-variants (`core/expr/mod.rs`) is built
//! for.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::geometry::Point;
use crate::numfield::{inv_phi, one, K};

/// Which of the four classical tile sets a prototile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileSet {
    /// Kite and Dart (Penrose's second tiling).
    P2,
    /// Thick and thin rhombs (Penrose's third tiling).
    P3,
    /// Robinson triangles derived from splitting P2 tiles.
    RobinsonA,
    /// Robinson triangles derived from splitting P3 tiles.
    RobinsonB,
}

/// Identifies one of the fixed prototile shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtoId {
    /// P2 kite.
    Kite,
    /// P2 dart.
    Dart,
    /// P3 thick rhomb.
    ThickRhomb,
    /// P3 thin rhomb.
    ThinRhomb,
    /// Robinson-A triangle: first half of a kite.
    AK1,
    /// Robinson-A triangle: second half of a kite.
    AK2,
    /// Robinson-A triangle: first half of a dart.
    AD1,
    /// Robinson-A triangle: second half of a dart.
    AD2,
    /// Robinson-B triangle: first half of a thick rhomb.
    BL1,
    /// Robinson-B triangle: second half of a thick rhomb.
    BL2,
    /// Robinson-B triangle: first half of a thin rhomb.
    BS1,
    /// Robinson-B triangle: second half of a thin rhomb.
    BS2,
}

impl ProtoId {
    /// Every prototile, in a stable order.
    pub const ALL: [ProtoId; 12] = [
        ProtoId::Kite,
        ProtoId::Dart,
        ProtoId::ThickRhomb,
        ProtoId::ThinRhomb,
        ProtoId::AK1,
        ProtoId::AK2,
        ProtoId::AD1,
        ProtoId::AD2,
        ProtoId::BL1,
        ProtoId::BL2,
        ProtoId::BS1,
        ProtoId::BS2,
    ];

    /// The tile set this prototile belongs to.
    pub fn tile_set(self) -> TileSet {
        match self {
            ProtoId::Kite | ProtoId::Dart => TileSet::P2,
            ProtoId::ThickRhomb | ProtoId::ThinRhomb => TileSet::P3,
            ProtoId::AK1 | ProtoId::AK2 | ProtoId::AD1 | ProtoId::AD2 => TileSet::RobinsonA,
            ProtoId::BL1 | ProtoId::BL2 | ProtoId::BS1 | ProtoId::BS2 => TileSet::RobinsonB,
        }
    }
}

/// Canonical (untransformed) geometric and combinatorial data for one
/// prototile.
pub struct ProtoData {
    /// Vertices in canonical position, counterclockwise.
    pub vertices: Vec<Point>,
    /// One matching-rule label per edge (`vertices[i] -> vertices[i+1]`).
    /// Two tiles may share an edge only if the labels on the shared edge
    /// are each other's negation.
    pub edge_labels: Vec<i32>,
    /// A decomposition of the tile into convex pieces, each a list of
    /// indices into `vertices` (triangles for the Robinson sets, the whole
    /// shape itself for the already-convex rhombs; the kite and dart need a
    /// genuine split since they are non-convex quadrilaterals).
    pub convex_decomposition: Vec<Vec<usize>>,
}

fn one_x() -> Point {
    Point::new(one(), K::new_i64(0, 0, 0, 0))
}

fn kite_data() -> ProtoData {
    let origin = Point::origin();
    let p1 = one_x();
    let tip = one_x().rotate(2);
    let p3 = one_x().rotate(4);
    ProtoData {
        vertices: vec![origin, p1, tip, p3],
        edge_labels: vec![2, 1, -1, -2],
        convex_decomposition: vec![vec![0, 1, 2], vec![0, 2, 3]],
    }
}

fn dart_data() -> ProtoData {
    let origin = Point::origin();
    let p1 = one_x();
    let tip = Point::new(inv_phi(), K::new_i64(0, 0, 0, 0)).rotate(2);
    let p3 = one_x().rotate(4);
    ProtoData {
        vertices: vec![origin, p1, tip, p3],
        edge_labels: vec![-2, -1, 1, 2],
        convex_decomposition: vec![vec![0, 1, 2], vec![0, 2, 3]],
    }
}

fn rhomb_data(angle_steps: i32, labels: [i32; 4]) -> ProtoData {
    let origin = Point::origin();
    let v1 = one_x();
    let v3 = one_x().rotate(angle_steps);
    // v2 = v1 + (v3 - origin), i.e. completing the parallelogram.
    let v2 = v1.plus(&v3.minus(&origin));
    ProtoData {
        vertices: vec![origin, v1, v2, v3],
        edge_labels: labels.to_vec(),
        convex_decomposition: vec![vec![0, 1, 2, 3]],
    }
}

fn thick_rhomb_data() -> ProtoData {
    rhomb_data(4, [3, 4, -4, -3])
}

fn thin_rhomb_data() -> ProtoData {
    rhomb_data(2, [3, -3, 4, -4])
}

/// Splits a kite/dart-shaped quadrilateral `[origin, p1, tip, p3]` into its
/// two Robinson-A halves about the origin-tip diagonal.
fn split_a(vertices: &[Point], radius_label: i32, chord_label: i32, split_label: i32) -> (ProtoData, ProtoData) {
    let origin = vertices[0].clone();
    let p1 = vertices[1].clone();
    let tip = vertices[2].clone();
    let p3 = vertices[3].clone();
    let first = ProtoData {
        vertices: vec![origin.clone(), p1, tip.clone()],
        edge_labels: vec![radius_label, chord_label, -split_label],
        convex_decomposition: vec![vec![0, 1, 2]],
    };
    let second = ProtoData {
        vertices: vec![origin, tip, p3],
        edge_labels: vec![split_label, -chord_label, -radius_label],
        convex_decomposition: vec![vec![0, 1, 2]],
    };
    (first, second)
}

/// Splits the thick rhomb `[origin, v1, v2, v3]` into its two Robinson-B
/// halves about the origin-v2 diagonal: this diagonal joins the rhomb's two
/// 72 degree vertices, so each half keeps a full 108 degree angle (at `v1`
/// and at `v3` respectively) as its apex.
fn split_thick(vertices: &[Point], side_label: i32, split_label: i32) -> (ProtoData, ProtoData) {
    let origin = vertices[0].clone();
    let v1 = vertices[1].clone();
    let v2 = vertices[2].clone();
    let v3 = vertices[3].clone();
    let first = ProtoData {
        vertices: vec![origin.clone(), v1, v2.clone()],
        edge_labels: vec![side_label, side_label, -split_label],
        convex_decomposition: vec![vec![0, 1, 2]],
    };
    let second = ProtoData {
        vertices: vec![origin, v2, v3],
        edge_labels: vec![split_label, -side_label, -side_label],
        convex_decomposition: vec![vec![0, 1, 2]],
    };
    (first, second)
}

/// Splits the thin rhomb `[origin, v1, v2, v3]` into its two Robinson-B
/// halves about the v1-v3 diagonal: unlike the thick rhomb, the origin-v2
/// diagonal of a thin rhomb joins its two acute (36 degree) vertices and
/// would leave an 18-144-18 sliver on each side, which is not a valid
/// Robinson triangle. The v1-v3 diagonal joins the two 144 degree vertices
/// instead, leaving a full 36 degree angle (at `origin` and at `v2`
/// respectively) as each half's apex.
fn split_thin(vertices: &[Point], side_label: i32, split_label: i32) -> (ProtoData, ProtoData) {
    let origin = vertices[0].clone();
    let v1 = vertices[1].clone();
    let v2 = vertices[2].clone();
    let v3 = vertices[3].clone();
    let first = ProtoData {
        vertices: vec![v1.clone(), v2, v3.clone()],
        edge_labels: vec![side_label, side_label, -split_label],
        convex_decomposition: vec![vec![0, 1, 2]],
    };
    let second = ProtoData {
        vertices: vec![v3, origin, v1],
        edge_labels: vec![side_label, side_label, split_label],
        convex_decomposition: vec![vec![0, 1, 2]],
    };
    (first, second)
}

/// Global prototile registry, built once and shared read-only.
pub static PROTO_TABLE: LazyLock<FxHashMap<ProtoId, ProtoData>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();

    let kite = kite_data();
    let dart = dart_data();
    let (ak1, ak2) = split_a(&kite.vertices, 10, 11, 12);
    let (ad1, ad2) = split_a(&dart.vertices, -10, -11, 12);

    let thick = thick_rhomb_data();
    let thin = thin_rhomb_data();
    let (bl1, bl2) = split_thick(&thick.vertices, 20, 22);
    let (bs1, bs2) = split_thin(&thin.vertices, 21, 23);

    table.insert(ProtoId::Kite, kite);
    table.insert(ProtoId::Dart, dart);
    table.insert(ProtoId::ThickRhomb, thick);
    table.insert(ProtoId::ThinRhomb, thin);
    table.insert(ProtoId::AK1, ak1);
    table.insert(ProtoId::AK2, ak2);
    table.insert(ProtoId::AD1, ad1);
    table.insert(ProtoId::AD2, ad2);
    table.insert(ProtoId::BL1, bl1);
    table.insert(ProtoId::BL2, bl2);
    table.insert(ProtoId::BS1, bs1);
    table.insert(ProtoId::BS2, bs2);

    table
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prototile_is_registered() {
        let table = &*PROTO_TABLE;
        for id in ProtoId::ALL {
            assert!(table.contains_key(&id));
        }
    }

    #[test]
    fn kite_and_dart_are_quadrilaterals() {
        let table = &*PROTO_TABLE;
        assert_eq!(table[&ProtoId::Kite].vertices.len(), 4);
        assert_eq!(table[&ProtoId::Dart].vertices.len(), 4);
    }

    #[test]
    fn robinson_tiles_are_triangles() {
        let table = &*PROTO_TABLE;
        for id in [ProtoId::AK1, ProtoId::AK2, ProtoId::AD1, ProtoId::AD2, ProtoId::BL1, ProtoId::BL2, ProtoId::BS1, ProtoId::BS2] {
            assert_eq!(table[&id].vertices.len(), 3);
        }
    }
}
