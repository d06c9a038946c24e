//! Substitution (inflation/deflation) rules over the prototile catalogue.
//!
//! Six named rules are supported, matching the rule-ids used by the driver
//! scripts this crate's tiling logic is grounded on: splitting a P2/P3 tile
//! into its Robinson-triangle halves (`to-A`/`to-B`), merging a matching
//! pair of halves back into a P2/P3 tile (`to-P2`/`to-P3`), substituting a
//! single Robinson triangle into smaller Robinson triangles
//! (`half-deflation`), and the composite operation that deflates a whole
//! P2/P3 tile into smaller same-tile-set tiles (`deflation`). Every
//! deflation step scales by `1/phi`.

use crate::error::{KernelError, Result};
use crate::geometry::{AffineTransform, Point, Vector};
use crate::numfield::{inv_phi, one, K};

use super::prototile::{ProtoId, TileSet, PROTO_TABLE};
use super::matching::Tile;

/// Names a substitution rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    /// Split a kite or dart into its two Robinson-A halves.
    ToA,
    /// Split a thick or thin rhomb into its two Robinson-B halves.
    ToB,
    /// Merge a matching pair of Robinson-A halves into a kite or dart.
    ToP2,
    /// Merge a matching pair of Robinson-B halves into a thick or thin rhomb.
    ToP3,
    /// Substitute a single Robinson triangle into smaller Robinson triangles.
    HalfDeflation,
    /// Deflate a whole P2/P3 tile into smaller tiles of the same tile set.
    Deflation,
}

impl RuleId {
    /// The rule-id string this variant corresponds to.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::ToA => "to-A",
            RuleId::ToB => "to-B",
            RuleId::ToP2 => "to-P2",
            RuleId::ToP3 => "to-P3",
            RuleId::HalfDeflation => "half-deflation",
            RuleId::Deflation => "deflation",
        }
    }
}

/// Splits a kite/dart tile into its two Robinson-A halves, or a thick/thin
/// rhomb into its two Robinson-B halves. The children reuse the parent's
/// transform unchanged, since the Robinson prototile vertices were defined
/// directly as a subset of the parent prototile's own canonical vertices.
///
/// # Errors
/// Returns [`KernelError::TypeMismatch`] if `tile` is not a kite, dart,
/// thick rhomb, or thin rhomb.
pub fn split(tile: &Tile) -> Result<[Tile; 2]> {
    let t = tile.transform().clone();
    let (first, second) = match tile.proto() {
        ProtoId::Kite => (ProtoId::AK1, ProtoId::AK2),
        ProtoId::Dart => (ProtoId::AD1, ProtoId::AD2),
        ProtoId::ThickRhomb => (ProtoId::BL1, ProtoId::BL2),
        ProtoId::ThinRhomb => (ProtoId::BS1, ProtoId::BS2),
        other => {
            return Err(KernelError::TypeMismatch {
                expected: "kite, dart, thick rhomb, or thin rhomb",
                found: format!("{other:?}"),
            })
        }
    };
    Ok([Tile::new(first, t.clone())?, Tile::new(second, t)?])
}

/// Merges two Robinson-A or Robinson-B halves sharing the same transform
/// back into their parent kite/dart/rhomb.
///
/// # Errors
/// Returns [`KernelError::TypeMismatch`] if the two tiles are not a matching
/// half-pair placed with the same transform.
pub fn merge(a: &Tile, b: &Tile) -> Result<Tile> {
    let mismatch = || KernelError::TypeMismatch {
        expected: "a matching pair of Robinson halves with the same transform",
        found: format!("{:?} and {:?}", a.proto(), b.proto()),
    };
    if a.transform() != b.transform() {
        return Err(mismatch());
    }
    let parent = match (a.proto(), b.proto()) {
        (ProtoId::AK1, ProtoId::AK2) | (ProtoId::AK2, ProtoId::AK1) => ProtoId::Kite,
        (ProtoId::AD1, ProtoId::AD2) | (ProtoId::AD2, ProtoId::AD1) => ProtoId::Dart,
        (ProtoId::BL1, ProtoId::BL2) | (ProtoId::BL2, ProtoId::BL1) => ProtoId::ThickRhomb,
        (ProtoId::BS1, ProtoId::BS2) | (ProtoId::BS2, ProtoId::BS1) => ProtoId::ThinRhomb,
        _ => return Err(mismatch()),
    };
    Tile::new(parent, a.transform().clone())
}

/// Which of the two Robinson-triangle shapes a canonical triangle is: acute
/// has a 36 degree apex and a base shorter than its legs; obtuse has a 108
/// degree apex and a base longer than its legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Species {
    Acute,
    Obtuse,
}

/// The vertex index of a triangle's apex: every Robinson triangle is
/// isosceles, so exactly one vertex has two touching edges of equal length.
fn apex_index(v: &[Point; 3]) -> usize {
    let len_sq = |p: &Point, q: &Point| {
        let d = p.minus(q);
        d.dot(&d)
    };
    let e20 = len_sq(&v[2], &v[0]);
    let e01 = len_sq(&v[0], &v[1]);
    let e12 = len_sq(&v[1], &v[2]);
    if e20 == e01 {
        0
    } else if e01 == e12 {
        1
    } else {
        2
    }
}

/// Classifies a triangle given its apex index.
fn species(v: &[Point; 3], apex: usize) -> Species {
    let b1 = (apex + 1) % 3;
    let b2 = (apex + 2) % 3;
    let leg = {
        let d = v[apex].minus(&v[b1]);
        d.dot(&d)
    };
    let base = {
        let d = v[b1].minus(&v[b2]);
        d.dot(&d)
    };
    if base.cmp(&leg) == std::cmp::Ordering::Less {
        Species::Acute
    } else {
        Species::Obtuse
    }
}

/// A prototile's own canonical leg length, relative to the acute species'
/// unit leg: `AK1`/`AK2`/`BL1`/`BL2`/`BS1`/`BS2` all have unit legs; `AD1`/
/// `AD2` have legs already shrunk by `1/phi` (the dart's inner vertex sits
/// at `1/phi` along its own ray rather than at `1`).
fn leg_scale(proto: ProtoId) -> K {
    match proto {
        ProtoId::AD1 | ProtoId::AD2 => inv_phi(),
        _ => one(),
    }
}

/// The representative prototile used to place a freshly built child of the
/// given species within the given Robinson tile set.
fn representative(set: TileSet, sp: Species) -> ProtoId {
    match (set, sp) {
        (TileSet::RobinsonA, Species::Acute) => ProtoId::AK1,
        (TileSet::RobinsonA, Species::Obtuse) => ProtoId::AD1,
        (TileSet::RobinsonB, Species::Acute) => ProtoId::BS1,
        (TileSet::RobinsonB, Species::Obtuse) => ProtoId::BL1,
        (TileSet::P2 | TileSet::P3, _) => unreachable!("half-deflation only substitutes Robinson triangles"),
    }
}

/// A child triangle expressed in the parent's own canonical coordinate
/// frame, with its species already determined.
struct ChildTriangle {
    verts: [Point; 3],
    species: Species,
}

/// Substitutes an acute (36 degree apex) triangle `(a, b, c)` into one
/// smaller obtuse child sharing the full leg `a-c`, and one smaller acute
/// child filling the remainder, via the golden-ratio section point
/// `p = a + (b - a) / phi` on leg `a-b`.
fn acute_children(v: &[Point; 3], apex: usize) -> [ChildTriangle; 2] {
    let a = v[apex].clone();
    let b = v[(apex + 1) % 3].clone();
    let c = v[(apex + 2) % 3].clone();
    let p = a.plus(&b.minus(&a).scale(&inv_phi()));
    [
        ChildTriangle { verts: [a.clone(), p.clone(), c.clone()], species: Species::Obtuse },
        ChildTriangle { verts: [p, b, c], species: Species::Acute },
    ]
}

/// Substitutes an obtuse (108 degree apex) triangle `(a, b, c)` into two
/// smaller obtuse children and one smaller acute child, via the section
/// points `x = c + (b - c) / phi^2` on base `b-c` and `p2 = b + (x - b) /
/// phi` on the inner segment `b-x`.
fn obtuse_children(v: &[Point; 3], apex: usize) -> [ChildTriangle; 3] {
    let a = v[apex].clone();
    let b = v[(apex + 1) % 3].clone();
    let c = v[(apex + 2) % 3].clone();
    let inv_phi2 = inv_phi().mul(&inv_phi());
    let x = c.plus(&b.minus(&c).scale(&inv_phi2));
    let p2 = b.plus(&x.minus(&b).scale(&inv_phi()));
    [
        ChildTriangle { verts: [a.clone(), x.clone(), c], species: Species::Obtuse },
        ChildTriangle { verts: [b, p2.clone(), a.clone()], species: Species::Obtuse },
        ChildTriangle { verts: [p2, x, a], species: Species::Acute },
    ]
}

/// Computes the scale factor (relative to `representative`'s own canonical
/// leg length) needed to place a child whose legs are `parent_leg_scale /
/// phi` long. Both `leg_scale(representative)` and `parent_leg_scale` are
/// always one of `{1, 1/phi}`, so this is always exact symbolic
/// cancellation, never a generic field division.
fn scale_for_child(parent_leg_scale: &K, representative: ProtoId) -> K {
    let child_leg_scale = parent_leg_scale.mul(&inv_phi());
    if leg_scale(representative) == one() {
        child_leg_scale
    } else {
        parent_leg_scale.clone()
    }
}

/// Builds the similarity transform (in the parent's own canonical frame)
/// mapping prototile `repr`'s own canonical vertices onto `target`, which
/// must be congruent to `repr`'s shape up to rotation, the given `scale`,
/// and translation.
///
/// The rotation is found by trying every multiple of 18 degrees: every
/// triangle this crate builds keeps its edges on one of the 20 standard
/// directions (the defining invariant of the Penrose pentagrid), so a match
/// always exists for correctly constructed input.
///
/// # Errors
/// Returns [`KernelError::DomainValue`] if no multiple of 18 degrees aligns
/// the two triangles.
fn transform_onto(repr: ProtoId, target: &[Point; 3], scale: &K) -> Result<AffineTransform> {
    let repr_verts = &PROTO_TABLE[&repr].vertices;
    let repr_tri = [repr_verts[0].clone(), repr_verts[1].clone(), repr_verts[2].clone()];
    let repr_apex = apex_index(&repr_tri);
    let repr_a = repr_tri[repr_apex].clone();
    let repr_b = repr_tri[(repr_apex + 1) % 3].clone();
    let repr_dir = repr_b.minus(&repr_a);

    let target_apex = apex_index(target);
    let a = target[target_apex].clone();
    let b = target[(target_apex + 1) % 3].clone();
    let target_dir = b.minus(&a);

    for n in 0..20 {
        let rotated = AffineTransform::rotation(n).transform_vector(&repr_dir);
        let scaled = Vector::new(rotated.dx.mul(scale), rotated.dy.mul(scale));
        if scaled == target_dir {
            let linear = AffineTransform::rotation(n).then(&AffineTransform::uniform_scaling(scale.clone()));
            let placed_a = linear.transform(&repr_a);
            let d = a.minus(&placed_a);
            return Ok(linear.then(&AffineTransform::translation(d.dx, d.dy)));
        }
    }
    Err(KernelError::DomainValue {
        constraint: "child triangle aligned to a multiple of 18 degrees",
        detail: format!("could not align {repr:?} onto the substituted triangle"),
    })
}

/// Substitutes a single Robinson triangle into smaller Robinson triangles,
/// each scaled by `1/phi` relative to the parent: an acute triangle splits
/// into one smaller obtuse and one smaller acute triangle; an obtuse
/// triangle splits into two smaller obtuse and one smaller acute triangle.
/// Both constructions partition the parent's interior exactly, with no gap
/// and no overlap, and keep every child's edges on one of the 20 standard
/// directions.
///
/// # Errors
/// Returns [`KernelError::TypeMismatch`] if `tile` is not a Robinson
/// triangle, or [`KernelError::DomainValue`] if a child's geometry could not
/// be aligned to its representative prototile (not expected for any tile
/// actually produced by this catalogue).
pub fn half_deflation(tile: &Tile) -> Result<Vec<Tile>> {
    let set = tile.tile_set();
    if !matches!(set, TileSet::RobinsonA | TileSet::RobinsonB) {
        return Err(KernelError::TypeMismatch {
            expected: "a Robinson-A or Robinson-B triangle",
            found: format!("{:?}", tile.proto()),
        });
    }
    let canonical = &PROTO_TABLE[&tile.proto()].vertices;
    let tri = [canonical[0].clone(), canonical[1].clone(), canonical[2].clone()];
    let apex = apex_index(&tri);
    let parent_leg_scale = leg_scale(tile.proto());

    let children: Vec<ChildTriangle> = match species(&tri, apex) {
        Species::Acute => Vec::from(acute_children(&tri, apex)),
        Species::Obtuse => Vec::from(obtuse_children(&tri, apex)),
    };

    children
        .iter()
        .map(|child| {
            let repr = representative(set, child.species);
            let scale = scale_for_child(&parent_leg_scale, repr);
            let local = transform_onto(repr, &child.verts, &scale)?;
            Tile::new(repr, local.then(tile.transform()))
        })
        .collect()
}

/// Deflates a whole P2/P3 tile into smaller tiles of the same tile set, by
/// splitting into Robinson halves, substituting each half, and attempting
/// to recombine matching sibling pairs.
///
/// Children that have no matching sibling (because their partner belongs to
/// a different, not-yet-deflated neighbor tile) are returned as bare
/// Robinson tiles rather than merged P2/P3 tiles; a full tiling fills these
/// in from adjacent deflations.
///
/// # Errors
/// Returns [`KernelError::TypeMismatch`] if `tile` is not a kite, dart,
/// thick rhomb, or thin rhomb.
// TODO: recombine same-parent Robinson siblings produced by sibling source
// halves (not just children of the same half) once TileManager exposes a
// cross-tile adjacency query; today only within-half pairs are merged.
pub fn deflate(tile: &Tile) -> Result<Vec<Tile>> {
    let halves = split(tile)?;
    let mut children = Vec::new();
    for half in &halves {
        children.extend(half_deflation(half)?);
    }
    Ok(recombine_pairs(children))
}

/// Greedily merges adjacent same-transform Robinson pairs in `children` back
/// into their parent P2/P3 tile, leaving anything without a partner as-is.
fn recombine_pairs(children: Vec<Tile>) -> Vec<Tile> {
    let mut result = Vec::with_capacity(children.len());
    let mut pending: Option<Tile> = None;
    for child in children {
        if let Some(prev) = pending.take() {
            match merge(&prev, &child) {
                Ok(parent) => result.push(parent),
                Err(_) => {
                    result.push(prev);
                    pending = Some(child);
                }
            }
        } else {
            pending = Some(child);
        }
    }
    if let Some(last) = pending {
        result.push(last);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_then_merge_kite_is_identity() {
        let kite = Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile");
        let halves = split(&kite).expect("kite splits");
        let merged = merge(&halves[0], &halves[1]).expect("halves merge back");
        assert_eq!(merged.proto(), ProtoId::Kite);
        assert_eq!(merged.transform(), kite.transform());
    }

    #[test]
    fn half_deflation_rejects_non_robinson_tiles() {
        let kite = Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile");
        assert!(half_deflation(&kite).is_err());
    }

    #[test]
    fn half_deflation_of_ak1_yields_two_smaller_children() {
        let ak1 = Tile::new(ProtoId::AK1, AffineTransform::identity()).expect("valid tile");
        let children = half_deflation(&ak1).expect("ak1 deflates");
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn half_deflation_children_cover_every_parent_vertex() {
        // A valid partition must at least place a child vertex at every
        // corner of the parent; this doesn't prove no gap/overlap exists in
        // the interior, but it rules out the previous bug where every child
        // was rotated/scaled about a shared anchor with no translation.
        let ak1 = Tile::new(ProtoId::AK1, AffineTransform::identity()).expect("valid tile");
        let parent_verts = ak1.vertices();
        let children = half_deflation(&ak1).expect("ak1 deflates");
        let child_verts: Vec<_> = children.iter().flat_map(Tile::vertices).collect();
        for pv in &parent_verts {
            assert!(child_verts.contains(pv), "parent vertex {pv:?} not covered by any child");
        }
    }

    #[test]
    fn half_deflation_of_acute_triangles_yields_two_children() {
        for proto in [ProtoId::AK1, ProtoId::AK2, ProtoId::BS1, ProtoId::BS2] {
            let tile = Tile::new(proto, AffineTransform::identity()).expect("valid tile");
            let children = half_deflation(&tile).expect("acute triangle deflates");
            assert_eq!(children.len(), 2, "{proto:?} should yield 2 children");
        }
    }

    #[test]
    fn half_deflation_of_obtuse_triangles_yields_three_children() {
        for proto in [ProtoId::AD1, ProtoId::AD2, ProtoId::BL1, ProtoId::BL2] {
            let tile = Tile::new(proto, AffineTransform::identity()).expect("valid tile");
            let children = half_deflation(&tile).expect("obtuse triangle deflates");
            assert_eq!(children.len(), 3, "{proto:?} should yield 3 children");
        }
    }

    #[test]
    fn deflation_of_kite_produces_some_children() {
        let kite = Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile");
        let children = deflate(&kite).expect("kite deflates");
        assert!(!children.is_empty());
    }

    #[test]
    fn rule_id_strings_round_trip_by_name() {
        assert_eq!(RuleId::HalfDeflation.as_str(), "half-deflation");
        assert_eq!(RuleId::Deflation.as_str(), "deflation");
    }
}
