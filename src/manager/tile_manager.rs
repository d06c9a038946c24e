//! The tile manager: a mutable collection of placed, non-overlapping,
//! matching-rule-respecting tiles, indexed by a spatial grid for fast
//! neighbor lookups.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{KernelError, Result};
use crate::geometry::{AffineTransform, Point, Rectangle};
use crate::tiles::{deflate, half_deflation, matches, merge, split, RuleId, Tile, TileSet};

use super::grid::{approx_inv_sqrt, cells_for};

/// Outcome of a [`TileManager::can_add_tile`] check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanAdd {
    /// The tile may be added without violating any invariant.
    Yes,
    /// An identical tile (by [`Tile`]'s canonicalized equality) is already
    /// present. This is not a rejection: re-adding a tile that is already
    /// there is a harmless no-op.
    AlreadyPresent,
    /// The tile cannot be added, with a human-readable reason (overlapping
    /// area with an existing tile, or a matching-rule violation on a shared
    /// edge). This is an ordinary outcome of tiling assembly, not an error.
    No(String),
}

/// Outcome of [`TileManager::try_add_tile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The tile was newly added.
    Added,
    /// An identical tile was already present; nothing changed.
    AlreadyPresent,
    /// The tile was rejected, with a human-readable reason.
    Rejected(String),
}

/// A mutable collection of placed tiles.
#[derive(Debug, Clone, Default)]
pub struct TileManager {
    scale_factor: Option<f64>,
    tiles: FxHashSet<Tile>,
    tiles_in_grid: FxHashMap<(i32, i32), FxHashSet<Tile>>,
    vertex_refcounts: FxHashMap<Point, u32>,
}

impl TileManager {
    /// An empty tile manager.
    pub fn new() -> Self {
        Self::default()
    }

    fn scale_factor_for(&self, tile: &Tile) -> f64 {
        match self.scale_factor {
            Some(sf) => sf,
            None => {
                let bbox = tile.bbox();
                let width = bbox.max_x().to_f64_approx() - bbox.min_x().to_f64_approx();
                let height = bbox.max_y().to_f64_approx() - bbox.min_y().to_f64_approx();
                approx_inv_sqrt((width * height).abs())
            }
        }
    }

    fn cells_for_tile(&self, tile: &Tile) -> Vec<(i32, i32)> {
        cells_for(&tile.bbox(), self.scale_factor_for(tile))
    }

    fn candidate_neighbors(&self, tile: &Tile) -> FxHashSet<Tile> {
        let mut candidates = FxHashSet::default();
        for cell in self.cells_for_tile(tile) {
            if let Some(occupants) = self.tiles_in_grid.get(&cell) {
                candidates.extend(occupants.iter().cloned());
            }
        }
        candidates
    }

    /// Checks whether `tile` may be added: it must not overlap the interior
    /// of any existing tile, and any edge it shares with an existing tile
    /// must satisfy the matching rule.
    pub fn can_add_tile(&self, tile: &Tile) -> CanAdd {
        if self.tiles.is_empty() {
            return CanAdd::Yes;
        }
        if self.tiles.contains(tile) {
            return CanAdd::AlreadyPresent;
        }
        for existing in self.candidate_neighbors(tile) {
            if !matches(tile, &existing) {
                log::trace!("rejecting {:?}: does not match existing {:?}", tile.proto(), existing.proto());
                return CanAdd::No(format!(
                    "{:?} does not match existing {:?}",
                    tile.proto(),
                    existing.proto()
                ));
            }
        }
        CanAdd::Yes
    }

    /// Inserts `tile` into the spatial index and vertex table, without
    /// re-checking [`TileManager::can_add_tile`]. Only called once a caller
    /// has already established the tile may be added.
    fn insert_unconditionally(&mut self, tile: Tile) {
        log::debug!("adding {:?} ({} tiles total after insert)", tile.proto(), self.tiles.len() + 1);
        if self.scale_factor.is_none() {
            self.scale_factor = Some(self.scale_factor_for(&tile));
        }
        for cell in self.cells_for_tile(&tile) {
            self.tiles_in_grid.entry(cell).or_default().insert(tile.clone());
        }
        for v in tile.vertices() {
            *self.vertex_refcounts.entry(v).or_insert(0) += 1;
        }
        self.tiles.insert(tile);
    }

    /// Checks [`TileManager::can_add_tile`] and, if it passes, adds the
    /// tile, reporting exactly which of the three outcomes occurred.
    pub fn try_add_tile(&mut self, tile: Tile) -> AddOutcome {
        match self.can_add_tile(&tile) {
            CanAdd::Yes => {
                self.insert_unconditionally(tile);
                AddOutcome::Added
            }
            CanAdd::AlreadyPresent => AddOutcome::AlreadyPresent,
            CanAdd::No(reason) => AddOutcome::Rejected(reason),
        }
    }

    /// Adds `tile`, treating "already present" as success: only a genuine
    /// matching-rule/overlap rejection is an error.
    ///
    /// # Errors
    /// Returns [`KernelError::DomainValue`] if `tile` overlaps an existing
    /// tile's interior or violates the matching rule on a shared edge.
    pub fn add_tile(&mut self, tile: Tile) -> Result<()> {
        match self.try_add_tile(tile) {
            AddOutcome::Added | AddOutcome::AlreadyPresent => Ok(()),
            AddOutcome::Rejected(reason) => Err(KernelError::DomainValue {
                constraint: "tile manager matching rule",
                detail: reason,
            }),
        }
    }

    /// Removes `tile`, returning `true` if it was present.
    pub fn remove_tile(&mut self, tile: &Tile) -> bool {
        if !self.tiles.remove(tile) {
            return false;
        }
        log::debug!("removed {:?} ({} tiles remain)", tile.proto(), self.tiles.len());
        for cell in self.cells_for_tile(tile) {
            if let Some(occupants) = self.tiles_in_grid.get_mut(&cell) {
                occupants.remove(tile);
                if occupants.is_empty() {
                    self.tiles_in_grid.remove(&cell);
                }
            }
        }
        for v in tile.vertices() {
            if let Some(count) = self.vertex_refcounts.get_mut(&v) {
                *count -= 1;
                if *count == 0 {
                    self.vertex_refcounts.remove(&v);
                }
            }
        }
        true
    }

    /// Every tile currently in this manager.
    pub fn get_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Every distinct vertex position currently occupied by at least one
    /// tile.
    pub fn get_vertices(&self) -> impl Iterator<Item = &Point> {
        self.vertex_refcounts.keys()
    }

    /// The bounding box of every tile in this manager, or `None` if empty.
    pub fn bbox(&self) -> Option<Rectangle> {
        self.tiles.iter().map(|t| t.bbox()).fold(None, |acc, b| match acc {
            None => Some(b),
            Some(acc) => Some(acc.union(&b)),
        })
    }

    /// Builds a new manager with every tile transformed by `t` (applied
    /// after each tile's own placement transform).
    #[must_use]
    pub fn transform(&self, t: &AffineTransform) -> Self {
        let mut out = Self::new();
        for tile in &self.tiles {
            if let Ok(moved) = Tile::new(tile.proto(), tile.transform().then(t)) {
                out.try_add_tile(moved);
            }
        }
        out
    }

    /// Builds a new manager by substituting every tile according to `rule`.
    /// Tiles whose prototile the rule does not apply to are dropped.
    ///
    /// Children produced by the substitution are re-validated against the
    /// matching rule as they're inserted (unlike a bare insert, which trusts
    /// its caller): a rejected child is logged and dropped rather than
    /// silently accepted, since adjacent deflations can legitimately produce
    /// overlapping boundary tiles.
    #[must_use]
    pub fn decompose(&self, rule: RuleId) -> Self {
        if matches!(rule, RuleId::ToP2 | RuleId::ToP3) {
            return self.merge_robinson_pairs(rule);
        }
        let mut out = Self::new();
        for tile in &self.tiles {
            let children = match rule {
                RuleId::ToA | RuleId::ToB => split(tile).map(Vec::from).unwrap_or_default(),
                RuleId::HalfDeflation => half_deflation(tile).unwrap_or_default(),
                RuleId::Deflation => deflate(tile).unwrap_or_default(),
                RuleId::ToP2 | RuleId::ToP3 => unreachable!("handled by merge_robinson_pairs above"),
            };
            for child in children {
                if let AddOutcome::Rejected(reason) = out.try_add_tile(child) {
                    log::warn!("decompose({rule:?}): rejected a child: {reason}");
                }
            }
        }
        log::debug!(
            "decompose({rule:?}): {} tiles -> {} tiles",
            self.tiles.len(),
            out.tiles.len()
        );
        out
    }

    /// Merges matching pairs of Robinson-A (for [`RuleId::ToP2`]) or
    /// Robinson-B (for [`RuleId::ToP3`]) halves back into their parent
    /// kite/dart/rhomb, via [`merge`]. A half with no matching partner in
    /// this manager passes through unchanged; tiles from the other Robinson
    /// set, or already-merged P2/P3 tiles, are dropped, since the rule does
    /// not apply to them.
    fn merge_robinson_pairs(&self, rule: RuleId) -> Self {
        let wanted = if rule == RuleId::ToP2 { TileSet::RobinsonA } else { TileSet::RobinsonB };
        let candidates: Vec<&Tile> = self.tiles.iter().filter(|t| t.tile_set() == wanted).collect();
        let mut used = FxHashSet::default();
        let mut out = Self::new();

        for (i, a) in candidates.iter().enumerate() {
            if used.contains(*a) {
                continue;
            }
            let mut partner = None;
            for b in &candidates[i + 1..] {
                if used.contains(*b) {
                    continue;
                }
                if let Ok(parent) = merge(a, b) {
                    partner = Some(*b);
                    if let AddOutcome::Rejected(reason) = out.try_add_tile(parent) {
                        log::warn!("decompose({rule:?}): rejected a merged tile: {reason}");
                    }
                    break;
                }
            }
            match partner {
                Some(b) => {
                    used.insert(*a);
                    used.insert(b);
                }
                None => {
                    if let AddOutcome::Rejected(reason) = out.try_add_tile((**a).clone()) {
                        log::warn!("decompose({rule:?}): rejected an unpaired half: {reason}");
                    }
                    used.insert(*a);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::ProtoId;

    #[test]
    fn adding_the_same_tile_twice_reports_already_present() {
        let mut mgr = TileManager::new();
        let kite = Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile");
        assert_eq!(mgr.try_add_tile(kite.clone()), AddOutcome::Added);
        assert_eq!(mgr.try_add_tile(kite), AddOutcome::AlreadyPresent);
        assert_eq!(mgr.get_tiles().count(), 1);
    }

    #[test]
    fn add_tile_succeeds_on_already_present_tile() {
        let mut mgr = TileManager::new();
        let kite = Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile");
        assert!(mgr.add_tile(kite.clone()).is_ok());
        assert!(mgr.add_tile(kite).is_ok());
        assert_eq!(mgr.get_tiles().count(), 1);
    }

    #[test]
    fn removing_a_tile_clears_its_vertices() {
        let mut mgr = TileManager::new();
        let kite = Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile");
        mgr.try_add_tile(kite.clone());
        assert!(mgr.remove_tile(&kite));
        assert_eq!(mgr.get_vertices().count(), 0);
        assert_eq!(mgr.get_tiles().count(), 0);
    }

    #[test]
    fn overlapping_tile_is_rejected() {
        let mut mgr = TileManager::new();
        let kite = Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile");
        mgr.try_add_tile(kite.clone());
        // The same footprint, occupied by an unrelated tile, overlaps it entirely.
        let same_spot = Tile::new(ProtoId::Dart, AffineTransform::identity()).expect("valid tile");
        assert!(matches!(mgr.can_add_tile(&same_spot), CanAdd::No(_)));
        assert!(mgr.add_tile(same_spot).is_err());
    }

    #[test]
    fn decompose_to_a_splits_every_tile() {
        let mut mgr = TileManager::new();
        mgr.try_add_tile(Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile"));
        let split_mgr = mgr.decompose(RuleId::ToA);
        assert_eq!(split_mgr.get_tiles().count(), 2);
    }

    #[test]
    fn decompose_to_p2_merges_a_matching_pair_of_halves() {
        let mut mgr = TileManager::new();
        let kite = Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile");
        let halves = split(&kite).expect("kite splits");
        mgr.try_add_tile(halves[0].clone());
        mgr.try_add_tile(halves[1].clone());
        let merged = mgr.decompose(RuleId::ToP2);
        assert_eq!(merged.get_tiles().count(), 1);
        assert_eq!(merged.get_tiles().next().expect("one tile").proto(), ProtoId::Kite);
    }

    #[test]
    fn decompose_to_p2_passes_through_an_unpaired_half() {
        let mut mgr = TileManager::new();
        let kite = Tile::new(ProtoId::Kite, AffineTransform::identity()).expect("valid tile");
        let halves = split(&kite).expect("kite splits");
        mgr.try_add_tile(halves[0].clone());
        let merged = mgr.decompose(RuleId::ToP2);
        assert_eq!(merged.get_tiles().count(), 1);
        assert_eq!(merged.get_tiles().next().expect("one tile").proto(), ProtoId::AK1);
    }

    #[test]
    fn empty_manager_has_no_bbox() {
        let mgr = TileManager::new();
        assert!(mgr.bbox().is_none());
    }
}
