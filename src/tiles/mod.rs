//! The Penrose tile model (prototile catalogue, placed tiles, matching
//! rules) and the substitution rules that deflate tiles into smaller ones.

mod matching;
mod prototile;
mod substitution;

pub use matching::{edges_match, matches, Tile};
pub use prototile::{ProtoId, TileSet};
pub use substitution::{deflate, half_deflation, merge, split, RuleId};
