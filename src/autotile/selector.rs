//! Wall-piece selection from a cell's neighbourhood
//!
//! Matching a signature against the catalog means trying each of its four
//! rotations against every entry. [`PieceTable`] does that work once: it
//! expands every catalog entry into its rotations and resolves all 256
//! closure masks up front, so selection at runtime is a single array read.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use crate::autotile::catalog::{PieceId, WallCatalog};
use crate::autotile::signature::{ClosureMask, Signature};
use crate::spatial::grid::{Cell, TileGrid};

/// Clockwise quarter-turn orientation of a placed piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// Unrotated
    #[default]
    None,
    /// 90° clockwise
    Quarter,
    /// 180°
    Half,
    /// 270° clockwise
    ThreeQuarter,
}

impl Rotation {
    /// All rotations in ascending order
    pub const ALL: [Self; 4] = [Self::None, Self::Quarter, Self::Half, Self::ThreeQuarter];

    /// Rotation for a number of quarter turns (taken modulo 4)
    pub const fn from_quarter_turns(quarter_turns: u8) -> Self {
        match quarter_turns % 4 {
            0 => Self::None,
            1 => Self::Quarter,
            2 => Self::Half,
            _ => Self::ThreeQuarter,
        }
    }

    /// Number of clockwise quarter turns
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Quarter => 1,
            Self::Half => 2,
            Self::ThreeQuarter => 3,
        }
    }

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }
}

/// A piece together with the rotation it is placed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Which mesh to place
    pub piece: PieceId,
    /// How far to turn it
    pub rotation: Rotation,
}

impl Placement {
    /// Unrotated floor
    pub const FLOOR: Self = Self {
        piece: PieceId::FLOOR,
        rotation: Rotation::None,
    };
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.piece, self.rotation.degrees())
    }
}

/// Outcome of selecting the base piece for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceSelection {
    /// The cell is open and takes the floor piece
    Floor,
    /// The cell is a wall matched by the catalog
    Wall(Placement),
    /// The cell is a wall whose signature no catalog entry covers
    Unmatched(Signature),
}

/// Precomputed closure-mask lookup built from a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceTable {
    by_mask: [Option<Placement>; 256],
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::build(&WallCatalog::builtin())
    }
}

impl PieceTable {
    /// Expand a catalog into the full lookup table
    ///
    /// Rotations are tried in ascending order and entries in catalog order;
    /// the first entry/rotation pair producing a signature wins it.
    pub fn build(catalog: &WallCatalog) -> Self {
        let mut by_signature: HashMap<Signature, Placement> = HashMap::new();
        for rotation in Rotation::ALL {
            for (piece, entry) in catalog.pieces() {
                let signature = entry.signature.rotated(rotation.quarter_turns());
                if let Entry::Vacant(slot) = by_signature.entry(signature) {
                    slot.insert(Placement { piece, rotation });
                }
            }
        }

        let mut by_mask = [None; 256];
        for (slot, mask) in by_mask.iter_mut().zip(ClosureMask::all()) {
            *slot = by_signature
                .get(&Signature::from_closures(mask))
                .copied();
        }

        Self { by_mask }
    }

    /// Placement for a wall with the given neighbourhood
    pub fn lookup(&self, mask: ClosureMask) -> Option<Placement> {
        self.by_mask.get(usize::from(mask.bits())).copied().flatten()
    }

    /// Number of closure masks with no placement
    pub fn unmatched_masks(&self) -> usize {
        self.by_mask.iter().filter(|slot| slot.is_none()).count()
    }
}

/// Select the base piece for a cell
///
/// Open cells (and out-of-bounds cells) take the floor piece. Walls are
/// resolved through the table; a miss reports the cell's signature.
pub fn select_piece(grid: &TileGrid, cell: Cell, table: &PieceTable) -> PieceSelection {
    if !grid.tile(cell).is_some_and(|tile| tile.closed) {
        return PieceSelection::Floor;
    }
    let mask = ClosureMask::from_grid(grid, cell);
    table.lookup(mask).map_or_else(
        || PieceSelection::Unmatched(Signature::from_closures(mask)),
        PieceSelection::Wall,
    )
}
