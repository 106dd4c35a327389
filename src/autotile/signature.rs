//! Neighbourhood closure masks and the wall signatures derived from them
//!
//! A [`ClosureMask`] records which of the eight neighbours of a cell are
//! walls. A [`Signature`] condenses that into the features a wall mesh has
//! to show: an open side (edge bit) or a concave inner corner (corner bit).
//! Signatures are written as eight symbols starting at the west edge and
//! running clockwise, alternating edge and corner positions:
//!
//! ```text
//! position  0  1   2  3   4  5   6  7
//! feature   W  NW  N  NE  E  SE  S  SW
//! symbols   X/O c/o X/O c/o X/O c/o X/O c/o
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::io::error::ArenaError;
use crate::spatial::grid::{Cell, Direction, TileGrid, step};

/// Closed/open state of the eight neighbours, bit `i` for `Direction::CLOCKWISE[i]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClosureMask(u8);

impl ClosureMask {
    /// Build a mask from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bits of the mask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Read the neighbourhood of a cell, treating off-grid neighbours as closed
    pub fn from_grid(grid: &TileGrid, cell: Cell) -> Self {
        let bits = Direction::CLOCKWISE
            .iter()
            .enumerate()
            .filter(|(_, direction)| grid.closed_or_offgrid(step(cell, **direction)))
            .fold(0_u8, |bits, (index, _)| bits | (1 << index));
        Self(bits)
    }

    /// Whether the neighbour in a direction is closed
    pub const fn is_closed(self, direction: Direction) -> bool {
        self.0 & (1 << direction.clockwise_index()) != 0
    }

    /// The mask of the same neighbourhood turned clockwise by quarter turns
    #[must_use]
    pub const fn rotated(self, quarter_turns: u8) -> Self {
        Self(self.0.rotate_left(2 * (quarter_turns % 4) as u32))
    }

    /// All 256 possible masks
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=u8::MAX).map(Self)
    }
}

/// Edge/corner feature signature of a wall cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(u8);

impl Signature {
    /// Number of symbols in a signature
    pub const LENGTH: usize = 8;

    /// Derive the signature of a wall cell from its neighbourhood
    ///
    /// Position `k` of the signature looks at neighbour `(k + 7) % 8` of the
    /// clockwise ordering. Edge positions are set when that neighbour is
    /// open. Corner positions are set when the diagonal is open while both
    /// flanking orthogonal neighbours are closed.
    pub const fn from_closures(mask: ClosureMask) -> Self {
        let closed = mask.bits();
        let mut bits = 0_u8;
        let mut position = 0;
        while position < Self::LENGTH {
            let facing = (position + 7) % 8;
            let set = if position % 2 == 0 {
                closed & (1 << facing) == 0
            } else {
                let before = (position + 6) % 8;
                let after = position;
                closed & (1 << before) != 0
                    && closed & (1 << after) != 0
                    && closed & (1 << facing) == 0
            };
            if set {
                bits |= 1 << position;
            }
            position += 1;
        }
        Self(bits)
    }

    /// The signature of the same wall turned clockwise by quarter turns
    #[must_use]
    pub const fn rotated(self, quarter_turns: u8) -> Self {
        Self(self.0.rotate_left(2 * (quarter_turns % 4) as u32))
    }

    /// Whether the symbol at a position is set (`X` or `c`)
    pub const fn is_set(self, position: usize) -> bool {
        position < Self::LENGTH && self.0 & (1 << position) != 0
    }

    /// Smallest signature among the four rotations
    #[must_use]
    pub fn canonical(self) -> Self {
        (0..4)
            .map(|quarter_turns| self.rotated(quarter_turns))
            .min()
            .unwrap_or(self)
    }

    /// Number of distinct rotations of this signature (1, 2 or 4)
    pub fn rotational_period(self) -> u8 {
        (1..4)
            .find(|&quarter_turns| self.rotated(quarter_turns) == self)
            .unwrap_or(4)
    }

    /// Every signature a real neighbourhood can produce, in ascending order
    pub fn reachable() -> Vec<Self> {
        ClosureMask::all()
            .map(Self::from_closures)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    // A concave corner needs both flanking sides closed, so its edge bits must be clear
    const fn is_reachable(self) -> bool {
        let mut position = 1;
        while position < Self::LENGTH {
            if self.is_set(position)
                && (self.is_set(position - 1) || self.is_set((position + 1) % Self::LENGTH))
            {
                return false;
            }
            position += 2;
        }
        true
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for position in 0..Self::LENGTH {
            let symbol = match (position % 2 == 0, self.is_set(position)) {
                (true, true) => 'X',
                (true, false) => 'O',
                (false, true) => 'c',
                (false, false) => 'o',
            };
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl FromStr for Signature {
    type Err = ArenaError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ArenaError::InvalidSignature {
            signature: text.to_string(),
            reason,
        };

        let symbols: Vec<char> = text.chars().collect();
        if symbols.len() != Self::LENGTH {
            return Err(invalid(format!(
                "expected {} symbols, found {}",
                Self::LENGTH,
                symbols.len()
            )));
        }

        let mut bits = 0_u8;
        for (position, symbol) in symbols.into_iter().enumerate() {
            let set = match (position % 2 == 0, symbol) {
                (true, 'X') | (false, 'c') => true,
                (true, 'O') | (false, 'o') => false,
                (true, other) => {
                    return Err(invalid(format!(
                        "edge position {position} must be 'X' or 'O', found '{other}'"
                    )));
                }
                (false, other) => {
                    return Err(invalid(format!(
                        "corner position {position} must be 'c' or 'o', found '{other}'"
                    )));
                }
            };
            if set {
                bits |= 1 << position;
            }
        }

        let signature = Self(bits);
        if !signature.is_reachable() {
            return Err(invalid(
                "a corner cannot be concave next to an open edge".to_string(),
            ));
        }
        Ok(signature)
    }
}
