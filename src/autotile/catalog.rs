//! Catalog of wall-piece meshes keyed by their signature
//!
//! Each entry names one distinct wall mesh and the signature it renders in
//! its unrotated orientation. Piece identifiers are 1-based positions in the
//! catalog; identifier 0 is reserved for the floor piece used by open cells.
//!
//! Catalogs can be read from a plain text file with one `<signature> <name>`
//! pair per line. Blank lines and lines starting with `#` are ignored.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::autotile::signature::Signature;
use crate::io::error::{ArenaError, Result, WithContext, level_format};
use tracing::error;

/// Identifier of a base piece (0 = floor, 1+ = catalog entry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

impl PieceId {
    /// The floor piece placed under open cells
    pub const FLOOR: Self = Self(0);

    /// Whether this is the floor piece
    pub const fn is_floor(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One named wall piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Signature rendered by the piece without rotation
    pub signature: Signature,
    /// Asset name of the piece
    pub name: String,
}

// One entry per rotation class of reachable signatures
const BUILTIN_PIECES: [(&str, &str); 15] = [
    ("OoOoOoOo", "solid"),
    ("OoOoOoXo", "face"),
    ("OoOoXoXo", "outer_corner"),
    ("OoXoOoXo", "thin_wall"),
    ("OoXoXoXo", "wall_end"),
    ("XoXoXoXo", "pillar"),
    ("OcOoOoOo", "inner_corner"),
    ("OcOcOoOo", "inner_corner_adjacent"),
    ("OcOoOcOo", "inner_corner_opposite"),
    ("OcOcOcOo", "inner_corner_triple"),
    ("OcOcOcOc", "inner_corner_cross"),
    ("OcOoOoXo", "face_inner_corner_left"),
    ("OcOoXoOo", "face_inner_corner_right"),
    ("OcOcOoXo", "face_inner_corner_pair"),
    ("OcOoXoXo", "outer_corner_inner_corner"),
];

/// Ordered list of wall pieces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for WallCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WallCatalog {
    /// Build a catalog from entries in lookup order
    pub const fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The standard arena wall set covering every reachable neighbourhood
    pub fn builtin() -> Self {
        let entries = BUILTIN_PIECES
            .iter()
            .filter_map(|&(text, name)| match text.parse() {
                Ok(signature) => Some(CatalogEntry {
                    signature,
                    name: name.to_string(),
                }),
                Err(error) => {
                    error!("Built-in piece {name} dropped: {error}");
                    None
                }
            })
            .collect();
        Self { entries }
    }

    /// Parse a catalog from its text form
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::LevelFormat`] naming the offending line when a
    /// line lacks a name, or [`ArenaError::InvalidSignature`] when a
    /// signature is malformed.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(signature), Some(name)) = (fields.next(), fields.next()) else {
                return Err(level_format(index + 1, &"expected '<signature> <name>'"));
            };
            entries.push(CatalogEntry {
                signature: signature.parse()?,
                name: name.to_string(),
            });
        }
        Ok(Self { entries })
    }

    /// Read and parse a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ArenaError::FileSystem {
            path: path.to_path_buf(),
            operation: "read catalog",
            source,
        })?;
        Self::parse(&text).with_path(path)
    }

    /// Render the catalog in its text form
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} {}\n", entry.signature, entry.name))
            .collect()
    }

    /// Entries in lookup order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of wall pieces
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no wall pieces
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a piece identifier (`None` for the floor or unknown ids)
    pub fn entry(&self, piece: PieceId) -> Option<&CatalogEntry> {
        piece
            .0
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }

    /// Iterate entries with their piece identifiers
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &CatalogEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (PieceId(index + 1), entry))
    }

    /// Reachable signatures that no rotation of any entry covers
    pub fn missing_signatures(&self) -> Vec<Signature> {
        let covered: BTreeSet<Signature> = self
            .entries
            .iter()
            .flat_map(|entry| (0..4).map(|quarter_turns| entry.signature.rotated(quarter_turns)))
            .collect();

        Signature::reachable()
            .into_iter()
            .filter(|signature| !covered.contains(signature))
            .collect()
    }

    /// Check that every reachable neighbourhood resolves to a piece
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::IncompleteCatalog`] listing the uncovered signatures
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_signatures();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ArenaError::IncompleteCatalog {
                missing: missing.iter().map(ToString::to_string).collect(),
            })
        }
    }
}
