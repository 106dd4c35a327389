//! Wall autotiling: choosing a mesh and orientation for every wall cell
//!
//! The choice depends only on which of the eight neighbours are walls, so
//! it is expressed as a pure function of the neighbourhood.

/// Named wall pieces and catalog validation
pub mod catalog;
/// Neighbourhood masks and edge/corner signatures
pub mod signature;
/// Precomputed lookup and per-cell selection
pub mod selector;

pub use catalog::{CatalogEntry, PieceId, WallCatalog};
pub use selector::{PieceSelection, PieceTable, Placement, Rotation, select_piece};
pub use signature::{ClosureMask, Signature};
