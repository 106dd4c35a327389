//! Grid topology and spatial queries for a tile-based tank arena
//!
//! An arena is a rectangular lattice of open floor and wall cells, some
//! holding surface objects such as crates or spawn markers. This crate
//! derives the visually continuous wall piece for every wall cell from its
//! eight neighbours (autotiling), keeps those pieces in step with tile edits,
//! and answers "is this continuous point blocked" queries with a proximity
//! tolerance for moving entities.

#![forbid(unsafe_code)]

/// Live arena state and the tile mutation path
pub mod arena;
/// Neighbourhood signatures, wall piece catalogs and piece selection
pub mod autotile;
/// Input/output operations and error handling
pub mod io;
/// Continuous-space passability queries and sensing probes
pub mod query;
/// Tiles, the tile grid and coordinate mapping
pub mod spatial;

pub use arena::{Arena, Brush};
pub use io::error::{ArenaError, Result};
pub use io::level::LevelDefinition;
