//! Spatial data structures for the arena lattice
//!
//! This module contains:
//! - Tile state and passability predicates
//! - The fixed-size tile grid with neighbour lookup
//! - Continuous-to-cell coordinate mapping

/// Fixed-size tile lattice and neighbour directions
pub mod grid;
/// Continuous position resolution against the lattice
pub mod position;
/// Per-cell state and derived predicates
pub mod tile;

pub use grid::{Cell, Direction, TileGrid};
pub use tile::{BlockingMode, OpponentColour, SurfaceObject, Tile};
