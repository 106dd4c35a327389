//! Continuous-space queries against the tile grid

/// Point passability with proximity tolerance
pub mod passability;
/// Sensor rays and axis-separated movement
pub mod probe;

pub use passability::{blocked, bullet_impassable, impassable};
