/// Bit-per-cell set for tracking refreshed cells
pub mod cells;
/// Cached per-cell visual configuration
pub mod proxy;
/// Arena ownership and the tile mutation path
pub mod state;

pub use state::{Arena, Brush};
