//! Input/output operations, configuration and error handling

/// Command-line interface and batch preview processing
pub mod cli;
/// Compile-time constants
pub mod configuration;
/// Crate error type and context helpers
pub mod error;
/// Level definitions and their text encoding
pub mod level;
/// Level preview images
pub mod preview;
/// Progress display for batch operations
pub mod progress;
