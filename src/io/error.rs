//! Error types and context management for arena operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::spatial::grid::Cell;
use crate::spatial::tile::SurfaceObject;

/// Main error type for all arena operations
#[derive(Debug)]
pub enum ArenaError {
    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Level or catalog text could not be decoded
    LevelFormat {
        /// File the text came from, when known
        path: Option<PathBuf>,
        /// One-based line number of the offending line
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// Cell coordinates lie outside the grid
    OutOfBounds {
        /// Requested cell
        position: Cell,
        /// Grid dimensions (rows, cols)
        dimensions: (usize, usize),
    },

    /// Border cells cannot be edited
    EdgeLocked {
        /// Requested cell
        position: Cell,
    },

    /// A cell cannot be closed while it holds a surface object
    SurfaceOccupied {
        /// Requested cell
        position: Cell,
        /// Object currently on the cell
        surface: SurfaceObject,
    },

    /// Surface objects cannot be placed on a wall
    WallOccupied {
        /// Requested cell
        position: Cell,
        /// Object that was to be placed
        surface: SurfaceObject,
    },

    /// Autotile signature text is malformed or describes an impossible neighbourhood
    InvalidSignature {
        /// Offending signature text
        signature: String,
        /// Explanation of why the signature was rejected
        reason: String,
    },

    /// Wall catalog leaves some reachable neighbourhoods without a piece
    IncompleteCatalog {
        /// Uncovered signatures
        missing: Vec<String>,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::LevelFormat { path, line, reason } => match path {
                Some(path) => write!(f, "Malformed '{}' at line {line}: {reason}", path.display()),
                None => write!(f, "Malformed input at line {line}: {reason}"),
            },
            Self::OutOfBounds {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Cell ({}, {}) is outside the {}x{} grid",
                    position[0], position[1], dimensions.0, dimensions.1
                )
            }
            Self::EdgeLocked { position } => {
                write!(
                    f,
                    "Cell ({}, {}) lies on the arena border and cannot be edited",
                    position[0], position[1]
                )
            }
            Self::SurfaceOccupied { position, surface } => {
                write!(
                    f,
                    "Cell ({}, {}) holds {surface:?} and cannot be walled",
                    position[0], position[1]
                )
            }
            Self::WallOccupied { position, surface } => {
                write!(
                    f,
                    "Cannot place {surface:?} on wall cell ({}, {})",
                    position[0], position[1]
                )
            }
            Self::InvalidSignature { signature, reason } => {
                write!(f, "Invalid signature '{signature}': {reason}")
            }
            Self::IncompleteCatalog { missing } => {
                write!(
                    f,
                    "Wall catalog misses {} signature(s): {}",
                    missing.len(),
                    missing.join(", ")
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ArenaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for arena results
pub type Result<T> = std::result::Result<T, ArenaError>;

/// Attaches the originating file to errors raised while decoding its text
pub trait WithContext<T> {
    /// Record the file an error relates to
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<ArenaError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only file-backed errors carry a path
            match &mut error {
                ArenaError::LevelFormat { path: slot, .. } => {
                    *slot = Some(path.to_path_buf());
                }
                ArenaError::FileSystem { path: slot, .. } => {
                    *slot = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<std::io::Error> for ArenaError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ArenaError {
    ArenaError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a format error for a line of text not yet tied to a file
pub fn level_format(line: usize, reason: &impl ToString) -> ArenaError {
    ArenaError::LevelFormat {
        path: None,
        line,
        reason: reason.to_string(),
    }
}
