//! Arena constants and runtime configuration defaults

// Arena dimensions
/// Side length of a freshly created editor arena
pub const DEFAULT_ARENA_SIZE: usize = 29;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed arena dimension
pub const MAX_ARENA_DIMENSION: usize = 10_000;

// Proximity tolerances used by collaborators of the passability query
/// Physical radius of a tank
pub const TANK_PROXIMITY_TOLERANCE: f64 = 0.6;
/// Projectiles are treated as points
pub const PROJECTILE_TOLERANCE: f64 = 0.0;

// AI sensing probes
/// Clearance kept from obstacles while measuring walkable distance
pub const SENSOR_TOLERANCE: f64 = 1.0;
/// Distance advanced per probe step
pub const SENSOR_STEP: f64 = 0.1;
/// Furthest distance a walkable-distance probe travels
pub const MAX_SENSOR_DISTANCE: f64 = 100.0;

// Level file encoding
/// Extension of level files
pub const LEVEL_EXTENSION: &str = "txt";
/// Wall cell in the walls section
pub const WALL_GLYPH: char = 'X';
/// Wired cell in the wiring section
pub const WIRE_GLYPH: char = 'W';
/// Open or unwired cell
pub const BLANK_GLYPH: char = ' ';

// Progress bar display settings
/// Threshold for switching to a single batch progress bar
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to preview image filenames
pub const PREVIEW_SUFFIX: &str = "_preview";
