//! Per-cell arena state and the passability predicates derived from it
//!
//! A tile is either open floor or a wall. Open tiles may additionally hold a
//! surface object. The wiring flag is carried through level files but has no
//! gameplay effect yet.

use std::fmt;

/// Colour of an AI opponent spawn marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpponentColour {
    /// Yellow opponent
    Yellow,
    /// Green opponent
    Green,
    /// Orange opponent
    Orange,
    /// Rocket-firing opponent
    Rocket,
    /// Navy opponent
    Navy,
    /// Black opponent
    Black,
}

impl OpponentColour {
    /// Every opponent colour in level-code order
    pub const ALL: [Self; 6] = [
        Self::Yellow,
        Self::Green,
        Self::Orange,
        Self::Rocket,
        Self::Navy,
        Self::Black,
    ];
}

/// Object resting on the surface of an open tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceObject {
    /// Bare floor
    #[default]
    None,
    /// Destructible crate
    Crate,
    /// Explosive red barrel
    RedBarrel,
    /// Power-up dispenser
    PowerUp,
    /// Spawn point for a player tank
    PlayerSpawn,
    /// Spawn point for an AI tank of the given colour
    OpponentSpawn(OpponentColour),
}

impl SurfaceObject {
    /// Whether tanks and other entities are stopped by this object
    pub const fn obstructs_movement(self) -> bool {
        matches!(self, Self::Crate | Self::RedBarrel)
    }

    /// Whether this object marks a tank spawn point
    pub const fn is_spawn(self) -> bool {
        matches!(self, Self::PlayerSpawn | Self::OpponentSpawn(_))
    }
}

/// Which per-tile predicate a passability query reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockingMode {
    /// Tanks and other moving entities: walls, crates and barrels block
    Entity,
    /// Bullets and rockets: only walls block
    Bullet,
}

impl BlockingMode {
    /// Evaluate the predicate for this mode against a tile
    pub const fn blocks(self, tile: &Tile) -> bool {
        match self {
            Self::Entity => tile.impassable(),
            Self::Bullet => tile.bullet_impassable(),
        }
    }
}

/// Logical state of one arena cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
    /// Wall flag
    pub closed: bool,
    /// Wiring flag, retained for level compatibility
    pub wired: bool,
    /// Object on the tile surface (always `None` for walls)
    pub surface_object: SurfaceObject,
}

impl Tile {
    /// An open floor tile with nothing on it
    pub const OPEN: Self = Self {
        closed: false,
        wired: false,
        surface_object: SurfaceObject::None,
    };

    /// A wall tile
    pub const WALL: Self = Self {
        closed: true,
        wired: false,
        surface_object: SurfaceObject::None,
    };

    /// An open tile holding the given surface object
    pub const fn with_surface(surface_object: SurfaceObject) -> Self {
        Self {
            closed: false,
            wired: false,
            surface_object,
        }
    }

    /// Whether the tile blocks tank movement
    pub const fn impassable(&self) -> bool {
        self.closed || self.surface_object.obstructs_movement()
    }

    /// Whether the tile stops projectiles
    ///
    /// Crates and barrels react to bullet hits on their own and do not
    /// stop the projectile through this predicate.
    pub const fn bullet_impassable(&self) -> bool {
        self.closed
    }

    /// Whether the wall/surface invariant holds for this tile
    pub const fn is_consistent(&self) -> bool {
        !self.closed || matches!(self.surface_object, SurfaceObject::None)
    }

    /// Single-character glyph used by debug maps and level sketches
    pub const fn debug_glyph(&self) -> char {
        if self.closed {
            return 'X';
        }
        match self.surface_object {
            SurfaceObject::None => ' ',
            SurfaceObject::Crate => 'c',
            SurfaceObject::RedBarrel => 'b',
            SurfaceObject::PowerUp => 'p',
            SurfaceObject::PlayerSpawn | SurfaceObject::OpponentSpawn(_) => 'T',
        }
    }

    /// Parse a debug glyph back into a tile
    ///
    /// `T` maps to a player spawn and `.` is accepted as open floor.
    pub const fn from_debug_glyph(glyph: char) -> Option<Self> {
        match glyph {
            'X' => Some(Self::WALL),
            ' ' | '.' => Some(Self::OPEN),
            'c' => Some(Self::with_surface(SurfaceObject::Crate)),
            'b' => Some(Self::with_surface(SurfaceObject::RedBarrel)),
            'p' => Some(Self::with_surface(SurfaceObject::PowerUp)),
            'T' => Some(Self::with_surface(SurfaceObject::PlayerSpawn)),
            _ => None,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.debug_glyph())
    }
}
