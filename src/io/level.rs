//! Level definitions and their text encoding
//!
//! A level file starts with a `"<height> x <width>"` header followed by
//! three sections of `height` lines each, separated by blank lines:
//!
//! - walls: `X` for a wall, space for open floor
//! - surface objects: one code character per cell (see [`decode_surface`])
//! - wiring: `W` for a wired cell, space otherwise
//!
//! Lines shorter than the width are padded with open, empty, unwired cells.

use std::fmt;
use std::path::Path;

use ndarray::Array2;
use tracing::warn;

use crate::io::configuration::{BLANK_GLYPH, WALL_GLYPH, WIRE_GLYPH};
use crate::io::error::{ArenaError, Result, WithContext, invalid_parameter, level_format};
use crate::spatial::grid::validate_dimensions;
use crate::spatial::tile::{OpponentColour, SurfaceObject, Tile};

/// Surface codes for opponent spawns, in [`OpponentColour::ALL`] order
const OPPONENT_CODES: [char; 6] = ['7', '8', '9', 'A', 'B', 'C'];

/// Level code for a surface object
pub fn encode_surface(surface: SurfaceObject) -> char {
    match surface {
        SurfaceObject::None => '0',
        SurfaceObject::Crate => '1',
        SurfaceObject::RedBarrel => '2',
        SurfaceObject::PlayerSpawn => '3',
        SurfaceObject::PowerUp => '6',
        SurfaceObject::OpponentSpawn(colour) => OpponentColour::ALL
            .iter()
            .zip(OPPONENT_CODES)
            .find_map(|(candidate, code)| (*candidate == colour).then_some(code))
            .unwrap_or('0'),
    }
}

/// Surface object for a level code, or `None` when the code is unknown
///
/// Codes `3`, `4` and `5` are the three player spawn slots and all decode
/// to [`SurfaceObject::PlayerSpawn`]. A blank cell decodes as bare floor.
pub fn decode_surface(code: char) -> Option<SurfaceObject> {
    match code {
        '0' | BLANK_GLYPH => Some(SurfaceObject::None),
        '1' => Some(SurfaceObject::Crate),
        '2' => Some(SurfaceObject::RedBarrel),
        '3' | '4' | '5' => Some(SurfaceObject::PlayerSpawn),
        '6' => Some(SurfaceObject::PowerUp),
        _ => OPPONENT_CODES
            .iter()
            .zip(OpponentColour::ALL)
            .find_map(|(candidate, colour)| {
                (*candidate == code).then_some(SurfaceObject::OpponentSpawn(colour))
            }),
    }
}

/// Initial tile state of an arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    /// Display name of the level
    pub name: String,
    /// Tile states addressed by `[x, y]`
    pub tiles: Array2<Tile>,
}

impl LevelDefinition {
    /// Wrap an array of tiles as a named level
    pub fn new(name: impl Into<String>, tiles: Array2<Tile>) -> Self {
        Self {
            name: name.into(),
            tiles,
        }
    }

    /// Open arena enclosed by a one-cell wall border
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or too large
    pub fn empty(name: impl Into<String>, rows: usize, cols: usize) -> Result<Self> {
        validate_dimensions(rows, cols)?;
        let tiles = Array2::from_shape_fn((rows, cols), |(x, y)| {
            if x == 0 || y == 0 || x + 1 == rows || y + 1 == cols {
                Tile::WALL
            } else {
                Tile::OPEN
            }
        });
        Ok(Self::new(name, tiles))
    }

    /// Build a level from an ASCII map drawn with debug glyphs
    ///
    /// Each line is one row. Leading and trailing blank lines are ignored and
    /// short rows are padded with open floor.
    ///
    /// # Errors
    ///
    /// Returns an error if the sketch is empty or contains an unknown glyph
    pub fn from_sketch(name: impl Into<String>, sketch: &str) -> Result<Self> {
        let lines: Vec<&str> = sketch.lines().collect();
        let first = lines.iter().position(|line| !line.trim().is_empty());
        let last = lines.iter().rposition(|line| !line.trim().is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            return Err(invalid_parameter("sketch", &"", &"contains no rows"));
        };
        let rows = lines.get(first..=last).unwrap_or_default();

        let height = rows.len();
        let width = rows
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        validate_dimensions(height, width)?;

        let mut tiles = Array2::from_elem((height, width), Tile::OPEN);
        for (x, line) in rows.iter().enumerate() {
            for (y, glyph) in line.chars().enumerate() {
                let tile = Tile::from_debug_glyph(glyph).ok_or_else(|| {
                    level_format(first + x + 1, &format!("unknown glyph '{glyph}' at column {y}"))
                })?;
                if let Some(slot) = tiles.get_mut([x, y]) {
                    *slot = tile;
                }
            }
        }
        Ok(Self::new(name, tiles))
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.tiles.dim()
    }

    /// Decode a level from its text form
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::LevelFormat`] when the header is malformed, a
    /// section is truncated, a separator line is not blank, a row is too
    /// long, or a wall carries a surface object. Unknown surface codes are
    /// decoded as bare floor with a warning.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut reader = SectionReader::new(text);

        let (number, header) = reader.next_line("header")?;
        let (rows, cols) = parse_header(header).ok_or_else(|| {
            level_format(number, &format!("expected '<height> x <width>', found '{header}'"))
        })?;
        validate_dimensions(rows, cols)?;

        let mut tiles = Array2::from_elem((rows, cols), Tile::OPEN);

        for x in 0..rows {
            let (_, cells) = reader.row("walls", cols)?;
            for (y, glyph) in cells.enumerate() {
                if let Some(tile) = tiles.get_mut([x, y]) {
                    tile.closed = glyph == WALL_GLYPH;
                }
            }
        }
        reader.separator()?;

        for x in 0..rows {
            let (number, cells) = reader.row("surface objects", cols)?;
            for (y, code) in cells.enumerate() {
                let surface = decode_surface(code).unwrap_or_else(|| {
                    warn!(line = number, column = y, %code, "unknown surface code");
                    SurfaceObject::None
                });
                let Some(tile) = tiles.get_mut([x, y]) else {
                    continue;
                };
                if tile.closed && surface != SurfaceObject::None {
                    return Err(level_format(
                        number,
                        &format!("surface object {surface:?} on wall at column {y}"),
                    ));
                }
                tile.surface_object = surface;
            }
        }
        reader.separator()?;

        for x in 0..rows {
            let (_, cells) = reader.row("wiring", cols)?;
            for (y, glyph) in cells.enumerate() {
                if let Some(tile) = tiles.get_mut([x, y]) {
                    tile.wired = glyph == WIRE_GLYPH;
                }
            }
        }

        Ok(Self::new(name, tiles))
    }

    /// Encode the level in its text form
    pub fn to_text(&self) -> String {
        let (rows, cols) = self.dimensions();
        let walls = encode_section(&self.tiles, |tile| {
            if tile.closed { WALL_GLYPH } else { BLANK_GLYPH }
        });
        let surfaces = encode_section(&self.tiles, |tile| encode_surface(tile.surface_object));
        let wiring = encode_section(&self.tiles, |tile| {
            if tile.wired { WIRE_GLYPH } else { BLANK_GLYPH }
        });

        format!("{rows} x {cols}\n{walls}\n{surfaces}\n{wiring}")
    }

    /// Read a level file, naming the level after the file stem
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to decode
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ArenaError::FileSystem {
            path: path.to_path_buf(),
            operation: "read level",
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(name, &text).with_path(path)
    }

    /// Write the level to a file in its text form
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text()).map_err(|source| ArenaError::FileSystem {
            path: path.to_path_buf(),
            operation: "write level",
            source,
        })
    }
}

impl fmt::Display for LevelDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                write!(f, "{tile}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn encode_section(tiles: &Array2<Tile>, glyph: impl Fn(&Tile) -> char) -> String {
    let (rows, cols) = tiles.dim();
    let mut text = String::with_capacity(rows * (cols + 1));
    for row in tiles.rows() {
        text.extend(row.iter().map(&glyph));
        text.push('\n');
    }
    text
}

fn parse_header(header: &str) -> Option<(usize, usize)> {
    let (rows, cols) = header.split_once('x')?;
    Some((rows.trim().parse().ok()?, cols.trim().parse().ok()?))
}

/// Line cursor over level text with one-based line numbers
struct SectionReader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    last_line: usize,
}

impl<'a> SectionReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            last_line: 0,
        }
    }

    fn next_line(&mut self, section: &str) -> Result<(usize, &'a str)> {
        match self.lines.next() {
            Some((index, line)) => {
                self.last_line = index + 1;
                Ok((index + 1, line))
            }
            None => Err(level_format(
                self.last_line + 1,
                &format!("unexpected end of input in {section}"),
            )),
        }
    }

    fn row(
        &mut self,
        section: &str,
        cols: usize,
    ) -> Result<(usize, impl Iterator<Item = char> + use<'a>)> {
        let (number, line) = self.next_line(section)?;
        if line.chars().skip(cols).any(|glyph| !glyph.is_whitespace()) {
            return Err(level_format(
                number,
                &format!("{section} row is wider than {cols} cells"),
            ));
        }
        Ok((number, line.chars().take(cols)))
    }

    fn separator(&mut self) -> Result<()> {
        let (number, line) = self.next_line("separator")?;
        if line.trim().is_empty() {
            Ok(())
        } else {
            Err(level_format(number, &"expected a blank separator line"))
        }
    }
}
