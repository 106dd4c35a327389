//! Command-line interface for inspecting arena levels and wall catalogs

use crate::arena::Arena;
use crate::autotile::catalog::{PieceId, WallCatalog};
use crate::autotile::selector::PieceTable;
use crate::io::configuration::{LEVEL_EXTENSION, PREVIEW_SUFFIX, TANK_PROXIMITY_TOLERANCE};
use crate::io::error::{ArenaError, Result, invalid_parameter};
use crate::io::level::LevelDefinition;
use crate::io::preview::export_preview_png;
use crate::io::progress::{PreviewStage, ProgressManager};
use crate::query::probe::walkable_distance;
use crate::spatial::grid::Direction;
use crate::spatial::tile::BlockingMode;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "arenagrid")]
#[command(
    author,
    version,
    about = "Inspect tank arena levels, wall catalogs and passability"
)]
/// Command-line arguments for the arena tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Show debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Operations offered by the command-line tool
#[derive(Subcommand)]
pub enum Command {
    /// Print a level's debug map and wall piece summary
    Show {
        /// Level file to inspect
        level: PathBuf,

        /// Wall catalog file (built-in catalog if omitted)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Write PNG previews for a level file or every level in a directory
    Preview {
        /// Level file or directory to process
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        /// Process levels even if a preview already exists
        #[arg(short, long)]
        no_skip: bool,
    },

    /// List a wall catalog and check it covers every reachable neighbourhood
    Catalog {
        /// Catalog file (built-in catalog if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Run a passability query against a level
    Probe {
        /// Level file to query
        level: PathBuf,

        /// Row coordinate
        #[arg(allow_hyphen_values = true)]
        x: f64,

        /// Column coordinate
        #[arg(allow_hyphen_values = true)]
        y: f64,

        /// Proximity tolerance
        #[arg(short, long, default_value_t = TANK_PROXIMITY_TOLERANCE)]
        tolerance: f64,

        /// Query with the projectile predicate instead of the tank one
        #[arg(short, long)]
        bullet: bool,
    },
}

impl Cli {
    /// Most verbose tracing level the subscriber should emit
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Run the selected command, writing reports to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if a level or catalog cannot be read, a catalog is
    /// incomplete, a preview cannot be written, or `out` rejects output
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        match &self.command {
            Command::Show { level, catalog } => show(level, catalog.as_deref(), out),
            Command::Preview { target, no_skip } => {
                let mut processor =
                    FileProcessor::new(target.clone(), !no_skip, self.should_show_progress());
                let written = processor.process()?;
                info!(written, "previews written");
                Ok(())
            }
            Command::Catalog { file } => list_catalog(file.as_deref(), out),
            Command::Probe {
                level,
                x,
                y,
                tolerance,
                bullet,
            } => {
                let mode = if *bullet {
                    BlockingMode::Bullet
                } else {
                    BlockingMode::Entity
                };
                probe(level, [*x, *y], *tolerance, mode, out)
            }
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<WallCatalog> {
    path.map_or_else(|| Ok(WallCatalog::builtin()), WallCatalog::from_file)
}

fn report(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{text}").map_err(|source| ArenaError::FileSystem {
        path: PathBuf::from("<output>"),
        operation: "write report",
        source,
    })
}

fn show(level_path: &Path, catalog_path: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let level = LevelDefinition::load(level_path)?;
    let arena = Arena::new(&level, PieceTable::build(&catalog))?;
    let (rows, cols) = arena.dimensions();

    report(out, &format!("{} ({rows} x {cols})", level.name))?;
    report(out, &arena.grid().to_string())?;

    let mut counts: BTreeMap<PieceId, usize> = BTreeMap::new();
    let mut unmatched = 0_usize;
    for cell in arena.grid().cells() {
        if !arena.tile(cell).is_some_and(|tile| tile.closed) {
            continue;
        }
        match arena.placement(cell) {
            Some(placement) => *counts.entry(placement.piece).or_default() += 1,
            None => unmatched += 1,
        }
    }

    for (piece, count) in &counts {
        let name = catalog
            .entry(*piece)
            .map_or("unknown", |entry| entry.name.as_str());
        report(out, &format!("{piece} {name}: {count}"))?;
    }
    if unmatched > 0 {
        report(out, &format!("unmatched wall cells: {unmatched}"))?;
    }
    Ok(())
}

fn list_catalog(path: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let catalog = load_catalog(path)?;
    for (piece, entry) in catalog.pieces() {
        report(out, &format!("{piece} {} {}", entry.signature, entry.name))?;
    }
    catalog.validate()?;
    report(
        out,
        &format!(
            "{} pieces cover all reachable signatures",
            catalog.len()
        ),
    )
}

fn probe(
    level_path: &Path,
    position: [f64; 2],
    tolerance: f64,
    mode: BlockingMode,
    out: &mut impl Write,
) -> Result<()> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(invalid_parameter(
            "tolerance",
            &tolerance,
            &"must be a finite non-negative number",
        ));
    }
    let level = LevelDefinition::load(level_path)?;
    let arena = Arena::with_builtin_catalog(&level)?;

    let verdict = if arena.blocked(position, tolerance, mode) {
        "blocked"
    } else {
        "clear"
    };
    report(
        out,
        &format!(
            "({}, {}) {mode:?} tolerance {tolerance}: {verdict}",
            position[0], position[1]
        ),
    )?;

    for direction in [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ] {
        let [dx, dy] = direction.offset();
        let distance = walkable_distance(arena.grid(), position, [dx as f64, dy as f64]);
        report(out, &format!("walkable {direction:?}: {distance:.1}"))?;
    }
    Ok(())
}

/// Orchestrates batch preview rendering with progress tracking
pub struct FileProcessor {
    target: PathBuf,
    skip_existing: bool,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor for a level file or directory
    pub fn new(target: PathBuf, skip_existing: bool, show_progress: bool) -> Self {
        let progress_manager = show_progress.then(ProgressManager::new);

        Self {
            target,
            skip_existing,
            progress_manager,
        }
    }

    /// Render previews for every selected level, returning how many were written
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<usize> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(0);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(files.len())
    }

    /// Preview path written for a level file
    pub fn output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{PREVIEW_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.target.is_file() {
            if is_level_file(&self.target) {
                if self.should_process_file(&self.target) {
                    Ok(vec![self.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.target.display(),
                    &format!("must be a .{LEVEL_EXTENSION} level file"),
                ))
            }
        } else if self.target.is_dir() {
            let entries = std::fs::read_dir(&self.target).map_err(|source| {
                ArenaError::FileSystem {
                    path: self.target.clone(),
                    operation: "list directory",
                    source,
                }
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_level_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.target.display(),
                &"must be a level file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.skip_existing {
            return true;
        }

        if Self::output_path(input_path).exists() {
            info!(level = %input_path.display(), "skipping, preview exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }
        let level = LevelDefinition::load(input_path)?;

        self.enter_stage(index, PreviewStage::Autotile);
        let arena = Arena::with_builtin_catalog(&level)?;

        self.enter_stage(index, PreviewStage::Render);
        export_preview_png(arena.grid(), &Self::output_path(input_path))?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }
        Ok(())
    }

    fn enter_stage(&mut self, index: usize, stage: PreviewStage) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.enter_stage(index, stage);
        }
    }
}

fn is_level_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(LEVEL_EXTENSION)
}
