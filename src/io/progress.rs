//! Stage bars for preview batches
//!
//! Small batches get one bar per level that lives from `start_file` until
//! `complete_file`. Past [`MAX_INDIVIDUAL_PROGRESS_BARS`] levels a single
//! counter bar tracks the batch and one shared bar shows the level in flight.

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Stages a level passes through while its preview is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreviewStage {
    /// Reading and decoding the level file
    Load,
    /// Building the arena and selecting wall pieces
    Autotile,
    /// Rendering and writing the PNG
    Render,
}

impl PreviewStage {
    /// Number of stages per file
    pub const COUNT: usize = 3;

    /// Stages completed once this stage starts
    pub const fn completed(self) -> usize {
        match self {
            Self::Load => 0,
            Self::Autotile => 1,
            Self::Render => 2,
        }
    }

    /// Short label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Autotile => "autotile",
            Self::Render => "render",
        }
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg:>8} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Levels: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

fn stage_bar() -> ProgressBar {
    let bar = ProgressBar::new(PreviewStage::COUNT as u64);
    bar.set_style(STAGE_STYLE.clone());
    bar
}

/// Display for a large batch: level counter plus the level in flight
struct BatchDisplay {
    levels: ProgressBar,
    current: ProgressBar,
    index: Option<usize>,
}

/// Drives the progress display of one preview run
#[derive(Default)]
pub struct ProgressManager {
    multi_progress: MultiProgress,
    file_count: usize,
    batch: Option<BatchDisplay>,
    /// Bars of levels started but not yet completed, by batch index
    active: BTreeMap<usize, ProgressBar>,
}

impl ProgressManager {
    /// Create a manager with nothing to show yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the display for a batch of `file_count` levels
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;
        if file_count <= MAX_INDIVIDUAL_PROGRESS_BARS {
            return;
        }

        let levels = ProgressBar::new(file_count as u64);
        levels.set_style(BATCH_STYLE.clone());
        self.batch = Some(BatchDisplay {
            levels: self.multi_progress.add(levels),
            current: self.multi_progress.add(stage_bar()),
            index: None,
        });
    }

    /// Number of files the manager was initialized for
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Show a level entering its load stage
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let bar = if let Some(batch) = self.batch.as_mut() {
            batch.index = Some(index);
            batch.current.clone()
        } else {
            if self.active.len() >= MAX_INDIVIDUAL_PROGRESS_BARS {
                return;
            }
            let bar = self.multi_progress.add(stage_bar());
            self.active.insert(index, bar.clone());
            bar
        };

        bar.set_prefix(name);
        Self::show_stage(&bar, PreviewStage::Load);
    }

    /// Report that a file has entered a new stage
    pub fn enter_stage(&mut self, index: usize, stage: PreviewStage) {
        if let Some(bar) = self.bar_for(index) {
            Self::show_stage(bar, stage);
        }
    }

    /// Retire a level's bar and count it against the batch
    pub fn complete_file(&mut self, index: usize) {
        if let Some(bar) = self.active.remove(&index) {
            bar.finish_and_clear();
            self.multi_progress.remove(&bar);
        }
        if let Some(batch) = self.batch.as_mut() {
            batch.levels.inc(1);
            if batch.index == Some(index) {
                batch.index = None;
                batch.current.reset();
                batch.current.set_message("");
                batch.current.set_prefix("");
            }
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for bar in self.active.values() {
            bar.finish_and_clear();
        }
        if let Some(batch) = self.batch.as_ref() {
            batch.current.finish_and_clear();
            batch.levels.finish_with_message("All levels processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn bar_for(&self, index: usize) -> Option<&ProgressBar> {
        match self.batch.as_ref() {
            Some(batch) => (batch.index == Some(index)).then_some(&batch.current),
            None => self.active.get(&index),
        }
    }

    fn show_stage(bar: &ProgressBar, stage: PreviewStage) {
        bar.set_position(stage.completed() as u64);
        bar.set_message(stage.label());
    }
}
