//! The work behind each CLI subcommand.

use std::path::{Path, PathBuf};

use sweepy_core::dispatch::SweepArchive;
use sweepy_core::grid::ParameterGrid;
use sweepy_core::{
    Delivery, Dispatcher, ModelRegistry, Renderer, ResultTensor, Sweep, SweepOutcome,
    SweepProgress, load_archive,
};
use tracing::info;

use crate::sweep_file::SweepFile;

/// Command-line overrides applied on top of a sweep file
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub reps: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub ensure_dir: bool,
    pub file_type: Option<String>,
    pub graphs: bool,
    pub parallel: bool,
}

impl RunOptions {
    pub fn apply(&self, file: &mut SweepFile) {
        if let Some(reps) = self.reps {
            file.reps = reps;
        }
        if let Some(dir) = &self.output_dir {
            file.output_directory = Some(dir.clone());
        }
        if self.ensure_dir {
            file.ensure_dir = true;
        }
        if let Some(ext) = &self.file_type {
            file.file_type = Some(ext.clone());
        }
    }
}

/// Run the sweep described by `file` against a model from `registry`.
pub fn run_file(
    file: &SweepFile,
    registry: &ModelRegistry,
    options: &RunOptions,
    renderer: Option<&mut dyn Renderer>,
) -> sweepy_core::Result<Delivery> {
    let model = registry.get(&file.model)?;
    let config = file.to_config(options.graphs);

    let mut dispatcher = Dispatcher::new();
    if let Some(renderer) = renderer.filter(|_| options.graphs) {
        dispatcher = dispatcher.with_renderer(renderer);
    }
    dispatcher.prepare(&config.destination)?;

    let progress = SweepProgress::new();
    let mut sweep = Sweep::new(&config).with_progress(&progress);
    let outcome = if options.parallel {
        run_parallel(&mut sweep, model.as_ref())?
    } else {
        sweep.run(model.as_ref())?
    };
    info!(
        invocations = progress.completed(),
        passes = progress.passes(),
        "model invocations complete"
    );

    dispatcher.deliver(outcome, &config.destination)
}

#[cfg(feature = "parallel")]
fn run_parallel(
    sweep: &mut Sweep<'_>,
    model: &(dyn sweepy_core::Model + Send + Sync),
) -> sweepy_core::Result<SweepOutcome> {
    sweep.run_parallel(model)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(
    sweep: &mut Sweep<'_>,
    model: &(dyn sweepy_core::Model + Send + Sync),
) -> sweepy_core::Result<SweepOutcome> {
    tracing::warn!("built without the `parallel` feature; running sequentially");
    sweep.run(model)
}

/// Tab-separated table: one row per grid point, parameter values then outputs
pub fn format_table(grid: &ParameterGrid, tensors: &[ResultTensor]) -> String {
    let mut out = String::new();
    let header: Vec<&str> = grid
        .names()
        .chain(tensors.iter().map(|t| t.name.as_str()))
        .collect();
    out.push_str(&header.join("\t"));
    out.push('\n');

    for (flat, point) in grid.points().enumerate() {
        let mut cells: Vec<String> = point.values.iter().map(|v| v.to_string()).collect();
        cells.extend(tensors.iter().map(|t| match t.values.data().get(flat) {
            Some(v) => v.to_string(),
            None => String::from("-"),
        }));
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

pub fn format_outcome(outcome: &SweepOutcome) -> String {
    format_table(&outcome.grid, &outcome.tensors)
}

/// Summary of a persisted run followed by its table
pub fn format_archive(archive: &SweepArchive) -> sweepy_core::Result<String> {
    let grid = ParameterGrid::new(&archive.parameters)?;
    let mut out = format!(
        "model: {}\nran: {} -> {}\nrepetitions: {}\n",
        archive.model, archive.started_at, archive.finished_at, archive.reps
    );
    for (name, value) in &archive.fixed {
        out.push_str(&format!("fixed {name} = {value}\n"));
    }
    out.push('\n');
    out.push_str(&format_table(&grid, &archive.tensors));
    Ok(out)
}

pub fn show(location: &Path) -> sweepy_core::Result<String> {
    let archive = load_archive(location)?;
    format_archive(&archive)
}
