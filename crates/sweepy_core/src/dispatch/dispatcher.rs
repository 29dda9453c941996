use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::archive::{ARCHIVE_FILE, REPORT_FILE, SweepArchive};
use super::report::RunReport;
use super::store::{FsStore, Store, sanitize_filename};
use super::visual::{Heatmap, LinePlot, RenderTarget, Renderer, VisualPlan};
use crate::error::{Result, SweepError};
use crate::sweep::{Destination, ResultTensor, SweepOutcome};

/// What the dispatcher did with a finished sweep
#[derive(Debug, Clone)]
pub enum Delivery {
    /// Tensors handed back to the caller (after display, if requested)
    Returned(SweepOutcome),
    /// Everything was written under this location
    Persisted(PathBuf),
}

impl Delivery {
    pub fn outcome(&self) -> Option<&SweepOutcome> {
        match self {
            Delivery::Returned(outcome) => Some(outcome),
            Delivery::Persisted(_) => None,
        }
    }

    pub fn into_outcome(self) -> Option<SweepOutcome> {
        match self {
            Delivery::Returned(outcome) => Some(outcome),
            Delivery::Persisted(_) => None,
        }
    }
}

/// Routes finished tensors to their destination, rendering on the way when a
/// renderer is attached.
pub struct Dispatcher<'r, S = FsStore> {
    store: S,
    renderer: Option<&'r mut dyn Renderer>,
}

impl Default for Dispatcher<'_, FsStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Dispatcher<'r, FsStore> {
    pub fn new() -> Self {
        Self::with_store(FsStore)
    }
}

impl<'r, S: Store> Dispatcher<'r, S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            renderer: None,
        }
    }

    /// Attach a renderer. Without one, the graphing step is skipped.
    #[must_use]
    pub fn with_renderer(mut self, renderer: &'r mut dyn Renderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Check the destination before any model is invoked.
    ///
    /// A missing persist location is created only when the destination allows
    /// it; otherwise this fails with [`SweepError::LocationMissing`].
    pub fn prepare(&self, destination: &Destination) -> Result<()> {
        let Destination::Persist {
            location,
            create_if_missing,
            ..
        } = destination
        else {
            return Ok(());
        };

        if self.store.exists(location) {
            return Ok(());
        }
        if !create_if_missing {
            return Err(SweepError::LocationMissing(location.clone()));
        }
        self.store.create(location)?;
        info!(location = %location.display(), "created output location");
        Ok(())
    }

    pub fn deliver(&mut self, outcome: SweepOutcome, destination: &Destination) -> Result<Delivery> {
        match destination {
            Destination::Return => Ok(Delivery::Returned(outcome)),
            Destination::Display => {
                self.render_all(&outcome, |_, _| Ok(RenderTarget::Display))?;
                Ok(Delivery::Returned(outcome))
            }
            Destination::Persist {
                location,
                file_type,
                ..
            } => {
                self.prepare(destination)?;
                self.persist(&outcome, location, file_type)?;
                Ok(Delivery::Persisted(location.clone()))
            }
        }
    }

    fn persist(&mut self, outcome: &SweepOutcome, location: &Path, file_type: &str) -> Result<()> {
        let report = RunReport::from_outcome(outcome).to_string();
        self.store.write_text(location, REPORT_FILE, &report)?;
        self.store
            .write_blob(location, ARCHIVE_FILE, &SweepArchive::from_outcome(outcome))?;

        let mut areas = Vec::with_capacity(outcome.tensors.len());
        for tensor in &outcome.tensors {
            areas.push(self.store.create_area(location, &tensor.name)?);
        }

        self.render_all(outcome, |index, stem| {
            let file = format!("{}.{file_type}", sanitize_filename(stem));
            Ok(RenderTarget::File(areas[index].join(file)))
        })?;

        info!(
            location = %location.display(),
            outputs = outcome.tensors.len(),
            "sweep results persisted"
        );
        Ok(())
    }

    /// Draw every tensor according to the outcome's visual plan.
    ///
    /// `target` maps (tensor index, file stem) to where the rendering goes.
    fn render_all<F>(&mut self, outcome: &SweepOutcome, mut target: F) -> Result<()>
    where
        F: FnMut(usize, &str) -> Result<RenderTarget>,
    {
        let Some(renderer) = self.renderer.as_deref_mut() else {
            return Ok(());
        };
        if outcome.visuals.is_suppressed() {
            return Ok(());
        }

        for (index, tensor) in outcome.tensors.iter().enumerate() {
            match outcome.visuals {
                VisualPlan::Line => {
                    let stem = outcome.grid.name(0);
                    render_line(renderer, outcome, tensor, &target(index, stem)?)?;
                }
                VisualPlan::Heatmap => {
                    let stem = outcome.grid.name(0);
                    let map = heatmap(outcome, tensor, &[0, 0], tensor.name.clone())?;
                    renderer.heatmap(&map, &target(index, stem)?)?;
                }
                VisualPlan::HeatmapSlices { count } => {
                    let third = outcome.grid.name(2);
                    for (k, value) in outcome.grid.values(2).iter().take(count).enumerate() {
                        let title = format!("{} ({third} = {value})", tensor.name);
                        let map = heatmap(outcome, tensor, &[0, 0, k], title)?;
                        let stem = format!("{third}_{value}");
                        renderer.heatmap(&map, &target(index, &stem)?)?;
                    }
                }
                VisualPlan::Suppressed { .. } => {}
            }
            debug!(output = %tensor.name, "rendered output");
        }
        Ok(())
    }
}

fn render_line(
    renderer: &mut dyn Renderer,
    outcome: &SweepOutcome,
    tensor: &ResultTensor,
    target: &RenderTarget,
) -> Result<()> {
    let y_values = tensor
        .values
        .slice_1d(0, &[0])
        .ok_or_else(|| SweepError::Render(format!("cannot slice output '{}'", tensor.name)))?;
    let plot = LinePlot {
        x_values: outcome.grid.values(0),
        y_values: &y_values,
        x_label: outcome.grid.name(0),
        y_label: &tensor.name,
    };
    renderer.line_plot(&plot, target)
}

/// The plane over the first two parameters with the rest held at `fixed`
fn heatmap<'a>(
    outcome: &'a SweepOutcome,
    tensor: &ResultTensor,
    fixed: &[usize],
    title: String,
) -> Result<Heatmap<'a>> {
    let (values, x_count, y_count) = tensor
        .values
        .slice_2d(0, 1, fixed)
        .ok_or_else(|| SweepError::Render(format!("cannot slice output '{}'", tensor.name)))?;
    let specs = outcome.specs();
    Ok(Heatmap {
        values,
        x_count,
        y_count,
        x_range: (specs[0].low, specs[0].high),
        y_range: (specs[1].low, specs[1].high),
        x_label: &specs[0].name,
        y_label: &specs[1].name,
        title,
    })
}
