//! Visualization policy and the renderer capability.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::ParameterGrid;

/// Most swept dimensions that can be visualized
pub const MAX_VISUAL_DIMS: usize = 3;

/// Most heatmap slices drawn per output for a three-dimensional sweep
pub const MAX_SLICE_GRAPHS: usize = 128;

/// How the reduced tensors of a sweep are drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualPlan {
    /// One swept dimension: a line plot per output
    Line,
    /// Two dimensions: a heatmap per output
    Heatmap,
    /// Three dimensions: one heatmap per value of the third parameter
    HeatmapSlices { count: usize },
    /// Graphing is skipped; the data is still returned or persisted
    Suppressed { reason: String },
}

impl VisualPlan {
    pub fn for_grid(grid: &ParameterGrid) -> Self {
        let shape = grid.shape();
        match shape.len() {
            1 => VisualPlan::Line,
            2 => VisualPlan::Heatmap,
            3 if shape[2] > MAX_SLICE_GRAPHS => VisualPlan::Suppressed {
                reason: format!(
                    "this sweep would create {} graphs per output (limit {MAX_SLICE_GRAPHS})",
                    shape[2]
                ),
            },
            3 => VisualPlan::HeatmapSlices { count: shape[2] },
            n => VisualPlan::Suppressed {
                reason: format!(
                    "cannot make graphical output for {n} sweep parameters (limit {MAX_VISUAL_DIMS})"
                ),
            },
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, VisualPlan::Suppressed { .. })
    }

    /// Render calls made per recorded output
    pub fn renders_per_output(&self) -> usize {
        match self {
            VisualPlan::Line | VisualPlan::Heatmap => 1,
            VisualPlan::HeatmapSlices { count } => *count,
            VisualPlan::Suppressed { .. } => 0,
        }
    }
}

/// Where a rendering goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Show on screen
    Display,
    /// Save to this file
    File(PathBuf),
}

/// A line of tensor values against one parameter's values
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot<'a> {
    pub x_values: &'a [f64],
    pub y_values: &'a [f64],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// A 2-D plane of tensor values.
///
/// `values` is row-major with one row per x value and one column per y value,
/// so `values[ix * y_count + iy]` is the cell at `(x_ix, y_iy)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap<'a> {
    pub values: Vec<f64>,
    pub x_count: usize,
    pub y_count: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub title: String,
}

impl Heatmap<'_> {
    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix >= self.x_count || iy >= self.y_count {
            return None;
        }
        self.values.get(ix * self.y_count + iy).copied()
    }

    /// Smallest and largest finite cell values
    pub fn value_range(&self) -> Option<(f64, f64)> {
        value_range(&self.values)
    }
}

/// Smallest and largest finite values in `values`
pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Draws plots, either on screen or into files
pub trait Renderer {
    fn line_plot(&mut self, plot: &LinePlot<'_>, target: &RenderTarget) -> Result<()>;

    fn heatmap(&mut self, map: &Heatmap<'_>, target: &RenderTarget) -> Result<()>;
}
