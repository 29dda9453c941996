//! Scenario tests for the sweep engine
//!
//! Tests are organized by topic:
//! - `functions` - Function models, output selection and naming
//! - `objects` - Object models with a run step and stochastic internals
//! - `rendering` - Visual plan and renderer call counts
//! - `persistence` - Persisted layout, run report and archive reload

mod objects;
mod persistence;

use std::fs;

use crate::dispatch::{Heatmap, LinePlot, RenderTarget, Renderer};
use crate::error::Result;

/// One renderer call
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Rendered {
    Line {
        x_label: String,
        y_label: String,
        points: usize,
        target: RenderTarget,
    },
    Heatmap {
        title: String,
        shape: (usize, usize),
        target: RenderTarget,
    },
}

impl Rendered {
    pub(crate) fn target(&self) -> &RenderTarget {
        match self {
            Rendered::Line { target, .. } | Rendered::Heatmap { target, .. } => target,
        }
    }
}

/// Renderer that records every call and touches file targets
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub calls: Vec<Rendered>,
}

impl RecordingRenderer {
    fn touch(target: &RenderTarget, content: &str) -> Result<()> {
        if let RenderTarget::File(path) = target {
            fs::write(path, content)?;
        }
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn line_plot(&mut self, plot: &LinePlot<'_>, target: &RenderTarget) -> Result<()> {
        Self::touch(target, "line")?;
        self.calls.push(Rendered::Line {
            x_label: plot.x_label.to_string(),
            y_label: plot.y_label.to_string(),
            points: plot.y_values.len(),
            target: target.clone(),
        });
        Ok(())
    }

    fn heatmap(&mut self, map: &Heatmap<'_>, target: &RenderTarget) -> Result<()> {
        Self::touch(target, &map.title)?;
        self.calls.push(Rendered::Heatmap {
            title: map.title.clone(),
            shape: (map.x_count, map.y_count),
            target: target.clone(),
        });
        Ok(())
    }
}
