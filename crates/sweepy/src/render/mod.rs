//! Plain-text renderer for sweep plots.
//!
//! Plots are drawn with ratatui widgets into an off-screen [`Buffer`] and the
//! buffer is then flattened to text, so the same drawing serves both the
//! terminal and saved files.

mod heatmap;
mod line;

use std::fs;
use std::io::{self, Write};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::Widget;
use sweepy_core::Result;
use sweepy_core::dispatch::{Heatmap, LinePlot, RenderTarget, Renderer};
use tracing::debug;

pub use heatmap::heatmap_widget;
pub use line::{line_chart, line_points};

/// Default characters from coldest to hottest
pub const HEAT_RAMP: [char; 7] = [' ', '.', ':', '+', '*', '#', '@'];

/// Drawing options for [`TextRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Width of a line chart in cells
    pub width: u16,
    /// Height of a line chart in cells
    pub height: u16,
    pub marker: Marker,
    /// Heatmap characters, coldest first
    pub ramp: Vec<char>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            width: 72,
            height: 20,
            marker: Marker::Dot,
            ramp: HEAT_RAMP.to_vec(),
        }
    }
}

/// [`Renderer`] that prints plots to stdout or writes them as text files
#[derive(Debug, Default)]
pub struct TextRenderer {
    style: RenderStyle,
}

impl TextRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Draw a line plot to text
    pub fn line_text(&self, plot: &LinePlot<'_>) -> String {
        let area = Rect::new(0, 0, self.style.width, self.style.height);
        let points = line_points(plot);
        draw(line_chart(&points, plot, &self.style), area)
    }

    /// Draw a heatmap to text
    pub fn heatmap_text(&self, map: &Heatmap<'_>) -> String {
        let (widget, width, height) = heatmap_widget(map, &self.style);
        draw(widget, Rect::new(0, 0, width.max(self.style.width), height))
    }

    fn emit(&self, text: &str, target: &RenderTarget) -> Result<()> {
        match target {
            RenderTarget::Display => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                writeln!(out)?;
            }
            RenderTarget::File(path) => {
                fs::write(path, text)?;
                debug!(path = %path.display(), "wrote plot");
            }
        }
        Ok(())
    }
}

impl Renderer for TextRenderer {
    fn line_plot(&mut self, plot: &LinePlot<'_>, target: &RenderTarget) -> Result<()> {
        let text = self.line_text(plot);
        self.emit(&text, target)
    }

    fn heatmap(&mut self, map: &Heatmap<'_>, target: &RenderTarget) -> Result<()> {
        let text = self.heatmap_text(map);
        self.emit(&text, target)
    }
}

/// Render `widget` into a fresh buffer of `area` and flatten it to lines
fn draw<W: Widget>(widget: W, area: Rect) -> String {
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_to_text(&buf)
}

/// The buffer's symbols, one line per row, trailing blanks removed
pub fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut text = String::with_capacity(usize::from(area.width + 1) * usize::from(area.height));
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect();
        text.push_str(row.trim_end());
        text.push('\n');
    }
    text
}
