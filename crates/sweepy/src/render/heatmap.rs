use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use sweepy_core::dispatch::Heatmap;

use super::RenderStyle;

/// Width of the row label column, including the separator
const LABEL_WIDTH: usize = 12;

/// Lines outside the data rows: title, blank, blank, axis label, legend
const CHROME_LINES: usize = 5;

/// Build a heatmap paragraph with one text row per x value and one cell per
/// y value.
///
/// Returns the widget and the smallest area that holds it.
pub fn heatmap_widget(map: &Heatmap<'_>, style: &RenderStyle) -> (Paragraph<'static>, u16, u16) {
    let ramp: &[char] = if style.ramp.is_empty() {
        &super::HEAT_RAMP
    } else {
        &style.ramp
    };
    let (min_val, max_val) = map.value_range().unwrap_or((0.0, 0.0));
    let range = (max_val - min_val).max(1e-4);

    let mut lines: Vec<Line<'static>> = Vec::with_capacity(map.x_count + CHROME_LINES);
    lines.push(Line::from(format!(
        "  {}: {} x {}",
        map.title, map.x_label, map.y_label
    )));
    lines.push(Line::from(""));

    let x_step = step(map.x_range, map.x_count);
    for ix in 0..map.x_count {
        let x_val = map.x_range.0 + x_step * ix as f64;
        let mut row = format!("{x_val:>9.3} |");
        for iy in 0..map.y_count {
            let ch = match map.get(ix, iy) {
                Some(v) if v.is_finite() => {
                    let normalized = ((v - min_val) / range).clamp(0.0, 1.0);
                    let idx = (normalized * (ramp.len() - 1) as f64).round() as usize;
                    ramp[idx.min(ramp.len() - 1)]
                }
                _ => '?',
            };
            row.push(' ');
            row.push(ch);
        }
        lines.push(Line::from(row));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH - 1)),
        Span::raw(format!(
            "{} -> ({} to {})",
            map.y_label, map.y_range.0, map.y_range.1
        )),
    ]));
    lines.push(Line::from(format!(
        "  Legend: {} = {min_val:.4} -> {} = {max_val:.4}",
        ramp[0],
        ramp[ramp.len() - 1]
    )));

    let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = (content_width.max(LABEL_WIDTH + 2 * map.y_count) + 2).min(u16::MAX as usize);
    let height = (lines.len() + 2).min(u16::MAX as usize);

    let widget = Paragraph::new(lines).block(Block::bordered().title(map.title.clone()));
    (widget, width as u16, height as u16)
}

/// Distance between consecutive axis values
fn step((low, high): (f64, f64), count: usize) -> f64 {
    if count > 1 {
        (high - low) / (count - 1) as f64
    } else {
        0.0
    }
}
