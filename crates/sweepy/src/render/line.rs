use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType};
use sweepy_core::dispatch::{LinePlot, value_range};

use super::RenderStyle;

/// (x, y) pairs with non-finite y values dropped
pub fn line_points(plot: &LinePlot<'_>) -> Vec<(f64, f64)> {
    plot.x_values
        .iter()
        .zip(plot.y_values)
        .filter(|(_, y)| y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect()
}

fn axis_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    vec![
        Span::raw(format_value(lo)),
        Span::raw(format_value((lo + hi) / 2.0)),
        Span::raw(format_value(hi)),
    ]
}

fn format_value(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1e5 || v.abs() < 1e-3) {
        format!("{v:.2e}")
    } else {
        format!("{v:.2}")
    }
}

/// Build a line chart of `points`, labelled from `plot`
pub fn line_chart<'a>(
    points: &'a [(f64, f64)],
    plot: &LinePlot<'_>,
    style: &RenderStyle,
) -> Chart<'a> {
    let x_min = plot.x_values.first().copied().unwrap_or(0.0);
    let x_max = plot.x_values.last().copied().unwrap_or(1.0);
    let x_padding = (x_max - x_min).abs() * 0.02;

    // Pad the y range so flat lines stay visible
    let (y_min, y_max) = value_range(plot.y_values).unwrap_or((0.0, 1.0));
    let y_padding = (y_max - y_min).abs().max(1e-9) * 0.1;
    let (y_min, y_max) = (y_min - y_padding, y_max + y_padding);

    let dataset = Dataset::default()
        .name(plot.y_label.to_string())
        .marker(style.marker)
        .graph_type(GraphType::Line)
        .data(points);

    let x_axis = Axis::default()
        .title(plot.x_label.to_string())
        .bounds([x_min - x_padding, x_max + x_padding])
        .labels(axis_labels(x_min, x_max));

    let y_axis = Axis::default()
        .title(plot.y_label.to_string())
        .bounds([y_min, y_max])
        .labels(axis_labels(y_min, y_max));

    Chart::new(vec![dataset])
        .block(Block::bordered().title(format!("{} vs {}", plot.y_label, plot.x_label)))
        .x_axis(x_axis)
        .y_axis(y_axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_skip_non_finite() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [1.0, f64::NAN, 3.0];
        let plot = LinePlot {
            x_values: &xs,
            y_values: &ys,
            x_label: "x",
            y_label: "y",
        };
        assert_eq!(line_points(&plot), vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0.00");
        assert_eq!(format_value(2.5), "2.50");
        assert_eq!(format_value(250000.0), "2.50e5");
    }
}
