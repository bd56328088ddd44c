//! Terminal rendering of a cell's period chart: actual values as bars with
//! budget (dashed) and forecast (solid) reference lines on top.

use pivotdash_core::detail::{DetailChart, LegendEntry, LineSeries, Stroke};
use pivotdash_core::NumberFormat;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Paragraph, Wrap},
    Frame,
};

use crate::ui::{theme, utils};

/// Interpolated samples per unit of x when drawing a dashed line
const DASH_SAMPLES: usize = 16;
/// Samples per dash and per gap
const DASH_LENGTH: usize = 3;
/// Minimum horizontal room per x-axis label
const LABEL_WIDTH: u16 = 9;

pub fn render(f: &mut Frame, area: Rect, chart: &DetailChart, fmt: &NumberFormat) {
    let comparative = utils::comparative_lines(chart.comparative.as_ref(), fmt);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(comparative.len() as u16),
        ])
        .split(area);

    render_chart(f, chunks[0], chart, fmt);
    render_value_labels(f, chunks[1], chart);

    let status = Paragraph::new(Span::styled(chart.status.as_str(), theme::help_text_style()));
    f.render_widget(status, chunks[2]);

    if !comparative.is_empty() {
        f.render_widget(Paragraph::new(comparative), chunks[3]);
    }
}

fn render_chart(f: &mut Frame, area: Rect, chart: &DetailChart, fmt: &NumberFormat) {
    let (positive, negative): (Vec<(f64, f64)>, Vec<(f64, f64)>) = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| (i as f64, bar.value))
        .partition(|(_, value)| *value >= 0.0);

    // The Actual legend entry goes on whichever bar set has data
    let actual_on_positive = !positive.is_empty();

    let line_data: Vec<(&LineSeries, Vec<(f64, f64)>, Vec<(f64, f64)>)> = chart
        .lines()
        .map(|series| {
            let markers = series
                .points
                .iter()
                .map(|(i, v)| (*i as f64, *v))
                .collect::<Vec<_>>();
            let path = match series.stroke {
                Stroke::Dashed => dashed_points(&series.points),
                Stroke::Solid => markers.clone(),
            };
            (series, path, markers)
        })
        .collect();

    let mut datasets = vec![
        bar_dataset(&positive, theme::COLOR_POSITIVE, actual_on_positive),
        bar_dataset(&negative, theme::COLOR_NEGATIVE, !actual_on_positive),
    ];

    for (series, path, markers) in &line_data {
        let color = match series.entry {
            LegendEntry::Budget => theme::COLOR_BUDGET,
            _ => theme::COLOR_FORECAST,
        };
        let graph_type = match series.stroke {
            Stroke::Dashed => GraphType::Scatter,
            Stroke::Solid => GraphType::Line,
        };
        datasets.push(
            Dataset::default()
                .name(series.entry.label())
                .marker(symbols::Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(color))
                .data(path),
        );
        if series.markers {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(color))
                    .data(markers),
            );
        }
    }

    let x_max = chart.bars.len().saturating_sub(1).max(1) as f64;
    let max_labels = (area.width / LABEL_WIDTH).max(2) as usize;
    let x_axis = Axis::default()
        .style(theme::help_text_style())
        .bounds([0.0, x_max])
        .labels(x_labels(chart, max_labels));

    let [y_min, y_max] = y_bounds(chart.domain);
    let y_axis = Axis::default()
        .style(theme::help_text_style())
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(fmt.format(y_min)),
            Span::raw(fmt.format((y_min + y_max) / 2.0)),
            Span::raw(fmt.format(y_max)),
        ]);

    let widget = Chart::new(datasets)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(Some(LegendPosition::TopRight));

    f.render_widget(widget, area);
}

fn bar_dataset(data: &[(f64, f64)], color: ratatui::style::Color, named: bool) -> Dataset<'_> {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Block)
        .graph_type(GraphType::Bar)
        .style(Style::default().fg(color))
        .data(data);

    if named {
        dataset.name("Actual")
    } else {
        dataset
    }
}

/// One labelled value per bar, in chronological order
fn render_value_labels(f: &mut Frame, area: Rect, chart: &DetailChart) {
    let mut spans = Vec::with_capacity(chart.bars.len() * 2);
    for bar in &chart.bars {
        spans.push(Span::styled(
            format!("{}: ", bar.period),
            theme::help_text_style(),
        ));
        spans.push(utils::value_span(bar.value, bar.label.clone()));
        spans.push(Span::raw("  "));
    }

    let paragraph = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Period labels for the x axis. Labels are spread evenly by the chart, so
/// when they do not all fit only the first, middle and last are kept.
fn x_labels(chart: &DetailChart, max_labels: usize) -> Vec<String> {
    let periods: Vec<&str> = chart.bars.iter().map(|b| b.period.as_str()).collect();

    match periods.len() {
        0 => Vec::new(),
        n if n <= max_labels => periods.iter().map(|p| p.to_string()).collect(),
        n => vec![
            periods[0].to_string(),
            periods[(n - 1) / 2].to_string(),
            periods[n - 1].to_string(),
        ],
    }
}

/// Chart bounds for a value domain; a flat domain still gets a unit range
fn y_bounds(domain: (f64, f64)) -> [f64; 2] {
    let (lo, hi) = domain;
    if (hi - lo).abs() < f64::EPSILON {
        [lo, lo + 1.0]
    } else {
        [lo, hi]
    }
}

/// Sample a polyline between consecutive points and keep alternating runs,
/// producing a dashed look with scatter dots.
fn dashed_points(points: &[(usize, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let mut sample = 0usize;

    for pair in points.windows(2) {
        let (x0, y0) = (pair[0].0 as f64, pair[0].1);
        let (x1, y1) = (pair[1].0 as f64, pair[1].1);
        let steps = ((x1 - x0).abs() * DASH_SAMPLES as f64).ceil().max(1.0) as usize;

        for step in 0..steps {
            if (sample / DASH_LENGTH) % 2 == 0 {
                let t = step as f64 / steps as f64;
                out.push((x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
            }
            sample += 1;
        }
    }

    if let [.., last] = points {
        out.push((last.0 as f64, last.1));
    }
    out
}
