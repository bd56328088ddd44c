//! Drill-down detail for a single cell: a descending table or an ascending
//! chart description that the terminal layer draws.

use crate::format::NumberFormat;
use crate::model::{Cell, Comparative, PeriodOrder, Point};

pub const INSUFFICIENT_DATA: &str = "Not enough data to draw a chart";

/// Headroom added above the largest and below the smallest value.
const DOMAIN_PADDING: f64 = 1.1;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    #[default]
    Table,
    Chart,
}

impl DetailMode {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Table => Self::Chart,
            Self::Chart => Self::Table,
        }
    }
}

/// Payload-level settings that shape the detail view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailOptions {
    pub has_ppto: bool,
    pub has_prev: bool,
    pub number_format: NumberFormat,
    /// Time axis of the payload the cell came from
    pub period_order: PeriodOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    InsufficientData,
    Table(DetailTable),
    Chart(DetailChart),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailTable {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<DetailRow>,
    pub comparative: Option<Comparative>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub period: String,
    pub value: f64,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendEntry {
    Actual,
    Budget,
    Forecast,
}

impl LegendEntry {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Actual => "Actual",
            Self::Budget => "Budget",
            Self::Forecast => "Forecast",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub period: String,
    pub value: f64,
    pub label: String,
    pub positive: bool,
}

/// A reference line over the bars. `points` holds `(bar index, value)` pairs
/// for the periods where the series has a value.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub entry: LegendEntry,
    pub stroke: Stroke,
    pub markers: bool,
    pub points: Vec<(usize, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailChart {
    pub title: String,
    pub bars: Vec<Bar>,
    pub budget: Option<LineSeries>,
    pub forecast: Option<LineSeries>,
    pub domain: (f64, f64),
    pub legend: Vec<LegendEntry>,
    pub comparative: Option<Comparative>,
    pub status: String,
}

impl DetailChart {
    pub fn lines(&self) -> impl Iterator<Item = &LineSeries> {
        self.budget.iter().chain(self.forecast.iter())
    }
}

/// Build the detail view for a cell in the requested mode.
pub fn render_detail(cell: &Cell, mode: DetailMode, options: &DetailOptions) -> DetailView {
    match mode {
        DetailMode::Table => DetailView::Table(detail_table(cell, options)),
        DetailMode::Chart if cell.time_series.len() <= 1 => DetailView::InsufficientData,
        DetailMode::Chart => DetailView::Chart(detail_chart(cell, options)),
    }
}

fn detail_table(cell: &Cell, options: &DetailOptions) -> DetailTable {
    let fmt = &options.number_format;

    let mut headers = vec!["Period", "Value"];
    if options.has_ppto {
        headers.push("Budget");
    }
    if options.has_prev {
        headers.push("Forecast");
    }

    let rows = cell
        .most_recent_first(&options.period_order)
        .into_iter()
        .map(|point| {
            let mut cells = vec![point.period.clone(), fmt.format(point.value)];
            if options.has_ppto {
                cells.push(fmt.format(point.ppto.unwrap_or(0.0)));
            }
            if options.has_prev {
                cells.push(fmt.format(point.prev.unwrap_or(0.0)));
            }
            DetailRow {
                period: point.period.clone(),
                value: point.value,
                cells,
            }
        })
        .collect();

    DetailTable {
        title: cell.display_name(),
        headers,
        rows,
        comparative: cell.comparative(&options.period_order),
    }
}

fn detail_chart(cell: &Cell, options: &DetailOptions) -> DetailChart {
    let fmt = &options.number_format;
    let points = cell.chronological(&options.period_order);

    let bars: Vec<Bar> = points
        .iter()
        .map(|p| Bar {
            period: p.period.clone(),
            value: p.value,
            label: fmt.format(p.value),
            positive: p.value >= 0.0,
        })
        .collect();

    let budget = line_series(&points, LegendEntry::Budget, Stroke::Dashed, |p| p.ppto);
    let forecast = line_series(&points, LegendEntry::Forecast, Stroke::Solid, |p| p.prev);

    // The legend follows field presence even when every value is zero
    let mut legend = vec![LegendEntry::Actual];
    if points.iter().any(|p| p.ppto.is_some()) {
        legend.push(LegendEntry::Budget);
    }
    if points.iter().any(|p| p.prev.is_some()) {
        legend.push(LegendEntry::Forecast);
    }

    DetailChart {
        title: cell.display_name(),
        domain: value_domain(&points),
        status: format!("Showing {} periods", bars.len()),
        bars,
        budget,
        forecast,
        legend,
        comparative: cell.comparative(&options.period_order),
    }
}

fn line_series(
    points: &[&Point],
    entry: LegendEntry,
    stroke: Stroke,
    field: impl Fn(&Point) -> Option<f64>,
) -> Option<LineSeries> {
    let values: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        // A zero reference value is a gap, not a point on the line
        .filter_map(|(i, p)| field(p).filter(|v| *v != 0.0).map(|v| (i, v)))
        .collect();

    if values.is_empty() {
        return None;
    }

    Some(LineSeries {
        entry,
        stroke,
        markers: true,
        points: values,
    })
}

/// Vertical domain covering every plotted value with zero always inside.
pub fn value_domain(points: &[&Point]) -> (f64, f64) {
    let values = points
        .iter()
        .flat_map(|p| [Some(p.value), p.ppto, p.prev])
        .flatten();

    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    (
        if min < 0.0 { min * DOMAIN_PADDING } else { 0.0 },
        if max > 0.0 { max * DOMAIN_PADDING } else { 0.0 },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_quarters() -> Cell {
        Cell::new("Sales", "North").with_points(vec![
            Point::new("2023-Q1", 100.0),
            Point::new("2023-Q2", -50.0),
        ])
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_domain_for_mixed_signs() {
        let DetailView::Chart(chart) =
            render_detail(&two_quarters(), DetailMode::Chart, &DetailOptions::default())
        else {
            panic!("expected chart");
        };

        assert!(approx(chart.domain.0, -55.0));
        assert!(approx(chart.domain.1, 110.0));
    }

    #[test]
    fn test_table_is_most_recent_first() {
        let DetailView::Table(table) =
            render_detail(&two_quarters(), DetailMode::Table, &DetailOptions::default())
        else {
            panic!("expected table");
        };

        let periods: Vec<&str> = table.rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["2023-Q2", "2023-Q1"]);
        assert_eq!(table.rows[0].cells, vec!["2023-Q2", "-50"]);
        assert_eq!(table.rows[0].value, -50.0);
        assert_eq!(table.headers, vec!["Period", "Value"]);
    }

    #[test]
    fn test_table_and_chart_orders_hold_together() {
        let cell = Cell::new("Sales", "North").with_points(vec![
            Point::new("2023-Q2", 2.0),
            Point::new("2023-Q3", 3.0),
            Point::new("2023-Q1", 1.0),
        ]);
        let options = DetailOptions::default();

        let DetailView::Table(table) = render_detail(&cell, DetailMode::Table, &options) else {
            panic!("expected table");
        };
        let DetailView::Chart(chart) = render_detail(&cell, DetailMode::Chart, &options) else {
            panic!("expected chart");
        };

        let table_periods: Vec<&str> = table.rows.iter().map(|r| r.period.as_str()).collect();
        let chart_periods: Vec<&str> = chart.bars.iter().map(|b| b.period.as_str()).collect();
        assert_eq!(table_periods, vec!["2023-Q3", "2023-Q2", "2023-Q1"]);
        assert_eq!(chart_periods, vec!["2023-Q1", "2023-Q2", "2023-Q3"]);
        assert_eq!(chart.status, "Showing 3 periods");
    }

    #[test]
    fn test_single_point_is_insufficient_for_chart() {
        let cell = Cell::new("Sales", "North").with_points(vec![Point::new("2023-Q1", 1.0)]);
        assert_eq!(
            render_detail(&cell, DetailMode::Chart, &DetailOptions::default()),
            DetailView::InsufficientData
        );

        let empty = Cell::new("Sales", "North");
        assert_eq!(
            render_detail(&empty, DetailMode::Chart, &DetailOptions::default()),
            DetailView::InsufficientData
        );
    }

    #[test]
    fn test_single_point_still_renders_table() {
        let cell = Cell::new("Sales", "North").with_points(vec![Point::new("2023-Q1", 1.0)]);
        assert!(matches!(
            render_detail(&cell, DetailMode::Table, &DetailOptions::default()),
            DetailView::Table(_)
        ));
    }

    #[test]
    fn test_legend_follows_present_series() {
        let options = DetailOptions::default();

        let DetailView::Chart(plain) = render_detail(&two_quarters(), DetailMode::Chart, &options)
        else {
            panic!("expected chart");
        };
        assert_eq!(plain.legend, vec![LegendEntry::Actual]);
        assert!(plain.budget.is_none());
        assert!(plain.forecast.is_none());

        let with_budget = Cell::new("Sales", "North").with_points(vec![
            Point::new("2023-Q1", 1.0),
            Point::new("2023-Q2", 2.0).with_ppto(3.0),
        ]);
        let DetailView::Chart(chart) = render_detail(&with_budget, DetailMode::Chart, &options)
        else {
            panic!("expected chart");
        };
        assert_eq!(chart.legend, vec![LegendEntry::Actual, LegendEntry::Budget]);
        let budget = chart.budget.unwrap();
        assert_eq!(budget.stroke, Stroke::Dashed);
        assert_eq!(budget.points, vec![(1, 3.0)]);
    }

    #[test]
    fn test_forecast_line_is_solid() {
        let cell = Cell::new("Sales", "North").with_points(vec![
            Point::new("2023-Q1", 1.0).with_prev(4.0),
            Point::new("2023-Q2", 2.0),
        ]);
        let DetailView::Chart(chart) =
            render_detail(&cell, DetailMode::Chart, &DetailOptions::default())
        else {
            panic!("expected chart");
        };

        assert_eq!(chart.legend, vec![LegendEntry::Actual, LegendEntry::Forecast]);
        assert_eq!(chart.forecast.unwrap().stroke, Stroke::Solid);
        // Forecast value extends the domain
        assert!(approx(chart.domain.1, 4.4));
    }

    #[test]
    fn test_domain_always_contains_zero() {
        let positive = [Point::new("a", 5.0), Point::new("b", 10.0)];
        let negative = [Point::new("a", -5.0), Point::new("b", -10.0)];

        let (lo, hi) = value_domain(&positive.iter().collect::<Vec<_>>());
        assert_eq!(lo, 0.0);
        assert!(approx(hi, 11.0));

        let (lo, hi) = value_domain(&negative.iter().collect::<Vec<_>>());
        assert!(approx(lo, -11.0));
        assert_eq!(hi, 0.0);

        assert_eq!(value_domain(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_absent_reference_values_show_as_zero_in_table() {
        let cell = Cell::new("Sales", "North").with_points(vec![
            Point::new("2023-Q1", 10000.0).with_ppto(1200.0),
            Point::new("2023-Q2", 2000.0),
        ]);
        let options = DetailOptions {
            has_ppto: true,
            has_prev: true,
            ..Default::default()
        };

        let DetailView::Table(table) = render_detail(&cell, DetailMode::Table, &options) else {
            panic!("expected table");
        };
        assert_eq!(table.headers, vec!["Period", "Value", "Budget", "Forecast"]);
        assert_eq!(table.rows[0].cells, vec!["2023-Q2", "2000", "0", "0"]);
        assert_eq!(table.rows[1].cells, vec!["2023-Q1", "10.000", "1200", "0"]);
    }

    #[test]
    fn test_zero_reference_values_leave_gaps() {
        let cell = Cell::new("Sales", "North").with_points(vec![
            Point::new("2023-Q1", 10.0).with_ppto(0.0).with_prev(0.0),
            Point::new("2023-Q2", 20.0).with_ppto(15.0).with_prev(0.0),
            Point::new("2023-Q3", 30.0).with_ppto(25.0).with_prev(0.0),
        ]);

        let DetailView::Chart(chart) =
            render_detail(&cell, DetailMode::Chart, &DetailOptions::default())
        else {
            panic!("expected chart");
        };

        assert_eq!(chart.budget.as_ref().unwrap().points, vec![(1, 15.0), (2, 25.0)]);
        assert!(chart.forecast.is_none());
        assert_eq!(
            chart.legend,
            vec![LegendEntry::Actual, LegendEntry::Budget, LegendEntry::Forecast]
        );
    }

    #[test]
    fn test_numeric_periods_use_axis_order() {
        let cell = Cell::new("Sales", "North").with_points(vec![
            Point::new("10", 2.0),
            Point::new("11", 3.0),
            Point::new("9", 1.0),
        ]);
        let options = DetailOptions {
            period_order: PeriodOrder::new(&["9".into(), "10".into(), "11".into()]),
            ..Default::default()
        };

        let DetailView::Chart(chart) = render_detail(&cell, DetailMode::Chart, &options) else {
            panic!("expected chart");
        };
        let periods: Vec<&str> = chart.bars.iter().map(|b| b.period.as_str()).collect();
        assert_eq!(periods, vec!["9", "10", "11"]);

        let DetailView::Table(table) = render_detail(&cell, DetailMode::Table, &options) else {
            panic!("expected table");
        };
        assert_eq!(table.rows[0].period, "11");
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(DetailMode::Table.toggle(), DetailMode::Chart);
        assert_eq!(DetailMode::Chart.toggle(), DetailMode::Table);
    }
}
