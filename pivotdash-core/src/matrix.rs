//! Pivot matrix construction.
//!
//! The matrix is rebuilt from scratch on every filter or view change; there
//! is no incremental update path.

use std::collections::{BTreeMap, HashMap};

use crate::format::NumberFormat;
use crate::macros::setter;
use crate::model::{Cell, CellKey, DataModel, PeriodOrder};

pub const DEFAULT_MAX_ROWS: usize = 25;
pub const DEFAULT_MAX_COLS: usize = 12;

/// What goes on each axis of the matrix.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Rows are categories, columns subcategories
    #[default]
    CategoryBySubcategory,
    /// Rows are subcategories, columns categories
    SubcategoryByCategory,
    /// Rows are category/subcategory pairs, columns periods
    CellByPeriod,
    /// Rows are category/subcategory pairs, columns projects
    CellByProject,
}

impl ViewMode {
    pub const ALL: [Self; 4] = [
        Self::CategoryBySubcategory,
        Self::SubcategoryByCategory,
        Self::CellByPeriod,
        Self::CellByProject,
    ];

    /// Cycle to the next view. The project view is skipped when the payload
    /// has no projects.
    pub fn next(&self, has_projects: bool) -> Self {
        let next = match self {
            Self::CategoryBySubcategory => Self::SubcategoryByCategory,
            Self::SubcategoryByCategory => Self::CellByPeriod,
            Self::CellByPeriod => Self::CellByProject,
            Self::CellByProject => Self::CategoryBySubcategory,
        };
        if next == Self::CellByProject && !has_projects {
            Self::CategoryBySubcategory
        } else {
            next
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CategoryBySubcategory => "Category × Subcategory",
            Self::SubcategoryByCategory => "Subcategory × Category",
            Self::CellByPeriod => "Timeline",
            Self::CellByProject => "By Project",
        }
    }

    fn corner_label(&self) -> &'static str {
        match self {
            Self::CategoryBySubcategory => "Category",
            Self::SubcategoryByCategory => "Subcategory",
            Self::CellByPeriod | Self::CellByProject => "Category / Subcategory",
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum PeriodFilter {
    #[default]
    All,
    Period(String),
}

impl PeriodFilter {
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All periods",
            Self::Period(period) => period,
        }
    }

    /// Step through `All` followed by each period, wrapping around.
    pub fn cycle(&self, periods: &[String], forward: bool) -> Self {
        cycle_filter(
            match self {
                Self::All => None,
                Self::Period(p) => Some(p.as_str()),
            },
            periods,
            forward,
        )
        .map_or(Self::All, |p| Self::Period(p.to_string()))
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Project(String),
}

impl ProjectFilter {
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All projects",
            Self::Project(project) => project,
        }
    }

    pub fn cycle(&self, projects: &[String], forward: bool) -> Self {
        cycle_filter(
            match self {
                Self::All => None,
                Self::Project(p) => Some(p.as_str()),
            },
            projects,
            forward,
        )
        .map_or(Self::All, |p| Self::Project(p.to_string()))
    }

    fn admits(&self, cell: &Cell) -> bool {
        match self {
            Self::All => true,
            Self::Project(project) => cell.project_id.as_deref() == Some(project.as_str()),
        }
    }
}

/// `None` stands for "all"; an unknown current value restarts the cycle.
fn cycle_filter<'a>(current: Option<&str>, options: &'a [String], forward: bool) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }
    let position = current.and_then(|c| options.iter().position(|o| o == c));
    let next = match (position, forward) {
        (None, true) => Some(0),
        (None, false) => Some(options.len() - 1),
        (Some(i), true) if i + 1 < options.len() => Some(i + 1),
        (Some(i), false) if i > 0 => Some(i - 1),
        _ => None,
    };
    next.map(|i| options[i].as_str())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixOptions {
    view_mode: ViewMode,
    period: PeriodFilter,
    project: ProjectFilter,
    /// Row cap; 0 means unlimited
    max_rows: usize,
    /// Column cap; 0 means unlimited
    max_cols: usize,
    number_format: NumberFormat,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            period: PeriodFilter::default(),
            project: ProjectFilter::default(),
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            number_format: NumberFormat::default(),
        }
    }
}

impl MatrixOptions {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(view_mode: ViewMode);
    setter!(period: PeriodFilter);
    setter!(project: ProjectFilter);
    setter!(max_rows: usize);
    setter!(max_cols: usize);
    setter!(number_format: NumberFormat);
}

/// One rendered matrix cell and the payload cells behind it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixCell {
    pub value: Option<f64>,
    pub text: String,
    pub keys: Vec<CellKey>,
}

impl MatrixCell {
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixRow {
    pub label: String,
    pub cells: Vec<MatrixCell>,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    pub view_mode: ViewMode,
    pub corner_label: String,
    pub columns: Vec<String>,
    pub rows: Vec<MatrixRow>,
    pub column_totals: Vec<f64>,
    pub grand_total: f64,
}

impl Matrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&MatrixCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }
}

/// Accumulated value for one (row, column) slot.
#[derive(Default)]
struct Slot {
    value: f64,
    keys: Vec<CellKey>,
}

/// Sortable axis position: declared order first, label as tie breaker.
type AxisPos = (usize, usize, String);

struct Axes<'a> {
    categories: HashMap<&'a str, usize>,
    subcategories: HashMap<&'a str, usize>,
    periods: HashMap<&'a str, usize>,
    projects: HashMap<&'a str, usize>,
}

impl<'a> Axes<'a> {
    fn new(model: &'a DataModel) -> Self {
        fn index(labels: &[String]) -> HashMap<&str, usize> {
            labels
                .iter()
                .enumerate()
                .map(|(i, l)| (l.as_str(), i))
                .collect()
        }
        Self {
            categories: index(model.categories()),
            subcategories: index(model.subcategories()),
            periods: index(model.periods()),
            projects: index(model.projects()),
        }
    }

    fn category(&self, label: &str) -> usize {
        self.categories.get(label).copied().unwrap_or(usize::MAX)
    }

    fn subcategory(&self, label: &str) -> usize {
        self.subcategories.get(label).copied().unwrap_or(usize::MAX)
    }

    fn period(&self, label: &str) -> usize {
        self.periods.get(label).copied().unwrap_or(usize::MAX)
    }

    fn project(&self, label: &str) -> usize {
        self.projects.get(label).copied().unwrap_or(usize::MAX)
    }
}

/// Build the pivot matrix for the given options.
///
/// Rows and columns without any value are dropped before the caps apply.
/// Caps keep the first rows/columns in payload order, except for period
/// columns which keep the most recent ones.
pub fn build(model: &DataModel, options: &MatrixOptions) -> Matrix {
    let view_mode = if options.view_mode == ViewMode::CellByProject && !model.has_projects() {
        ViewMode::CategoryBySubcategory
    } else {
        options.view_mode
    };

    let mut matrix = Matrix {
        view_mode,
        corner_label: view_mode.corner_label().to_string(),
        ..Default::default()
    };

    let axes = Axes::new(model);
    let period_window = period_window(model, &options.period, view_mode);
    let project_filter = if model.has_projects() {
        options.project.clone()
    } else {
        ProjectFilter::All
    };

    let mut slots: BTreeMap<AxisPos, BTreeMap<AxisPos, Slot>> = BTreeMap::new();
    let mut add = |row: AxisPos, col: AxisPos, value: f64, key: &CellKey| {
        let slot = slots.entry(row).or_default().entry(col).or_default();
        slot.value += value;
        slot.keys.push(key.clone());
    };

    for (key, cell) in model.cells() {
        let category = axes.category(&cell.category);
        let subcategory = axes.subcategory(&cell.subcategory);
        let pair_row = (
            category,
            subcategory,
            format!("{} / {}", cell.category, cell.subcategory),
        );

        match view_mode {
            ViewMode::CategoryBySubcategory | ViewMode::SubcategoryByCategory => {
                if !project_filter.admits(cell) {
                    continue;
                }
                let Some(value) = displayed_value(cell, &options.period, model.period_order()) else {
                    continue;
                };
                let cat = (category, 0, cell.category.clone());
                let sub = (subcategory, 0, cell.subcategory.clone());
                if view_mode == ViewMode::CategoryBySubcategory {
                    add(cat, sub, value, key);
                } else {
                    add(sub, cat, value, key);
                }
            }
            ViewMode::CellByPeriod => {
                if !project_filter.admits(cell) {
                    continue;
                }
                for point in &cell.time_series {
                    if !period_window.contains(&point.period) {
                        continue;
                    }
                    let col = (axes.period(&point.period), 0, point.period.clone());
                    add(pair_row.clone(), col, point.value, key);
                }
            }
            ViewMode::CellByProject => {
                let Some(project) = cell.project_id.as_deref() else {
                    continue;
                };
                if !project_filter.admits(cell) {
                    continue;
                }
                let Some(value) = displayed_value(cell, &options.period, model.period_order()) else {
                    continue;
                };
                let col = (axes.project(project), 0, project.to_string());
                add(pair_row, col, value, key);
            }
        }
    }

    // Columns in axis order, then capped
    let mut columns: Vec<AxisPos> = slots
        .values()
        .flat_map(|cols| cols.keys().cloned())
        .collect();
    columns.sort();
    columns.dedup();
    let columns = cap_columns(columns, options.max_cols, view_mode == ViewMode::CellByPeriod);

    let mut rows: Vec<(AxisPos, BTreeMap<AxisPos, Slot>)> = slots
        .into_iter()
        .filter(|(_, cols)| columns.iter().any(|c| cols.contains_key(c)))
        .collect();
    if options.max_rows > 0 {
        rows.truncate(options.max_rows);
    }

    let fmt = &options.number_format;
    matrix.column_totals = vec![0.0; columns.len()];
    for ((_, _, label), mut cols) in rows {
        let cells: Vec<MatrixCell> = columns
            .iter()
            .map(|col| match cols.remove(col) {
                Some(slot) => MatrixCell {
                    value: Some(slot.value),
                    text: fmt.format(slot.value),
                    keys: slot.keys,
                },
                None => MatrixCell::default(),
            })
            .collect();

        let mut total = 0.0;
        for (i, cell) in cells.iter().enumerate() {
            if let Some(value) = cell.value {
                total += value;
                matrix.column_totals[i] += value;
            }
        }
        matrix.grand_total += total;
        matrix.rows.push(MatrixRow {
            label,
            cells,
            total,
        });
    }
    matrix.columns = columns.into_iter().map(|(_, _, label)| label).collect();

    tracing::debug!(
        "Built {:?} matrix: {} rows x {} columns",
        view_mode,
        matrix.num_rows(),
        matrix.num_cols()
    );

    matrix
}

/// Value a cell contributes in the non-time views: the point at the selected
/// period, or the most recent point when all periods are selected.
fn displayed_value(cell: &Cell, period: &PeriodFilter, order: &PeriodOrder) -> Option<f64> {
    match period {
        PeriodFilter::All => cell.last_point(order).map(|p| p.value),
        PeriodFilter::Period(period) => cell.point_at(period).map(|p| p.value),
    }
}

/// Periods eligible as columns in the timeline view.
fn period_window(model: &DataModel, period: &PeriodFilter, view_mode: ViewMode) -> Vec<String> {
    if view_mode != ViewMode::CellByPeriod {
        return Vec::new();
    }
    match period {
        PeriodFilter::All => model.periods().to_vec(),
        PeriodFilter::Period(selected) => model
            .periods()
            .iter()
            .filter(|p| model.period_order().compare(p, selected).is_le())
            .cloned()
            .collect(),
    }
}

fn cap_columns(columns: Vec<AxisPos>, max_cols: usize, keep_latest: bool) -> Vec<AxisPos> {
    if max_cols == 0 || columns.len() <= max_cols {
        return columns;
    }
    if keep_latest {
        let skip = columns.len() - max_cols;
        columns.into_iter().skip(skip).collect()
    } else {
        columns.into_iter().take(max_cols).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Payload, Point};

    fn model(cells: Vec<Cell>, periods: &[&str]) -> DataModel {
        let mut payload = Payload {
            categories: vec!["Sales".into(), "Costs".into()],
            subcategories: vec!["North".into(), "South".into()],
            periods: periods.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        };
        for cell in cells {
            if let Some(project) = &cell.project_id {
                if !payload.projects.contains(project) {
                    payload.projects.push(project.clone());
                }
                payload.has_projects = true;
            }
            payload.cell_data.insert(cell.key().to_string(), cell);
        }
        DataModel::from(payload)
    }

    fn series(values: &[(&str, f64)]) -> Vec<Point> {
        values.iter().map(|(p, v)| Point::new(*p, *v)).collect()
    }

    fn basic_model() -> DataModel {
        model(
            vec![
                Cell::new("Sales", "North")
                    .with_points(series(&[("2023-Q1", 100.0), ("2023-Q2", 150.0)])),
                Cell::new("Sales", "South").with_points(series(&[("2023-Q1", 40.0)])),
                Cell::new("Costs", "North")
                    .with_points(series(&[("2023-Q1", -30.0), ("2023-Q2", -35.0)])),
            ],
            &["2023-Q1", "2023-Q2"],
        )
    }

    #[test]
    fn test_empty_model_gives_empty_matrix() {
        let matrix = build(&DataModel::default(), &MatrixOptions::new());
        assert!(matrix.is_empty());
        assert!(matrix.columns.is_empty());
        assert_eq!(matrix.grand_total, 0.0);
    }

    #[test]
    fn test_category_by_subcategory_for_period() {
        let matrix = build(
            &basic_model(),
            &MatrixOptions::new().period(PeriodFilter::Period("2023-Q2".into())),
        );

        assert_eq!(matrix.columns, vec!["North"]);
        assert_eq!(matrix.rows.len(), 2);
        assert_eq!(matrix.rows[0].label, "Sales");
        assert_eq!(matrix.rows[0].cells[0].value, Some(150.0));
        assert_eq!(matrix.rows[1].label, "Costs");
        assert_eq!(matrix.rows[1].cells[0].text, "-35");
        assert_eq!(matrix.rows[0].cells[0].keys, vec![CellKey::from("Sales|North")]);
    }

    #[test]
    fn test_all_periods_uses_latest_point() {
        let matrix = build(&basic_model(), &MatrixOptions::new());

        assert_eq!(matrix.columns, vec!["North", "South"]);
        assert_eq!(matrix.rows[0].cells[0].value, Some(150.0));
        assert_eq!(matrix.rows[0].cells[1].value, Some(40.0));
        assert_eq!(matrix.rows[0].total, 190.0);
        assert!(matrix.rows[1].cells[1].is_empty());
        assert_eq!(matrix.column_totals, vec![115.0, 40.0]);
        assert_eq!(matrix.grand_total, 155.0);
    }

    #[test]
    fn test_transposed_view() {
        let matrix = build(
            &basic_model(),
            &MatrixOptions::new().view_mode(ViewMode::SubcategoryByCategory),
        );

        assert_eq!(matrix.corner_label, "Subcategory");
        assert_eq!(matrix.columns, vec!["Sales", "Costs"]);
        assert_eq!(matrix.rows[0].label, "North");
        assert_eq!(matrix.rows[1].label, "South");
    }

    #[test]
    fn test_timeline_window_ends_at_selected_period() {
        let model = model(
            vec![Cell::new("Sales", "North").with_points(series(&[
                ("2023-Q1", 1.0),
                ("2023-Q2", 2.0),
                ("2023-Q3", 3.0),
                ("2023-Q4", 4.0),
            ]))],
            &["2023-Q1", "2023-Q2", "2023-Q3", "2023-Q4"],
        );

        let matrix = build(
            &model,
            &MatrixOptions::new()
                .view_mode(ViewMode::CellByPeriod)
                .period(PeriodFilter::Period("2023-Q3".into()))
                .max_cols(2usize),
        );

        assert_eq!(matrix.columns, vec!["2023-Q2", "2023-Q3"]);
        assert_eq!(matrix.rows[0].label, "Sales / North");
        assert_eq!(matrix.rows[0].total, 5.0);
    }

    #[test]
    fn test_numeric_periods_follow_payload_order() {
        let model = model(
            vec![Cell::new("Sales", "North").with_points(series(&[
                ("10", 2.0),
                ("11", 3.0),
                ("9", 1.0),
            ]))],
            &["9", "10", "11"],
        );

        let timeline = build(
            &model,
            &MatrixOptions::new()
                .view_mode(ViewMode::CellByPeriod)
                .period(PeriodFilter::Period("10".into())),
        );
        assert_eq!(timeline.columns, vec!["9", "10"]);

        let latest = build(&model, &MatrixOptions::new());
        assert_eq!(latest.rows[0].cells[0].value, Some(3.0));
    }

    #[test]
    fn test_row_and_column_caps_keep_first() {
        let matrix = build(
            &basic_model(),
            &MatrixOptions::new().max_rows(1usize).max_cols(1usize),
        );

        assert_eq!(matrix.num_rows(), 1);
        assert_eq!(matrix.columns, vec!["North"]);
        assert_eq!(matrix.rows[0].label, "Sales");
    }

    #[test]
    fn test_zero_caps_mean_unlimited() {
        let matrix = build(
            &basic_model(),
            &MatrixOptions::new().max_rows(0usize).max_cols(0usize),
        );
        assert_eq!(matrix.num_rows(), 2);
        assert_eq!(matrix.num_cols(), 2);
    }

    #[test]
    fn test_project_filter_and_aggregation() {
        let model = model(
            vec![
                Cell::new("Sales", "North")
                    .with_project("P1")
                    .with_points(series(&[("2023-Q1", 10.0)])),
                Cell::new("Sales", "North")
                    .with_project("P2")
                    .with_points(series(&[("2023-Q1", 5.0)])),
            ],
            &["2023-Q1"],
        );

        let all = build(&model, &MatrixOptions::new());
        assert_eq!(all.rows[0].cells[0].value, Some(15.0));
        assert_eq!(all.rows[0].cells[0].keys.len(), 2);

        let p2 = build(
            &model,
            &MatrixOptions::new().project(ProjectFilter::Project("P2".into())),
        );
        assert_eq!(p2.rows[0].cells[0].value, Some(5.0));
        assert_eq!(p2.rows[0].cells[0].keys, vec![CellKey::from("P2|Sales|North")]);
    }

    #[test]
    fn test_project_view_columns() {
        let model = model(
            vec![
                Cell::new("Sales", "North")
                    .with_project("P1")
                    .with_points(series(&[("2023-Q1", 10.0)])),
                Cell::new("Sales", "North")
                    .with_project("P2")
                    .with_points(series(&[("2023-Q1", 5.0)])),
            ],
            &["2023-Q1"],
        );

        let matrix = build(
            &model,
            &MatrixOptions::new().view_mode(ViewMode::CellByProject),
        );
        assert_eq!(matrix.columns, vec!["P1", "P2"]);
        assert_eq!(matrix.rows[0].total, 15.0);
    }

    #[test]
    fn test_project_view_falls_back_without_projects() {
        let matrix = build(
            &basic_model(),
            &MatrixOptions::new().view_mode(ViewMode::CellByProject),
        );
        assert_eq!(matrix.view_mode, ViewMode::CategoryBySubcategory);
    }

    #[test]
    fn test_period_filter_cycle() {
        let periods = vec!["A".to_string(), "B".to_string()];

        let next = PeriodFilter::All.cycle(&periods, true);
        assert_eq!(next, PeriodFilter::Period("A".into()));
        let next = next.cycle(&periods, true);
        assert_eq!(next, PeriodFilter::Period("B".into()));
        assert_eq!(next.cycle(&periods, true), PeriodFilter::All);
        assert_eq!(
            PeriodFilter::All.cycle(&periods, false),
            PeriodFilter::Period("B".into())
        );
        assert_eq!(PeriodFilter::All.cycle(&[], true), PeriodFilter::All);
    }

    #[test]
    fn test_view_mode_cycle_skips_projects() {
        assert_eq!(
            ViewMode::CellByPeriod.next(false),
            ViewMode::CategoryBySubcategory
        );
        assert_eq!(ViewMode::CellByPeriod.next(true), ViewMode::CellByProject);
    }
}
