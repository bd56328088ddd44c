pub mod reducer;
pub mod tooltip;

use pivotdash_core::detail::{self, DetailMode, DetailOptions, DetailView};
use pivotdash_core::matrix::{self, MatrixCell, DEFAULT_MAX_COLS, DEFAULT_MAX_ROWS};
use pivotdash_core::summary::{self, Summary};
use pivotdash_core::{
    Cell, CellKey, DataModel, Matrix, MatrixOptions, NumberFormat, PeriodFilter, PeriodOrder,
    ProjectFilter, Trend, ViewMode,
};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::TableState;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;
use throbber_widgets_tui::ThrobberState;

use crate::config::Settings;

pub use tooltip::{TooltipContent, TooltipState, TREND_WIDTH};

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Summary,
    Logs,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::Summary, Tab::Logs];

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Summary => "Summary",
            Tab::Logs => "Logs",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Summary => 1,
            Tab::Logs => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// Open drill-down modal. The resolved cell is kept so toggling between
/// table and chart does not go back to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailModal {
    pub keys: Vec<CellKey>,
    pub cell: Cell,
    pub mode: DetailMode,
    pub view: DetailView,
}

impl DetailModal {
    pub fn title(&self) -> String {
        let mode = match self.mode {
            DetailMode::Table => "Detail",
            DetailMode::Chart => "Chart",
        };
        format!(" {} - {} ", mode, self.cell.display_name())
    }
}

/// Screen geometry recorded while rendering, used to map mouse clicks back
/// to matrix cells and the modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutHints {
    /// Matrix body, without borders and header row
    pub matrix_body: Rect,
    pub row_offset: usize,
    pub col_offset: usize,
    pub label_width: u16,
    pub col_width: u16,
    pub col_spacing: u16,
    pub visible_cols: usize,
    pub modal: Option<Rect>,
}

impl LayoutHints {
    /// Matrix (row, col) under a terminal position, if any.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        if !self.matrix_body.contains(Position::new(column, row)) || self.col_width == 0 {
            return None;
        }

        let x = column - self.matrix_body.x;
        let first_col_x = self.label_width + self.col_spacing;
        if x < first_col_x {
            return None;
        }
        let stride = self.col_width + self.col_spacing;
        let offset_in_cols = x - first_col_x;
        // Clicks on the gap between columns hit nothing
        if offset_in_cols % stride >= self.col_width {
            return None;
        }
        let visible_col = (offset_in_cols / stride) as usize;
        if visible_col >= self.visible_cols {
            return None;
        }

        let visible_row = (row - self.matrix_body.y) as usize;
        Some((self.row_offset + visible_row, self.col_offset + visible_col))
    }

    /// Screen area of a matrix cell, if it is currently visible.
    pub fn cell_rect(&self, row: usize, col: usize) -> Option<Rect> {
        let visible_row = row.checked_sub(self.row_offset)?;
        let visible_col = col.checked_sub(self.col_offset)?;
        if visible_row >= self.matrix_body.height as usize || visible_col >= self.visible_cols {
            return None;
        }

        let x = self.matrix_body.x
            + self.label_width
            + self.col_spacing
            + visible_col as u16 * (self.col_width + self.col_spacing);
        let y = self.matrix_body.y + visible_row as u16;
        Some(Rect::new(x, y, self.col_width, 1))
    }

    pub fn inside_modal(&self, column: u16, row: u16) -> bool {
        self.modal
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub source: Option<PathBuf>,
    pub model: Option<Arc<DataModel>>,
    pub loading: LoadingState,

    // Matrix options
    pub view_mode: ViewMode,
    pub period: PeriodFilter,
    pub project: ProjectFilter,
    pub max_rows: usize,
    pub max_cols: usize,
    pub number_format: NumberFormat,

    pub matrix: Matrix,
    pub cursor: Cursor,
    pub table_state: RefCell<TableState>,

    pub detail: Option<DetailModal>,
    pub tooltip: TooltipState,
    pub status: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            source: None,
            model: None,
            loading: LoadingState::default(),
            view_mode: ViewMode::default(),
            period: PeriodFilter::default(),
            project: ProjectFilter::default(),
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            number_format: NumberFormat::default(),
            matrix: Matrix::default(),
            cursor: Cursor::default(),
            table_state: RefCell::default(),
            detail: None,
            tooltip: TooltipState::default(),
            status: None,
        }
    }
}

impl DashboardState {
    pub fn matrix_options(&self) -> MatrixOptions {
        MatrixOptions::new()
            .view_mode(self.view_mode)
            .period(self.period.clone())
            .project(self.project.clone())
            .max_rows(self.max_rows)
            .max_cols(self.max_cols)
            .number_format(self.number_format.clone())
    }

    pub fn detail_options(&self) -> DetailOptions {
        DetailOptions {
            has_ppto: self.model.as_ref().is_some_and(|m| m.has_ppto()),
            has_prev: self.model.as_ref().is_some_and(|m| m.has_prev()),
            number_format: self.number_format.clone(),
            period_order: self.period_order(),
        }
    }

    /// Rebuild the matrix from scratch and keep the cursor inside it.
    pub fn rebuild_matrix(&mut self) {
        self.matrix = match &self.model {
            Some(model) => matrix::build(model, &self.matrix_options()),
            None => Matrix::default(),
        };
        // The builder may have fallen back to another view
        self.view_mode = self.matrix.view_mode;
        self.clamp_cursor();
    }

    pub fn clamp_cursor(&mut self) {
        let rows = self.matrix.num_rows();
        let cols = self.matrix.num_cols();
        self.cursor.row = self.cursor.row.min(rows.saturating_sub(1));
        self.cursor.col = self.cursor.col.min(cols.saturating_sub(1));
        self.table_state
            .borrow_mut()
            .select((rows > 0).then_some(self.cursor.row));
    }

    pub fn selected_cell(&self) -> Option<&MatrixCell> {
        self.matrix.cell(self.cursor.row, self.cursor.col)
    }

    /// Resolve a matrix cell to a single (possibly merged) payload cell.
    pub fn resolve(&self, row: usize, col: usize) -> Option<Cell> {
        let model = self.model.as_ref()?;
        let cell = self.matrix.cell(row, col)?;
        model.resolve(&cell.keys)
    }

    pub fn open_detail(&mut self, mode: DetailMode) -> bool {
        let Some(cell) = self.resolve(self.cursor.row, self.cursor.col) else {
            return false;
        };
        let keys = self
            .selected_cell()
            .map(|c| c.keys.clone())
            .unwrap_or_default();
        let view = detail::render_detail(&cell, mode, &self.detail_options());
        self.detail = Some(DetailModal {
            keys,
            cell,
            mode,
            view,
        });
        true
    }

    pub fn toggle_detail_mode(&mut self) {
        let options = self.detail_options();
        if let Some(modal) = self.detail.as_mut() {
            modal.mode = modal.mode.toggle();
            modal.view = detail::render_detail(&modal.cell, modal.mode, &options);
        }
    }

    /// Tooltip text for the cell under the cursor, if it holds a value.
    pub fn tooltip_content(&self) -> Option<TooltipContent> {
        let matrix_cell = self.selected_cell()?;
        matrix_cell.value?;

        let row = self.matrix.rows.get(self.cursor.row)?;
        let column = self.matrix.columns.get(self.cursor.col)?;
        let fmt = &self.number_format;

        let mut lines = vec![format!("Value: {}", matrix_cell.text)];
        if matrix_cell.keys.len() > 1 {
            lines.push(format!("Combined from {} cells", matrix_cell.keys.len()));
        }
        let cell = self.resolve(self.cursor.row, self.cursor.col);
        let order = self.period_order();

        if let Some(comparative) = cell.as_ref().and_then(|c| c.comparative(&order)) {
            if let Some(pct) = comparative.forecast_vs_budget_pct {
                lines.push(format!("Forecast / budget: {}", fmt.format_percent(pct)));
            }
            if let Some(pct) = comparative.actual_vs_forecast_pct {
                lines.push(format!("Actual / forecast: {}", fmt.format_percent(pct)));
            }
            if let Some(pending) = comparative.pending {
                lines.push(format!("Pending: {}", fmt.format(pending)));
            }
        }

        Some(TooltipContent {
            title: format!("{} / {}", row.label, column),
            lines,
            trend: cell.and_then(|c| Trend::for_cell(&c, &order, TREND_WIDTH)),
        })
    }

    pub fn period_order(&self) -> PeriodOrder {
        self.model
            .as_ref()
            .map(|m| m.period_order().clone())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> Summary {
        match &self.model {
            Some(model) => summary::summarize(model, &self.project),
            None => Summary::default(),
        }
    }

    pub fn periods(&self) -> &[String] {
        match &self.model {
            Some(model) => model.periods(),
            None => &[],
        }
    }

    pub fn projects(&self) -> &[String] {
        match &self.model {
            Some(model) if model.has_projects() => model.projects(),
            _ => &[],
        }
    }

    pub fn has_projects(&self) -> bool {
        self.model.as_ref().is_some_and(|m| m.has_projects())
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub active_tab: Tab,
    pub dashboard: DashboardState,
    pub logs: LogsState,
    pub export_dir: PathBuf,
    pub layout: RefCell<LayoutHints>,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: Tab::default(),
            dashboard: DashboardState::default(),
            logs: LogsState::default(),
            export_dir: PathBuf::from("."),
            layout: RefCell::default(),

            help_visible: false,
            pending_key: None,

            should_quit: false,
        }
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let mut state = Self::new();
        state.export_dir = settings.export_dir.clone();
        state.dashboard.max_rows = settings.max_rows;
        state.dashboard.max_cols = settings.max_cols;
        state.dashboard.number_format = settings.number_format.clone();
        state.dashboard.source = settings.payload_path.clone();
        state
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.dashboard.loading {
            LoadingState::Loading(ref mut throbber_state) => Some(throbber_state),
            _ => None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
