use std::path::PathBuf;
use std::sync::Arc;

use pivotdash_core::detail::DetailMode;
use pivotdash_core::DataModel;

use crate::state::Tab;

/// Commands to execute (user actions → state updates or background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Matrix cursor
    SelectNext,
    SelectPrevious,
    SelectLeft,
    SelectRight,
    NavigateToTop,
    NavigateToBottom,

    // Tabs
    NextTab,
    PreviousTab,
    SwitchTab(Tab),

    // Filters and view
    CyclePeriod {
        forward: bool,
    },
    CycleProject {
        forward: bool,
    },
    CycleViewMode,
    AdjustMaxRows {
        delta: i64,
    },
    AdjustMaxCols {
        delta: i64,
    },

    // Drill-down
    OpenDetail {
        mode: DetailMode,
    },
    OpenDetailAt {
        row: usize,
        col: usize,
    },
    ToggleDetailMode,
    CloseDetail,

    // Data
    LoadPayload {
        path: PathBuf,
    },
    ReloadPayload,
    ExportMatrix,

    ToggleHelp,

    // Log screen
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Events from background tasks (responses to commands)
#[derive(Debug, Clone)]
pub enum DataEvent {
    PayloadLoaded {
        model: Arc<DataModel>,
        path: PathBuf,
    },
    LoadError {
        error: String,
    },

    ExportFinished {
        path: PathBuf,
        rows: usize,
    },
    ExportFailed {
        error: String,
    },
}
