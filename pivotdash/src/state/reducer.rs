use super::{AppState, Cursor, LoadingState};
use crate::events::DataEvent;
use pivotdash_core::{PeriodFilter, ProjectFilter};

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::PayloadLoaded { model, path } => {
            let dashboard = &mut state.dashboard;

            dashboard.period = model
                .default_period()
                .map_or(PeriodFilter::All, |p| PeriodFilter::Period(p.to_string()));
            dashboard.project = ProjectFilter::All;
            dashboard.status = Some(if model.is_empty() {
                format!("{} contains no cell data", path.display())
            } else {
                format!("Loaded {} cells from {}", model.cell_count(), path.display())
            });
            dashboard.model = Some(model);
            dashboard.source = Some(path);
            dashboard.loading = LoadingState::Loaded;
            dashboard.cursor = Cursor::default();
            dashboard.detail = None;
            dashboard.tooltip.clear();
            dashboard.rebuild_matrix();

            tracing::info!(
                "Matrix ready: {} rows x {} columns",
                dashboard.matrix.num_rows(),
                dashboard.matrix.num_cols()
            );
        }

        DataEvent::LoadError { error } => {
            // A previously loaded model stays on screen
            state.dashboard.status = Some(format!("Failed to load payload: {}", error));
            state.dashboard.loading = LoadingState::Error(error);
        }

        DataEvent::ExportFinished { path, rows } => {
            state.dashboard.status = Some(format!("Exported {} rows to {}", rows, path.display()));
        }

        DataEvent::ExportFailed { error } => {
            state.dashboard.status = Some(format!("Export failed: {}", error));
        }
    }
}
