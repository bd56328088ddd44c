use pivotdash_core::{export, DataModel, Matrix};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::events::DataEvent;

/// Runs file IO off the UI task and reports results as data events
#[derive(Clone)]
pub struct DataLoader {
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self { data_tx }
    }

    pub async fn load_payload(&self, path: PathBuf) {
        tracing::info!("Loading payload from {}", path.display());

        let event = match tokio::fs::read_to_string(&path).await {
            Ok(json) => match DataModel::from_json(&json) {
                Ok(model) => {
                    tracing::info!("Parsed payload with {} cells", model.cell_count());
                    DataEvent::PayloadLoaded {
                        model: Arc::new(model),
                        path,
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to parse payload {}: {}", path.display(), e);
                    DataEvent::LoadError {
                        error: e.to_string(),
                    }
                }
            },
            Err(e) => {
                tracing::error!("Failed to read payload {}: {}", path.display(), e);
                DataEvent::LoadError {
                    error: format!("{}: {}", path.display(), e),
                }
            }
        };

        let _ = self.data_tx.send(event);
    }

    pub async fn export_matrix(&self, matrix: Matrix, path: PathBuf) {
        let rows = matrix.num_rows();
        let result =
            tokio::task::spawn_blocking(move || export_blocking(&matrix, &path).map(|_| path))
                .await;

        let event = match result {
            Ok(Ok(path)) => DataEvent::ExportFinished { path, rows },
            Ok(Err(error)) => DataEvent::ExportFailed { error },
            Err(join_error) => {
                tracing::error!("Export task failed: {}", join_error);
                DataEvent::ExportFailed {
                    error: join_error.to_string(),
                }
            }
        };

        let _ = self.data_tx.send(event);
    }
}

/// Synchronous load used when no runtime is driving background tasks
pub fn load_blocking(path: &Path) -> DataEvent {
    match DataModel::load(path) {
        Ok(model) => DataEvent::PayloadLoaded {
            model: Arc::new(model),
            path: path.to_path_buf(),
        },
        Err(e) => {
            tracing::error!("Failed to load payload {}: {}", path.display(), e);
            DataEvent::LoadError {
                error: format!("{}: {}", path.display(), e),
            }
        }
    }
}

pub fn export_blocking(matrix: &Matrix, path: &Path) -> Result<(), String> {
    export::export_to_path(matrix, path).map_err(|e| {
        tracing::error!("Failed to export matrix to {}: {}", path.display(), e);
        e.to_string()
    })
}

/// Timestamped export file name inside `dir`
pub fn export_path(dir: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    dir.join(format!("pivotdash-{}.csv", timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_path_is_timestamped_csv() {
        let path = export_path(Path::new("/tmp/exports"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();

        assert!(path.starts_with("/tmp/exports"));
        assert!(name.starts_with("pivotdash-"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_load_blocking_reports_missing_file() {
        let event = load_blocking(Path::new("/definitely/not/here.json"));
        assert!(matches!(event, DataEvent::LoadError { .. }));
    }

    #[tokio::test]
    async fn test_load_payload_sends_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, r#"{"periods": ["2024-01"]}"#).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        DataLoader::new(tx).load_payload(path.clone()).await;

        match rx.recv().await {
            Some(DataEvent::PayloadLoaded { model, path: loaded }) => {
                assert_eq!(loaded, path);
                assert_eq!(model.default_period(), Some("2024-01"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
