pub mod loader;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Kinds of background work. At most one task of each kind runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskId {
    LoadPayload,
    Export,
}

/// Owns the join handles of in-flight payload loads and exports
#[derive(Default)]
pub struct BackgroundTaskManager {
    tasks: HashMap<TaskId, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `future` under `id`, aborting any earlier task of the same kind
    /// so a stale load can never overwrite a newer one.
    pub fn spawn_task<F>(&mut self, id: TaskId, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(previous) = self.tasks.insert(id, tokio::spawn(future)) {
            tracing::debug!(task = ?id, "Replacing running task");
            previous.abort();
        }
    }

    pub fn is_running(&self, id: TaskId) -> bool {
        self.tasks
            .get(&id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Abort everything still running (used on shutdown)
    pub fn cancel_all(&mut self) {
        self.tasks.drain().for_each(|(_, handle)| handle.abort());
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_id_aborts_previous_task() {
        let mut manager = BackgroundTaskManager::new();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let first = tx.clone();
        manager.spawn_task(TaskId::LoadPayload, async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            let _ = first.send("first");
        });
        manager.spawn_task(TaskId::LoadPayload, async move {
            let _ = tx.send("second");
        });

        assert_eq!(rx.recv().await, Some("second"));
        // Both senders are gone once the first task is aborted
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_cancel_all_stops_tasks() {
        let mut manager = BackgroundTaskManager::new();
        manager.spawn_task(TaskId::Export, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        assert!(manager.is_running(TaskId::Export));

        manager.cancel_all();
        assert!(!manager.is_running(TaskId::Export));
        assert!(!manager.is_running(TaskId::LoadPayload));
    }
}
