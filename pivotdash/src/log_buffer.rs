use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::Level;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Local::now(),
            level,
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Thread-safe ring buffer of the session's log entries, shown on the Logs tab
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    max_entries: usize,
}

impl LogBuffer {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_entries))),
            max_entries,
        }
    }

    pub fn push(&self, entry: LogEntry) {
        // A panic while holding the lock leaves the deque itself intact
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.max_entries {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Entries in `[start, end)`, oldest first
    pub fn window(&self, start: usize, end: usize) -> Vec<LogEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let end = end.min(entries.len());
        entries
            .range(start.min(end)..end)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_entries_are_dropped() {
        let buffer = LogBuffer::new(2);
        buffer.push(LogEntry::new(Level::INFO, "t", "one"));
        buffer.push(LogEntry::new(Level::INFO, "t", "two"));
        buffer.push(LogEntry::new(Level::WARN, "t", "three"));

        let messages: Vec<String> = buffer.window(0, 10).into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_window_clamps_bounds() {
        let buffer = LogBuffer::new(10);
        assert!(buffer.is_empty());
        buffer.push(LogEntry::new(Level::INFO, "t", "one"));

        assert_eq!(buffer.window(5, 10).len(), 0);
        assert_eq!(buffer.window(0, 1).len(), 1);
    }
}
