//! Bounded, newest-first search history.

use std::collections::VecDeque;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::types::Timestamp;

/// Number of searches retained before the oldest are dropped.
pub const HISTORY_CAPACITY: usize = 50;

/// One recorded search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub keyword: String,
    pub timestamp: Timestamp,
    pub result_count: usize,
}

/// Thread-safe search log. Index 0 is always the most recent search.
pub struct SearchHistory {
    entries: RwLock<VecDeque<HistoryEntry>>,
    capacity: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Prepend a search, evicting the oldest entries beyond capacity.
    pub async fn record(&self, keyword: impl Into<String>, result_count: usize) -> HistoryEntry {
        let entry = HistoryEntry {
            keyword: keyword.into(),
            timestamp: chrono::Utc::now(),
            result_count,
        };
        let mut entries = self.entries.write().await;
        entries.push_front(entry.clone());
        entries.truncate(self.capacity);
        entry
    }

    /// The `limit` most recent entries, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries
            .read()
            .await
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
