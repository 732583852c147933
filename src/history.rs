//! Bounded log of completed calculations, newest first.

use std::collections::VecDeque;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the log.
pub const HISTORY_LIMIT: usize = 50;

/// Identifier of a history entry, unique and increasing within one log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(u64);

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A completed calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    /// `"<operand> <operator> <operand>"` as typed.
    pub expression: String,
    pub result: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// Completed calculations, newest first.
#[derive(Clone, Debug, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed calculation at the front of the log, evicting the
    /// oldest entry past [`HISTORY_LIMIT`].
    pub fn record(&mut self, expression: String, result: String) -> &HistoryEntry {
        let entry = HistoryEntry {
            id: HistoryId(self.next_id),
            expression,
            result,
            timestamp: now_millis(),
        };
        self.next_id += 1;
        self.push(entry)
    }

    fn push(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_LIMIT);
        &self.entries[0]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entry at a display position (0 is the newest).
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = HistoryLog::new();
        log.record("1 + 1".into(), "2".into());
        log.record("2 + 2".into(), "4".into());

        let results: Vec<&str> = log.iter().map(|e| e.result.as_str()).collect();
        assert_eq!(results, vec!["4", "2"]);
        assert_eq!(log.get(1).map(|e| e.expression.as_str()), Some("1 + 1"));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut log = HistoryLog::new();
        for i in 0..=HISTORY_LIMIT {
            log.record(format!("{} + 0", i), i.to_string());
        }

        assert_eq!(log.len(), HISTORY_LIMIT);
        assert!(log.iter().all(|e| e.result != "0"));
        assert_eq!(log.get(0).map(|e| e.result.as_str()), Some("50"));
        assert_eq!(log.get(HISTORY_LIMIT - 1).map(|e| e.result.as_str()), Some("1"));
    }

    #[test]
    fn test_ids_unique_under_rapid_insertion() {
        let mut log = HistoryLog::new();
        for _ in 0..10 {
            log.record("1 + 1".into(), "2".into());
        }

        let mut ids: Vec<HistoryId> = log.iter().map(|e| e.id).collect();
        ids.reverse();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_clear() {
        let mut log = HistoryLog::new();
        log.record("1 + 1".into(), "2".into());
        log.clear();
        assert!(log.is_empty());

        // Ids keep increasing after a clear.
        let id = log.record("3 + 3".into(), "6".into()).id;
        assert_eq!(id, HistoryId(1));
    }

    #[test]
    fn test_entry_serializes() {
        let mut log = HistoryLog::new();
        log.record("6 × 7".into(), "42".into());
        let json = serde_json::to_value(log.get(0).unwrap()).unwrap();
        assert_eq!(json["id"], 0);
        assert_eq!(json["expression"], "6 × 7");
        assert_eq!(json["result"], "42");
    }
}
