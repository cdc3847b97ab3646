//! Persisted history of finished rounds, most recent first.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// `YYYY-MM-DD`, local date.
    pub date: String,
    pub grade_set: String,
    pub mode: String,
    pub time_ms: u64,
}

impl HistoryRecord {
    pub fn today(grade_set: &str, mode: &str, time_ms: u64) -> Self {
        Self {
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            grade_set: grade_set.to_string(),
            mode: mode.to_string(),
            time_ms,
        }
    }
}

/// String key/value store (localStorage in the browser).
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct HistoryStore<S: Storage> {
    storage: S,
    key: String,
    cap: usize,
}

impl<S: Storage> HistoryStore<S> {
    pub fn new(storage: S, key: impl Into<String>, cap: usize) -> Self {
        Self {
            storage,
            key: key.into(),
            cap: cap.max(1),
        }
    }

    /// Never fails: absent, unreadable or corrupt data reads as empty.
    pub fn load(&self) -> Vec<HistoryRecord> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("history unavailable: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<HistoryRecord>>(&raw) {
            Ok(mut records) => {
                records.truncate(self.cap);
                records
            }
            Err(e) => {
                log::warn!("history corrupt, ignoring: {e}");
                Vec::new()
            }
        }
    }

    /// Prepend `record`, keep the newest `cap`, persist, and return the list.
    pub fn record(&self, record: HistoryRecord) -> Vec<HistoryRecord> {
        let mut merged = Vec::with_capacity(self.cap);
        merged.push(record);
        merged.extend(self.load());
        merged.truncate(self.cap);

        match serde_json::to_string(&merged) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&self.key, &json) {
                    log::warn!("history not saved: {e}");
                }
            }
            Err(e) => log::warn!("history not serialised: {e}"),
        }
        merged
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(ms: u64) -> HistoryRecord {
        HistoryRecord {
            date: "2024-04-01".into(),
            grade_set: "1年生".into(),
            mode: "5まい".into(),
            time_ms: ms,
        }
    }

    struct Broken;

    impl Storage for Broken {
        fn get(&self, _: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set(&self, _: &str, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota".into()))
        }
    }

    #[test]
    fn eleventh_record_evicts_oldest() {
        let store = HistoryStore::new(MemoryStorage::new(), "h", 10);
        for ms in 1..=11 {
            store.record(rec(ms));
        }
        let list = store.load();
        assert_eq!(list.len(), 10);
        assert_eq!(list.first().unwrap().time_ms, 11);
        assert_eq!(list.last().unwrap().time_ms, 2);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let store = HistoryStore::new(MemoryStorage::new(), "h", 10);
        store.record(rec(125_000));
        let raw = store.storage().get("h").unwrap().unwrap();
        assert!(raw.contains(r#""gradeSet":"1年生""#));
        assert!(raw.contains(r#""timeMs":125000"#));
    }

    #[test]
    fn corrupt_or_broken_storage_reads_empty() {
        let mem = MemoryStorage::new();
        mem.set("h", "{not json").unwrap();
        assert!(HistoryStore::new(mem, "h", 10).load().is_empty());

        let broken = HistoryStore::new(Broken, "h", 10);
        assert!(broken.load().is_empty());
        assert_eq!(broken.record(rec(1)).len(), 1);
    }

    #[test]
    fn today_uses_iso_date() {
        let r = HistoryRecord::today("1年生", "5まい", 10);
        assert_eq!(r.date.len(), 10);
        assert_eq!(&r.date[4..5], "-");
    }
}
