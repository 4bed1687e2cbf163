//! Persistence collaborator for accepted records

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{SubsecRound, Utc};
use dashmap::DashMap;
use datum_types::Datum;
use tracing::trace;

use crate::Result;

/// Receives accepted, normalized records
pub trait DatumStore: Send + Sync {
    /// Persist `datum` and return it with its server-assigned fields set.
    ///
    /// # Errors
    ///
    /// Returns an error when the record cannot be persisted.
    fn store(&self, datum: Datum) -> Result<Datum>;

    /// Look up a stored record by id
    fn get(&self, id: &str) -> Option<Datum>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store backed by a concurrent map
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<String, Datum>,
    next_id: AtomicU64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored ids in ascending order
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        ids
    }
}

impl DatumStore for MemoryStore {
    fn store(&self, mut datum: Datum) -> Result<Datum> {
        let id = format!("{:016x}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let base = datum.base_mut();
        base.id = Some(id.clone());
        base.created_time = Some(Utc::now().trunc_subsecs(3));

        trace!(id = %id, "record stored");
        self.records.insert(id, datum.clone());
        Ok(datum)
    }

    fn get(&self, id: &str) -> Option<Datum> {
        self.records.get(id).map(|entry| entry.value().clone())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datum_ir::Value;
    use datum_structure::UnparsedKeys;
    use datum_types::DatumDecoder;
    use datum_validation::ValidationContext;
    use serde_json::json;

    fn datum() -> Datum {
        let source = Value::from(json!({"type": "bolus", "subType": "normal", "time": "2024-03-01T10:00:00Z", "normal": 1}));
        DatumDecoder::new()
            .unwrap()
            .decode_value(&ValidationContext::new(), &source, UnparsedKeys::Error)
            .unwrap()
    }

    #[test]
    fn test_store_assigns_server_fields() {
        let store = MemoryStore::new();
        let first = store.store(datum()).unwrap();
        let second = store.store(datum()).unwrap();

        assert_eq!(first.base().id.as_deref(), Some("0000000000000001"));
        assert_eq!(second.base().id.as_deref(), Some("0000000000000002"));
        assert!(first.base().created_time.is_some());
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("0000000000000002"), Some(second));
        assert_eq!(store.ids(), vec!["0000000000000001", "0000000000000002"]);
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.get("0000000000000001").is_none());
    }
}
