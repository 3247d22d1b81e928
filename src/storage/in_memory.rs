//! In-memory implementation of RecordStore for a single session

use crate::core::error::StorageError;
use crate::core::record::{Record, RecordDetails, RecordId};
use crate::core::store::RecordStore;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory record store
///
/// Records live in a `Vec` behind an `RwLock`: inserts are serialized while
/// readers share access. Clones share the same collection.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<Vec<Record>>>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read("len")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read("is_empty")?.is_empty())
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, Vec<Record>>, StorageError> {
        self.records.read().map_err(|_| {
            tracing::warn!(operation, "record store lock poisoned");
            StorageError::LockPoisoned { operation }
        })
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, Vec<Record>>, StorageError> {
        self.records.write().map_err(|_| {
            tracing::warn!(operation, "record store lock poisoned");
            StorageError::LockPoisoned { operation }
        })
    }
}

impl RecordStore for InMemoryRecordStore {
    fn insert_at(
        &self,
        details: RecordDetails,
        created_at: DateTime<Utc>,
    ) -> Result<RecordId, StorageError> {
        let mut records = self.write("insert")?;

        let id = Uuid::new_v4();
        records.push(Record::new(id, created_at, details));

        tracing::info!(record_id = %id, created_at = %created_at, "record inserted");
        Ok(id)
    }

    fn all(&self) -> Result<Vec<Record>, StorageError> {
        Ok(self.read("all")?.clone())
    }

    fn get(&self, id: &RecordId) -> Result<Option<Record>, StorageError> {
        Ok(self.read("get")?.iter().find(|r| &r.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Attachment;
    use crate::core::validation::{RawFormInput, RecordValidator};
    use chrono::TimeZone;
    use std::thread;

    fn details(name: &str) -> RecordDetails {
        RecordValidator::default()
            .validate(RawFormInput {
                patient_name: name.to_string(),
                contact_number: "9876543210".to_string(),
                amount: Some("1500".into()),
                payment_mode: "Cash".to_string(),
                attachment: Some(Attachment::new("scan.jpg", "image/jpeg", 2048)),
                ..Default::default()
            })
            .unwrap()
    }

    fn poisoned_store() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        store.insert(details("Raj Kumar")).unwrap();

        let handle = store.clone();
        let result = thread::spawn(move || {
            let _guard = handle.records.write().unwrap();
            panic!("writer died while holding the lock");
        })
        .join();
        assert!(result.is_err());
        store
    }

    #[test]
    fn test_insert_appends_in_order() {
        let store = InMemoryRecordStore::new();
        let first = store.insert(details("Raj Kumar")).unwrap();
        let second = store.insert(details("Priya Sharma")).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first);
        assert_eq!(all[1].id, second);
        assert_ne!(first, second);
    }

    #[test]
    fn test_insert_at_keeps_backdated_timestamp() {
        let store = InMemoryRecordStore::new();
        let when = Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();
        let id = store.insert_at(details("Raj Kumar"), when).unwrap();

        let record = store.get(&id).unwrap().expect("record exists");
        assert_eq!(record.created_at, when);
        assert_eq!(record.patient_name(), "Raj Kumar");
    }

    #[test]
    fn test_get_unknown_id() {
        let store = InMemoryRecordStore::new();
        assert!(store.get(&Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = InMemoryRecordStore::new();
        store.insert(details("Raj Kumar")).unwrap();

        let mut snapshot = store.all().unwrap();
        snapshot.clear();

        assert_eq!(store.len().unwrap(), 1);
        assert!(!store.is_empty().unwrap());
    }

    #[test]
    fn test_clones_share_records() {
        let store = InMemoryRecordStore::new();
        let handle = store.clone();
        handle.insert(details("Amit Singh")).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_poisoned_lock_is_reported_not_panicked() {
        let store = poisoned_store();

        assert_eq!(
            store.insert(details("Priya Sharma")).unwrap_err(),
            StorageError::LockPoisoned { operation: "insert" }
        );
        assert_eq!(
            store.all().unwrap_err(),
            StorageError::LockPoisoned { operation: "all" }
        );
        assert_eq!(
            store.get(&Uuid::new_v4()).unwrap_err(),
            StorageError::LockPoisoned { operation: "get" }
        );
        assert_eq!(
            store.len().unwrap_err(),
            StorageError::LockPoisoned { operation: "len" }
        );
    }
}
