//! Store trait owning the session's records

use crate::core::error::{RecordsResult, StorageError};
use crate::core::query::{self, DateRange, QueryResult};
use crate::core::record::{Record, RecordDetails, RecordId};
use chrono::{DateTime, Utc};

/// Ordered collection of records with a single-writer discipline
///
/// Implementations assign a fresh, never reused id to every inserted record
/// and keep records in insertion order. A durable backend only needs to
/// provide `insert_at`, `all` and `get`.
pub trait RecordStore: Send + Sync {
    /// Append a record created at `created_at` and return its id
    ///
    /// `created_at` may lie in the past (backdated entries).
    fn insert_at(
        &self,
        details: RecordDetails,
        created_at: DateTime<Utc>,
    ) -> Result<RecordId, StorageError>;

    /// Snapshot of every record, in insertion order
    fn all(&self) -> Result<Vec<Record>, StorageError>;

    /// Look up a single record
    fn get(&self, id: &RecordId) -> Result<Option<Record>, StorageError>;

    /// Append a record created now and return its id
    fn insert(&self, details: RecordDetails) -> Result<RecordId, StorageError> {
        self.insert_at(details, Utc::now())
    }

    /// Filter the current collection, see [`query::query`]
    fn query(&self, range: &DateRange, search_term: &str) -> RecordsResult<QueryResult> {
        let records = self.all()?;
        Ok(query::query(&records, range, search_term)?)
    }
}
