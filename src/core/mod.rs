//! Core module containing the record model, validation, filtering and store traits

pub mod error;
pub mod query;
pub mod record;
pub mod store;
pub mod validation;

pub use error::{
    ConfigError, ErrorKind, FieldError, QueryError, RecordsError, RecordsResult, StorageError,
    ValidationErrors,
};
pub use query::{DateRange, QueryResult, RecordQueryParams, query};
pub use record::{Attachment, PaymentMode, Record, RecordDetails, RecordId};
pub use store::RecordStore;
pub use validation::{FormField, RawAmount, RawFormInput, RecordValidator};
