//! # Optica Records
//!
//! Patient record core for an optical-shop management tool: form validation,
//! an ordered in-memory record store, and date-range/search filtering with
//! aggregate totals.
//!
//! ## Features
//!
//! - **Complete validation**: every field rule is checked and all violations
//!   are reported at once, each addressed to its form field
//! - **Cross-field rules**: an advance can never exceed the invoiced amount
//! - **Deterministic queries**: inclusive date windows, case-insensitive search,
//!   stable ordering and exact decimal totals
//! - **Pluggable storage**: the store is a trait; an in-memory implementation
//!   is provided
//! - **REST exposure**: an Axum router serving the same operations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use optica::prelude::*;
//!
//! let validator = RecordValidator::default();
//! let store = InMemoryRecordStore::new();
//!
//! let details = validator.validate(RawFormInput {
//!     patient_name: "Raj Kumar".to_string(),
//!     contact_number: "9876543210".to_string(),
//!     amount: Some("2500".into()),
//!     payment_mode: "GPay".to_string(),
//!     attachment: Some(Attachment::new("prescription_1.jpg", "image/jpeg", 48_213)),
//!     ..Default::default()
//! })?;
//! store.insert(details)?;
//!
//! let view = store.query(&DateRange::trailing_month(Utc::now()), "gpay")?;
//! println!("{} records, total {}", view.count(), view.total_amount);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigError, ErrorKind, FieldError, QueryError, RecordsError, RecordsResult,
            StorageError, ValidationErrors,
        },
        query::{DateRange, QueryResult, RecordQueryParams, query},
        record::{Attachment, PaymentMode, Record, RecordDetails, RecordId},
        store::RecordStore,
        validation::{FormField, RawAmount, RawFormInput, RecordValidator},
    };

    // === Storage ===
    pub use crate::storage::InMemoryRecordStore;

    // === Config ===
    pub use crate::config::{RecordsConfig, ServerConfig, ValidationLimits};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use bigdecimal::BigDecimal;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use uuid::Uuid;
}
