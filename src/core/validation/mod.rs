//! Validation and normalization of submitted record forms
//!
//! A form is submitted as one [`RawFormInput`], checked against every field
//! rule at once, and either becomes a [`RecordDetails`](crate::core::record::RecordDetails)
//! or a complete [`ValidationErrors`](crate::core::error::ValidationErrors) list.

pub mod filters;
pub mod form;
pub mod validators;

pub use form::{RawAmount, RawFormInput, RecordValidator};

use serde::Serialize;
use std::fmt;

/// Fields of the record form, as the presentation layer names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    PatientName,
    ContactNumber,
    Lenses,
    Amount,
    AdvanceAmount,
    PaymentMode,
    Attachment,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::PatientName => "patientName",
            FormField::ContactNumber => "contactNumber",
            FormField::Lenses => "lenses",
            FormField::Amount => "amount",
            FormField::AdvanceAmount => "advanceAmount",
            FormField::PaymentMode => "paymentMode",
            FormField::Attachment => "attachment",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
