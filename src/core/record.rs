//! Patient record types

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Identifier assigned to a record when it enters a store
pub type RecordId = Uuid;

/// Accepted ways of settling an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    PhonePe,
    GPay,
    Cash,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 3] = [PaymentMode::PhonePe, PaymentMode::GPay, PaymentMode::Cash];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::PhonePe => "PhonePe",
            PaymentMode::GPay => "GPay",
            PaymentMode::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`PaymentMode`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment mode '{0}'")]
pub struct UnknownPaymentMode(pub String);

impl FromStr for PaymentMode {
    type Err = UnknownPaymentMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownPaymentMode(s.to_string()))
    }
}

/// Metadata of the prescription scan uploaded with a record
///
/// The file content lives with an external blob service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// Validated content of a record, before the store assigns identity
///
/// Only [`RecordValidator`](crate::core::validation::RecordValidator) builds
/// these, so `advance_amount <= amount` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDetails {
    patient_name: String,
    contact_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lens_description: Option<String>,
    attachment: Attachment,
    amount: BigDecimal,
    advance_amount: BigDecimal,
    payment_mode: PaymentMode,
}

impl RecordDetails {
    pub(crate) fn new(
        patient_name: String,
        contact_number: String,
        lens_description: Option<String>,
        attachment: Attachment,
        amount: BigDecimal,
        advance_amount: BigDecimal,
        payment_mode: PaymentMode,
    ) -> Self {
        Self {
            patient_name,
            contact_number,
            lens_description,
            attachment,
            amount,
            advance_amount,
            payment_mode,
        }
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn contact_number(&self) -> &str {
        &self.contact_number
    }

    pub fn lens_description(&self) -> Option<&str> {
        self.lens_description.as_deref()
    }

    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }

    pub fn advance_amount(&self) -> &BigDecimal {
        &self.advance_amount
    }

    pub fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    /// Amount still owed after the advance
    pub fn balance_due(&self) -> BigDecimal {
        &self.amount - &self.advance_amount
    }
}

/// A patient record held by a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: RecordDetails,
}

impl Record {
    pub fn new(id: RecordId, created_at: DateTime<Utc>, details: RecordDetails) -> Self {
        Self {
            id,
            created_at,
            details,
        }
    }

    pub fn patient_name(&self) -> &str {
        self.details.patient_name()
    }

    pub fn contact_number(&self) -> &str {
        self.details.contact_number()
    }

    pub fn payment_mode(&self) -> PaymentMode {
        self.details.payment_mode()
    }

    pub fn amount(&self) -> &BigDecimal {
        self.details.amount()
    }

    pub fn advance_amount(&self) -> &BigDecimal {
        self.details.advance_amount()
    }
}
