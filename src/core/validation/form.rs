//! Record form input and its validator

use super::{FormField, filters, validators};
use crate::config::ValidationLimits;
use crate::core::error::{ErrorKind, FieldError, ValidationErrors};
use crate::core::record::{Attachment, RecordDetails};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// A money field as typed into the form: either a JSON number or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl RawAmount {
    pub fn to_text(&self) -> String {
        match self {
            RawAmount::Number(n) => n.to_string(),
            RawAmount::Text(s) => s.clone(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, RawAmount::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<&BigDecimal> for RawAmount {
    fn from(value: &BigDecimal) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// Everything the record form submits, accumulated by the caller and
/// handed over in one piece
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFormInput {
    pub patient_name: String,
    pub contact_number: String,
    pub lenses: Option<String>,
    pub amount: Option<RawAmount>,
    pub advance_amount: Option<RawAmount>,
    pub payment_mode: String,
    pub attachment: Option<Attachment>,
}

impl From<&RecordDetails> for RawFormInput {
    fn from(details: &RecordDetails) -> Self {
        Self {
            patient_name: details.patient_name().to_string(),
            contact_number: details.contact_number().to_string(),
            lenses: details.lens_description().map(str::to_string),
            amount: Some(RawAmount::from(details.amount())),
            advance_amount: Some(RawAmount::from(details.advance_amount())),
            payment_mode: details.payment_mode().as_str().to_string(),
            attachment: Some(details.attachment().clone()),
        }
    }
}

/// Gate between untrusted form input and the record store
///
/// Every field rule is evaluated; a rejected form reports all of its
/// violations at once, in form order.
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    limits: ValidationLimits,
}

impl RecordValidator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validate a submitted form
    ///
    /// The advance is checked against the amount only when both passed their
    /// own rules.
    pub fn validate(&self, input: RawFormInput) -> Result<RecordDetails, ValidationErrors> {
        let limits = &self.limits;
        let mut errors = Vec::new();

        let patient_name = filters::trim(&input.patient_name);
        accept(
            &mut errors,
            validators::char_length(
                FormField::PatientName,
                &patient_name,
                limits.patient_name_min,
                limits.patient_name_max,
            ),
        );

        let contact_number = filters::trim(&input.contact_number);
        accept(
            &mut errors,
            validators::contact_digits(FormField::ContactNumber, &contact_number),
        );

        let lens_description = filters::blank_to_none(input.lenses.as_deref());
        if let Some(lenses) = &lens_description {
            accept(
                &mut errors,
                validators::char_length(FormField::Lenses, lenses, 0, limits.lenses_max),
            );
        }

        let amount_text = input.amount.as_ref().map(RawAmount::to_text);
        let amount = accept(
            &mut errors,
            validators::positive_decimal(FormField::Amount, amount_text.as_deref()),
        );

        let advance_amount = match input.advance_amount.filter(|raw| !raw.is_blank()) {
            None => Some(BigDecimal::zero()),
            Some(raw) => accept(
                &mut errors,
                validators::non_negative_decimal(FormField::AdvanceAmount, &raw.to_text()),
            ),
        };

        let payment_mode = accept(
            &mut errors,
            validators::payment_mode(FormField::PaymentMode, input.payment_mode.trim()),
        );

        let attachment = accept(
            &mut errors,
            validators::required(FormField::Attachment, input.attachment),
        )
        .and_then(|attachment| self.check_attachment(&mut errors, attachment));

        if let (Some(amount), Some(advance)) = (&amount, &advance_amount) {
            if advance > amount {
                errors.push(FieldError::new(
                    FormField::AdvanceAmount,
                    ErrorKind::CrossFieldViolation,
                    format!(
                        "'{}' ({}) must not exceed '{}' ({})",
                        FormField::AdvanceAmount,
                        advance,
                        FormField::Amount,
                        amount
                    ),
                ));
            }
        }

        match (amount, advance_amount, payment_mode, attachment) {
            (Some(amount), Some(advance_amount), Some(payment_mode), Some(attachment))
                if errors.is_empty() =>
            {
                Ok(RecordDetails::new(
                    patient_name,
                    contact_number,
                    lens_description,
                    attachment,
                    amount,
                    advance_amount,
                    payment_mode,
                ))
            }
            _ => {
                tracing::debug!(
                    violations = errors.len(),
                    fields = ?errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
                    "record form rejected"
                );
                Err(ValidationErrors::new(errors))
            }
        }
    }

    /// Type and size are checked independently; both may fail
    fn check_attachment(
        &self,
        errors: &mut Vec<FieldError>,
        attachment: Attachment,
    ) -> Option<Attachment> {
        let type_ok = accept(
            errors,
            validators::mime_type(
                FormField::Attachment,
                &attachment.mime_type,
                &self.limits.allowed_mime_types,
            ),
        )
        .is_some();
        let size_ok = accept(
            errors,
            validators::max_size(
                FormField::Attachment,
                attachment.size_bytes,
                self.limits.attachment_max_bytes,
            ),
        )
        .is_some();

        (type_ok && size_ok).then(|| Attachment {
            file_name: filters::trim(&attachment.file_name),
            mime_type: attachment.mime_type.trim().to_ascii_lowercase(),
            size_bytes: attachment.size_bytes,
        })
    }
}

/// Keep a validator's value, or record its error
fn accept<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}
