//! Reusable field validators
//!
//! Each validator checks one rule for one field and reports a [`FieldError`]
//! carrying the field, the kind of violation and a message for the form.

use super::FormField;
use crate::core::error::{ErrorKind, FieldError};
use crate::core::record::PaymentMode;
use bigdecimal::{BigDecimal, Zero};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

/// Validator: value must be present
pub fn required<T>(field: FormField, value: Option<T>) -> Result<T, FieldError> {
    value.ok_or_else(|| {
        FieldError::new(
            field,
            ErrorKind::MissingField,
            format!("'{}' is required", field),
        )
    })
}

/// Validator: character count must be within range
pub fn char_length(field: FormField, value: &str, min: usize, max: usize) -> Result<(), FieldError> {
    let len = value.chars().count();
    if len < min || len > max {
        let bounds = if min == 0 {
            format!("at most {} characters", max)
        } else {
            format!("between {} and {} characters", min, max)
        };
        Err(FieldError::new(
            field,
            ErrorKind::OutOfRange,
            format!("'{}' must be {} (currently: {})", field, bounds, len),
        ))
    } else {
        Ok(())
    }
}

/// Validator: value must be exactly ten ASCII digits
pub fn contact_digits(field: FormField, value: &str) -> Result<(), FieldError> {
    static CONTACT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CONTACT_REGEX.get_or_init(|| {
        // `\d` would also accept non-ASCII digits
        Regex::new(r"^[0-9]{10}$").expect("contact number pattern is valid")
    });

    if regex.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::new(
            field,
            ErrorKind::FormatError,
            format!("'{}' must be exactly 10 digits", field),
        ))
    }
}

/// Validator: decimal must be strictly positive
///
/// Absent, non-numeric or exponent-form input fails as out of range.
pub fn positive_decimal(field: FormField, value: Option<&str>) -> Result<BigDecimal, FieldError> {
    match value.and_then(parse_decimal) {
        Some(num) if num > BigDecimal::zero() => Ok(num),
        _ => Err(FieldError::new(
            field,
            ErrorKind::OutOfRange,
            format!("'{}' must be a number greater than 0, with at most 2 decimals", field),
        )),
    }
}

/// Validator: decimal must be zero or positive
pub fn non_negative_decimal(field: FormField, value: &str) -> Result<BigDecimal, FieldError> {
    match parse_decimal(value) {
        Some(num) if num >= BigDecimal::zero() => Ok(num),
        _ => Err(FieldError::new(
            field,
            ErrorKind::OutOfRange,
            format!("'{}' must be a number of at least 0, with at most 2 decimals", field),
        )),
    }
}

/// Validator: value must name a payment mode
pub fn payment_mode(field: FormField, value: &str) -> Result<PaymentMode, FieldError> {
    value.parse().map_err(|_| {
        let allowed: Vec<&str> = PaymentMode::ALL.iter().map(PaymentMode::as_str).collect();
        FieldError::new(
            field,
            ErrorKind::InvalidEnum,
            format!("'{}' must be one of: {}", field, allowed.join(", ")),
        )
    })
}

/// Validator: MIME type must be in the allowed list (case-insensitive)
pub fn mime_type(field: FormField, value: &str, allowed: &[String]) -> Result<(), FieldError> {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(value.trim())) {
        Ok(())
    } else {
        Err(FieldError::new(
            field,
            ErrorKind::UnsupportedType,
            format!(
                "'{}' type '{}' is not accepted (allowed: {})",
                field,
                value,
                allowed.join(", ")
            ),
        ))
    }
}

/// Validator: size must not exceed `max` bytes
pub fn max_size(field: FormField, size: u64, max: u64) -> Result<(), FieldError> {
    if size > max {
        Err(FieldError::new(
            field,
            ErrorKind::TooLarge,
            format!("'{}' must not exceed {} bytes (size: {})", field, max, size),
        ))
    } else {
        Ok(())
    }
}

/// Plain decimal money text: digits with at most two fractional digits
///
/// Exponent forms such as `1e-50000000` are refused before parsing.
fn parse_decimal(value: &str) -> Option<BigDecimal> {
    static DECIMAL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DECIMAL_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").expect("decimal pattern is valid")
    });

    let value = value.trim();
    if !regex.is_match(value) {
        return None;
    }
    BigDecimal::from_str(value).ok()
}
