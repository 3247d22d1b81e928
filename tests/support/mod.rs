//! Shared fixtures for the record integration tests

#![allow(dead_code)]

use optica::prelude::*;
use std::str::FromStr;

/// A form that passes every rule
pub fn valid_input() -> RawFormInput {
    RawFormInput {
        patient_name: "Raj Kumar".to_string(),
        contact_number: "9876543210".to_string(),
        lenses: Some("Single vision, blue cut".to_string()),
        amount: Some("2500".into()),
        advance_amount: Some("500".into()),
        payment_mode: "GPay".to_string(),
        attachment: Some(Attachment::new("prescription_1.jpg", "image/jpeg", 48_213)),
    }
}

pub fn decimal(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).expect("test decimal literal")
}

pub fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("test date literal")
        .and_utc()
}

/// Validated details with a fixed attachment and no lenses
pub fn details(name: &str, contact: &str, amount: &str, advance: &str, mode: PaymentMode) -> RecordDetails {
    RecordValidator::default()
        .validate(RawFormInput {
            patient_name: name.to_string(),
            contact_number: contact.to_string(),
            lenses: None,
            amount: Some(amount.into()),
            advance_amount: Some(advance.into()),
            payment_mode: mode.to_string(),
            attachment: Some(Attachment::new("scan.jpg", "image/jpeg", 4096)),
        })
        .expect("fixture details are valid")
}

/// The three sample patients of the records page
pub fn sample_store() -> InMemoryRecordStore {
    let store = InMemoryRecordStore::new();
    store
        .insert_at(
            details("Raj Kumar", "9876543210", "2500", "500", PaymentMode::GPay),
            midnight(2024, 7, 15),
        )
        .expect("insert sample");
    store
        .insert_at(
            details("Priya Sharma", "8765432109", "3200", "0", PaymentMode::PhonePe),
            midnight(2024, 7, 20),
        )
        .expect("insert sample");
    store
        .insert_at(
            details("Amit Singh", "7654321098", "1800", "1800", PaymentMode::Cash),
            midnight(2024, 8, 5),
        )
        .expect("insert sample");
    store
}

pub fn july_2024() -> DateRange {
    DateRange::new(midnight(2024, 7, 1), midnight(2024, 7, 31))
}
