//! Records API demo
//!
//! Seeds the sample patients shown on the records page and serves the REST API.
//!
//! ```text
//! RECORDS_CONFIG=records.yaml RUST_LOG=optica=debug cargo run --example records_api
//! curl 'http://127.0.0.1:8000/api/records?from=2024-07-01&to=2024-07-31'
//! ```

use anyhow::Result;
use optica::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("optica=info,tower_http=info")),
        )
        .init();

    let config = match std::env::var("RECORDS_CONFIG") {
        Ok(path) => RecordsConfig::from_yaml_file(&path)?,
        Err(_) => RecordsConfig::default(),
    };

    let store = InMemoryRecordStore::new();
    seed(&store, &RecordValidator::new(config.validation.clone()))?;
    tracing::info!(records = store.len()?, "sample records loaded");

    ServerBuilder::new()
        .with_store(store)
        .with_config(config)
        .serve()
        .await
}

fn seed(store: &InMemoryRecordStore, validator: &RecordValidator) -> Result<()> {
    let samples = [
        ("Raj Kumar", "9876543210", "prescription_1.jpg", "image/jpeg", "2500", "GPay", (2024, 7, 15)),
        ("Priya Sharma", "8765432109", "lenses_order.png", "image/png", "3200", "PhonePe", (2024, 7, 20)),
        ("Amit Singh", "7654321098", "eye_test.jpg", "image/jpeg", "1800", "Cash", (2024, 8, 5)),
    ];

    for (name, contact, file, mime, amount, mode, (y, m, d)) in samples {
        let details = validator.validate(RawFormInput {
            patient_name: name.to_string(),
            contact_number: contact.to_string(),
            amount: Some(amount.into()),
            payment_mode: mode.to_string(),
            attachment: Some(Attachment::new(file, mime, 64 * 1024)),
            ..Default::default()
        })?;

        let created_at = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| anyhow::anyhow!("invalid sample date {y}-{m}-{d}"))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("invalid sample time"))?
            .and_utc();
        store.insert_at(details, created_at)?;
    }

    Ok(())
}
