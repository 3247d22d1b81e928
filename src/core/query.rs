//! Date-range and search filtering over records, with aggregate totals

use crate::core::error::QueryError;
use crate::core::record::Record;
use crate::core::validation::filters::fold_case;
use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive window on `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// The month leading up to `now`, the window the records page opens with
    pub fn trailing_month(now: DateTime<Utc>) -> Self {
        let from = now.checked_sub_months(Months::new(1)).unwrap_or(now);
        Self { from, to: now }
    }

    /// Whole calendar days, from the first instant of `from` to the last of `to`
    pub fn for_day_span(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: start_of_day(from),
            to: end_of_day(to),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }

    /// Reject a window whose bounds are inverted
    pub fn check(&self) -> Result<(), QueryError> {
        if self.from > self.to {
            return Err(QueryError::InvalidRange {
                from: self.from,
                to: self.to,
            });
        }
        Ok(())
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + TimeDelta::days(1) - TimeDelta::nanoseconds(1)
}

/// The visible subset of a collection plus its totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Matching records, in collection order
    pub matches: Vec<Record>,

    /// Sum of `amount` over `matches`
    pub total_amount: BigDecimal,

    /// Sum of `advance_amount` over `matches`
    pub total_advance: BigDecimal,
}

impl QueryResult {
    pub fn count(&self) -> usize {
        self.matches.len()
    }

    /// Outstanding total after advances
    pub fn balance_due(&self) -> BigDecimal {
        &self.total_amount - &self.total_advance
    }
}

/// Derive the records visible for `range` and `search_term`
///
/// A record is kept when its `created_at` lies within `range` (both bounds
/// inclusive) and, unless the trimmed search term is empty, the term occurs in
/// the patient name (case-insensitive), the contact number, or the payment
/// mode (case-insensitive). The input collection is never modified and its
/// order is preserved.
pub fn query(
    records: &[Record],
    range: &DateRange,
    search_term: &str,
) -> Result<QueryResult, QueryError> {
    range.check()?;

    let needle = search_term.trim();
    let folded = fold_case(needle);

    let matches: Vec<Record> = records
        .iter()
        .filter(|record| range.contains(record.created_at))
        .filter(|record| needle.is_empty() || matches_search(record, needle, &folded))
        .cloned()
        .collect();

    let (total_amount, total_advance) = matches.iter().fold(
        (BigDecimal::zero(), BigDecimal::zero()),
        |(amount, advance), record| {
            (
                amount + record.amount(),
                advance + record.advance_amount(),
            )
        },
    );

    tracing::debug!(
        scanned = records.len(),
        matched = matches.len(),
        from = %range.from,
        to = %range.to,
        "records query derived"
    );

    Ok(QueryResult {
        matches,
        total_amount,
        total_advance,
    })
}

fn matches_search(record: &Record, needle: &str, folded: &str) -> bool {
    fold_case(record.patient_name()).contains(folded)
        || record.contact_number().contains(needle)
        || fold_case(record.payment_mode().as_str()).contains(folded)
}

/// Query string of `GET /api/records`
///
/// Bounds accept RFC 3339 timestamps or plain `YYYY-MM-DD` dates; a plain
/// `from` date means the start of that day and a plain `to` date its end.
/// Missing bounds fall back to the trailing month.
///
/// # Example
/// ```text
/// GET /api/records?from=2024-07-01&to=2024-07-31&search=gpay
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecordQueryParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub search: Option<String>,
}

impl RecordQueryParams {
    /// Resolve the requested window, defaulting around `now`
    pub fn date_range(&self, now: DateTime<Utc>) -> Result<DateRange, QueryError> {
        let default = DateRange::trailing_month(now);
        let from = match self.from.as_deref() {
            Some(raw) => parse_bound(raw, start_of_day)?,
            None => default.from,
        };
        let to = match self.to.as_deref() {
            Some(raw) => parse_bound(raw, end_of_day)?,
            None => default.to,
        };
        Ok(DateRange::new(from, to))
    }

    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

fn parse_bound(
    raw: &str,
    from_date: fn(NaiveDate) -> DateTime<Utc>,
) -> Result<DateTime<Utc>, QueryError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(from_date)
        .map_err(|_| QueryError::InvalidTimestamp {
            value: raw.to_string(),
        })
}
