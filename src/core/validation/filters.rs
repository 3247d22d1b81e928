//! Reusable field filters
//!
//! These filters normalize raw form values before validation

/// Filter: trim surrounding whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Filter: trim, and drop the value entirely if nothing is left
pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Filter: trim and lowercase, for case-insensitive comparison
pub fn fold_case(value: &str) -> String {
    value.trim().to_lowercase()
}
