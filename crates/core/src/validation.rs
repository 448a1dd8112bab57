//! Shallow presence validation for incoming documents.
//!
//! Only the presence of named fields is checked. Types and lengths are
//! left to the storage layer.

use serde_json::Value;

use crate::error::CoreError;

/// Whether `value` counts as "provided" for a required field.
///
/// `null`, a missing key and an empty string are treated as absent.
/// Whitespace-only strings count as provided.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Return the subset of `fields` that are absent from `document`.
pub fn missing_fields<'a>(document: &Value, fields: &[&'a str]) -> Vec<&'a str> {
    fields
        .iter()
        .copied()
        .filter(|field| !is_present(document.get(*field)))
        .collect()
}

/// Ensure every name in `fields` is present in `document`.
///
/// All missing fields are reported in a single error, in declaration order.
pub fn require_fields(entity: &str, document: &Value, fields: &[&str]) -> Result<(), CoreError> {
    let missing = missing_fields(document, fields);
    if missing.is_empty() {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "{entity} is missing required field(s): {}",
        missing.join(", ")
    )))
}
