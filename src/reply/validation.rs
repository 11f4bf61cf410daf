//! Generic payload and argument validation.
//!
//! One serde-backed layer applied at the dispatcher/reconciler boundary.
//! Command code never validates shapes inline; it receives already-typed
//! values or is never invoked.

use crate::reply::domain::ValidationError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Deserializes a persisted payload into the command's entry type.
///
/// # Errors
///
/// Returns [`ValidationError`] when the stored value does not match the
/// declared shape, a signal of store corruption or schema drift rather than
/// a transient condition.
pub fn validate_payload<T: DeserializeOwned>(
    subject: &str,
    raw: &Value,
) -> Result<T, ValidationError> {
    serde_json::from_value(raw.clone()).map_err(|err| ValidationError::new(subject, err.to_string()))
}

/// Serializes an entry for persistence.
///
/// # Errors
///
/// Returns [`ValidationError`] when the entry cannot be represented as JSON.
pub fn serialize_payload<T: Serialize>(subject: &str, entry: &T) -> Result<Value, ValidationError> {
    serde_json::to_value(entry).map_err(|err| ValidationError::new(subject, err.to_string()))
}

/// Converts raw string arguments into the command's typed argument set.
///
/// Argument structs declare `deny_unknown_fields`, so stray keys are rejected
/// here, before any command definition runs.
///
/// # Errors
///
/// Returns [`ValidationError`] when required arguments are missing, unknown
/// keys are present, or a value fails the declared shape.
pub fn validate_args<A: DeserializeOwned>(
    subject: &str,
    raw: &BTreeMap<String, String>,
) -> Result<A, ValidationError> {
    let object: serde_json::Map<String, Value> = raw
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    serde_json::from_value(Value::Object(object))
        .map_err(|err| ValidationError::new(subject, err.to_string()))
}
