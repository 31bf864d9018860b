//! Record representation shared by validation, projection and storage

use serde_json::{Map, Value};

/// Reserved key carrying the subtype of a polymorphic record
pub const DISCRIMINATOR: &str = "type";

/// A record is a plain JSON object keyed by field name
pub type Record = Map<String, Value>;

/// Get the discriminator value of a record if it is a non-empty string
pub fn record_type(record: &Record) -> Option<&str> {
    record
        .get(DISCRIMINATOR)
        .and_then(Value::as_str)
        .filter(|type_name| !type_name.is_empty())
}

/// Build a record from a JSON value
///
/// Returns `None` when the value is not an object.
pub fn record_from_value(value: Value) -> Option<Record> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
