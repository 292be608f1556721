//! Values, records and the criteria used to address rows.

mod criteria;
pub use criteria::Criteria;

pub use serde_json::Value;

/// A record: field name to value, in insertion order.
pub type Record = serde_json::Map<String, Value>;

/// Returns `true` if `value` can address a row by key: a string, number or
/// boolean. Objects, arrays and `null` cannot.
pub fn is_key(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}
