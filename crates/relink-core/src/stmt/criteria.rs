use super::{Record, Value};

use indexmap::IndexMap;
use std::fmt;

/// A conjunction of field equalities scoping an update, destroy or query.
///
/// `null` matches both an explicit `null` and a missing field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    filter: IndexMap<String, Value>,
}

impl Criteria {
    /// Match rows whose `field` equals `value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::default().and_eq(field, value)
    }

    /// Match every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.filter.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.filter.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.filter
            .iter()
            .all(|(field, expected)| record.get(field).unwrap_or(&Value::Null) == expected)
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.filter.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {value}")?;
        }
        f.write_str("}")
    }
}
