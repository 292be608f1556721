use super::*;

use crate::stmt::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Model to insert into
    pub model: String,

    /// Field values. A missing primary key is generated by the driver.
    pub values: Record,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
