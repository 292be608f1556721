use super::*;

use crate::stmt::{Criteria, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Model to update
    pub model: String,

    /// Which records to update
    pub criteria: Criteria,

    /// Values to assign. Fields not listed are left untouched.
    pub values: Record,
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
