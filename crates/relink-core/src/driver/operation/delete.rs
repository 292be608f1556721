use super::*;

use crate::stmt::Criteria;

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Model to delete from
    pub model: String,

    /// Which records to delete
    pub criteria: Criteria,
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
