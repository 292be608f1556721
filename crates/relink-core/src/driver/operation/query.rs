use super::*;

use crate::stmt::Criteria;

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Model to read
    pub model: String,

    /// Which records to return
    pub criteria: Criteria,
}

impl From<Query> for Operation {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}
