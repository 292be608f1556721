mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod query;
pub use query::Query;

mod update;
pub use update::Update;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Create a new record, returning it with its generated key.
    Insert(Insert),

    /// Delete every record matching the criteria.
    Delete(Delete),

    /// Read every record matching the criteria.
    Query(Query),

    /// Assign values to every record matching the criteria, returning the
    /// updated records.
    Update(Update),
}

impl Operation {
    /// The model the operation applies to.
    pub fn model(&self) -> &str {
        match self {
            Self::Insert(op) => &op.model,
            Self::Delete(op) => &op.model,
            Self::Query(op) => &op.model,
            Self::Update(op) => &op.model,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete(_))
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update(_))
    }

    pub fn as_update(&self) -> Option<&Update> {
        match self {
            Self::Update(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(op) => write!(f, "insert into `{}`", op.model),
            Self::Delete(op) => write!(f, "delete from `{}` where {}", op.model, op.criteria),
            Self::Query(op) => write!(f, "query `{}` where {}", op.model, op.criteria),
            Self::Update(op) => write!(f, "update `{}` where {}", op.model, op.criteria),
        }
    }
}
