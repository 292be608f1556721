//! Classification of desired association values into operations.

use crate::Instance;

use indexmap::IndexMap;
use relink_core::{
    schema::{Association, Model},
    stmt::{self, Criteria, Record, Value},
    Schema,
};

/// A record to link to a parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Add {
    /// Create the record, then link it
    Create(Record),

    /// Link the existing record with this primary key
    Link(Value),
}

impl Add {
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create(_))
    }
}

impl From<Record> for Add {
    fn from(record: Record) -> Self {
        Self::Create(record)
    }
}

/// Objects are created, anything else is taken as a primary key.
impl From<Value> for Add {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(record) => Self::Create(record),
            key => Self::Link(key),
        }
    }
}

/// Assign `values` to the single row of `model` matching `criteria`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOp {
    pub model: String,
    pub criteria: Criteria,
    pub values: Record,
}

/// Operations queued for one association.
#[derive(Debug, Clone)]
pub struct AssociationOps<'a> {
    pub association: Association<'a>,
    pub add: Vec<Add>,
    pub update: Vec<UpdateOp>,
}

impl<'a> AssociationOps<'a> {
    fn new(association: Association<'a>) -> Self {
        Self {
            association,
            add: vec![],
            update: vec![],
        }
    }

    pub fn name(&self) -> &'a str {
        self.association.name
    }
}

/// Operations for every association being synced, keyed by association name
/// in the order the associations were requested.
#[derive(Debug, Default)]
pub struct OperationSet<'a> {
    associations: IndexMap<&'a str, AssociationOps<'a>>,
}

impl<'a> OperationSet<'a> {
    pub fn get(&self, name: &str) -> Option<&AssociationOps<'a>> {
        self.associations.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssociationOps<'a>> {
        self.associations.values()
    }

    pub fn len(&self) -> usize {
        self.associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }
}

/// Build the operation set for `associations` of `model`.
///
/// Associations that are absent from `values`, set to `null`, or cannot be
/// resolved through the schema are skipped. Linking an existing record
/// through a belongs-to association writes its key on every parent right
/// away.
pub fn build<'a>(
    schema: &'a Schema,
    model: &Model,
    associations: &[&str],
    values: &Record,
    parents: &mut [Instance],
) -> OperationSet<'a> {
    let mut set = OperationSet::default();

    for &name in associations {
        let desired = match values.get(name) {
            None | Some(Value::Null) => continue,
            Some(desired) => desired,
        };

        let Some(association) = schema.association(&model.name, name) else {
            tracing::debug!(model = %model.name, association = name, "skipping unresolved association");
            continue;
        };

        if set.associations.contains_key(association.name) {
            continue;
        }

        let mut ops = AssociationOps::new(association);

        // The parent column is written back on save, so it must not keep
        // the old key unless an element sets it again.
        if association.is_belongs_to() {
            for parent in parents.iter_mut() {
                parent.set(association.name, Value::Null);
            }
        }

        let elements = match desired {
            Value::Array(elements) => &elements[..],
            single => std::slice::from_ref(single),
        };

        for element in elements {
            classify(&mut ops, element, parents);
        }

        tracing::debug!(
            association = name,
            add = ops.add.len(),
            update = ops.update.len(),
            "planned association"
        );
        set.associations.insert(association.name, ops);
    }

    set
}

fn classify(ops: &mut AssociationOps<'_>, element: &Value, parents: &mut [Instance]) {
    let target = ops.association.target;

    let key = match element {
        Value::Object(record) => match target.key_of(record) {
            Some(key) => {
                ops.update.push(UpdateOp {
                    model: target.name.clone(),
                    criteria: Criteria::eq(&target.primary_key, key.clone()),
                    values: record.clone(),
                });
                key.clone()
            }
            None => {
                ops.add.push(Add::Create(record.clone()));
                return;
            }
        },
        key if stmt::is_key(key) => key.clone(),
        other => {
            tracing::warn!(association = ops.name(), value = %other, "ignoring element that is neither a record nor a key");
            return;
        }
    };

    if ops.association.is_belongs_to() {
        for parent in parents.iter_mut() {
            parent.set(ops.name(), key.clone());
        }
    } else {
        ops.add.push(Add::Link(key));
    }
}
