use crate::{sync::fan_out, sync::Add, Db, Error, Result};

use relink_core::{
    schema::{AssociationKind, Model},
    stmt::{Criteria, Record, Value},
};

/// An in-memory record of a registered model.
///
/// An instance owns its field values and a queue of pending collection
/// links. Linking is staged with [`Instance::add`] and only reaches the store
/// when the instance is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    model: String,
    record: Record,
    pending: Vec<(String, Add)>,
}

impl Instance {
    pub fn new(model: impl Into<String>, record: Record) -> Self {
        Self {
            model: model.into(),
            record,
            pending: vec![],
        }
    }

    /// Build an instance from a JSON object.
    pub fn from_value(model: impl Into<String>, value: Value) -> Result<Self> {
        match value {
            Value::Object(record) => Ok(Self::new(model, record)),
            other => Err(Error::adhoc(format!(
                "an instance must be built from an object; got {other}"
            ))),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.record.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.record.insert(field.into(), value.into());
    }

    /// The primary key of the instance.
    pub fn key(&self, model: &Model) -> Result<&Value> {
        model
            .key_of(&self.record)
            .ok_or_else(|| Error::missing_primary_key(&model.name, &model.primary_key))
    }

    /// Stage a link on the collection `association`, applied by the next
    /// [`save`](Instance::save).
    pub fn add(&mut self, association: impl Into<String>, add: impl Into<Add>) {
        self.pending.push((association.into(), add.into()));
    }

    /// Links staged with [`add`](Instance::add) and not yet saved.
    pub fn pending(&self) -> &[(String, Add)] {
        &self.pending
    }

    /// Persist the instance.
    ///
    /// Writes the stored fields of the instance to its row, then applies the
    /// staged collection links concurrently. The staged links are consumed
    /// by the attempt: a failed save does not leave them queued for the next
    /// one.
    pub async fn save(&mut self, db: &Db) -> Result<()> {
        let model = db
            .schema()
            .model(&self.model)
            .ok_or_else(|| Error::invalid_schema(format!("model `{}` is not registered", self.model)))?;
        let key = self.key(model)?.clone();
        let pending = std::mem::take(&mut self.pending);

        let values: Record = self
            .record
            .iter()
            .filter(|(field, _)| model.is_stored(field))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();

        db.update(&model.name, Criteria::eq(&model.primary_key, key.clone()), values)
            .await?;

        let limit = db.config().max_concurrency;
        fan_out::try_join(
            limit,
            pending
                .iter()
                .map(|(association, add)| flush(db, model, &key, association, add)),
        )
        .await?;

        Ok(())
    }
}

async fn flush(db: &Db, model: &Model, key: &Value, name: &str, add: &Add) -> Result<()> {
    let Some(association) = db.schema().association(&model.name, name) else {
        tracing::debug!(model = %model.name, association = name, "skipping link on unresolved association");
        return Ok(());
    };
    let target = association.target;

    match (association.kind, add) {
        (AssociationKind::BelongsTo, _) => Err(Error::adhoc(format!(
            "`{}.{name}` is not a collection and cannot be linked with `add`",
            model.name
        ))),
        (AssociationKind::HasMany { via }, Add::Link(child)) => {
            let mut values = Record::new();
            values.insert(via.to_string(), key.clone());

            let linked = db
                .update(&target.name, Criteria::eq(&target.primary_key, child.clone()), values)
                .await?;
            if linked.is_empty() {
                tracing::warn!(model = %target.name, key = %child, "linked record does not exist");
            }
            Ok(())
        }
        (AssociationKind::HasMany { via }, Add::Create(record)) => {
            let mut record = record.clone();
            record.insert(via.to_string(), key.clone());
            db.create(&target.name, record).await?;
            Ok(())
        }
        (AssociationKind::ManyToMany { join, via, references }, add) => {
            let child = match add {
                Add::Link(child) => child.clone(),
                Add::Create(record) => {
                    let created = db.create(&target.name, record.clone()).await?;
                    target
                        .key_of(&created)
                        .cloned()
                        .ok_or_else(|| Error::missing_primary_key(&target.name, &target.primary_key))?
                }
            };

            let mut row = Record::new();
            row.insert(via.to_string(), key.clone());
            row.insert(references.to_string(), child);
            db.create(&join.name, row).await?;
            Ok(())
        }
    }
}
