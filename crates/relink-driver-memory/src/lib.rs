//! An in-memory driver.
//!
//! Rows live in a mutex-guarded map of tables. Every operation takes the lock
//! once and never awaits while holding it, so concurrent operations are
//! serialized but never deadlock.

use relink_core::{
    async_trait,
    driver::{operation, Driver, Operation, Response},
    schema::{AutoStrategy, Model},
    stmt::{Record, Value},
    Error, Result, Schema,
};

use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct Memory {
    store: Mutex<Store>,
}

#[derive(Debug, Default)]
struct Store {
    tables: IndexMap<String, Table>,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Record>,

    /// Last generated `Increment` key
    last_id: u64,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// Connect using a `memory:` URL. The in-memory store has no options, so
    /// this only validates the scheme.
    pub fn connect(url: &str) -> Result<Memory> {
        match url.split_once(':') {
            Some(("memory", _)) => Ok(Memory::new()),
            _ => Err(Error::adhoc(format!(
                "connection URL does not use the `memory` scheme; url={url}"
            ))),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| Error::adhoc("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl Driver for Memory {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        let mut store = self.lock()?;
        for model in schema.models() {
            store.tables.entry(model.name.clone()).or_default();
        }
        Ok(())
    }

    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> Result<Response> {
        let model = schema
            .model(op.model())
            .ok_or_else(|| Error::invalid_schema(format!("unknown model `{}`", op.model())))?;

        tracing::trace!(%op, "memory driver exec");

        let mut store = self.lock()?;
        let table = store.tables.entry(model.name.clone()).or_default();

        Ok(match op {
            Operation::Insert(op) => Response::records(vec![table.insert(model, op)?]),
            Operation::Update(op) => Response::records(table.update(model, op)),
            Operation::Delete(op) => Response::count(table.delete(op)),
            Operation::Query(op) => Response::records(
                table
                    .rows
                    .iter()
                    .filter(|row| op.criteria.matches(row))
                    .cloned()
                    .collect(),
            ),
        })
    }
}

impl Table {
    fn insert(&mut self, model: &Model, op: operation::Insert) -> Result<Record> {
        let mut row = op.values;

        let key = match model.key_of(&row) {
            Some(key) => key.clone(),
            None => {
                let key = self.generate_key(model)?;
                row.insert(model.primary_key.clone(), key.clone());
                key
            }
        };

        if let Value::Number(n) = &key {
            if let Some(n) = n.as_u64() {
                self.last_id = self.last_id.max(n);
            }
        }

        if self.find(model, &key).is_some() {
            return Err(Error::adhoc(format!(
                "duplicate primary key; model={}; key={key}",
                model.name
            )));
        }

        self.rows.push(row.clone());
        Ok(row)
    }

    fn update(&mut self, model: &Model, op: operation::Update) -> Vec<Record> {
        let mut updated = vec![];

        for row in self.rows.iter_mut().filter(|row| op.criteria.matches(row)) {
            for (field, value) in &op.values {
                // Primary keys are immutable
                if *field == model.primary_key {
                    continue;
                }
                row.insert(field.clone(), value.clone());
            }
            updated.push(row.clone());
        }

        updated
    }

    fn delete(&mut self, op: operation::Delete) -> u64 {
        let before = self.rows.len();
        self.rows.retain(|row| !op.criteria.matches(row));
        (before - self.rows.len()) as u64
    }

    fn find(&self, model: &Model, key: &Value) -> Option<&Record> {
        self.rows.iter().find(|row| model.key_of(row) == Some(key))
    }

    fn generate_key(&mut self, model: &Model) -> Result<Value> {
        match model.auto {
            Some(AutoStrategy::Increment) => {
                self.last_id += 1;
                Ok(Value::from(self.last_id))
            }
            Some(AutoStrategy::Uuid) => Ok(Value::from(uuid::Uuid::new_v4().to_string())),
            None => Err(Error::missing_primary_key(
                &model.name,
                &model.primary_key,
            )),
        }
    }
}
