mod builder;
pub use builder::Builder;

mod config;
pub use config::Config;

use crate::{driver::Operation, sync, Instance, Result};

use relink_core::{
    driver::{operation, Driver, Response},
    stmt::{Criteria, Record},
    Schema,
};

use std::sync::Arc;

/// A handle to a store plus the schema describing it.
///
/// Cloning is cheap; clones share the driver and schema.
#[derive(Debug, Clone)]
pub struct Db {
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) schema: Arc<Schema>,
    pub(crate) config: Arc<Config>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reconcile the associations of `parents` with `values`.
    ///
    /// For every association named in `associations` that has a non-null
    /// entry in `values`, the set of records linked to each parent is
    /// replaced by exactly the desired set. Records carrying a primary key
    /// are updated and relinked; records without one are created and
    /// linked; every other previously linked record is unlinked.
    ///
    /// All parents must be of the same model and carry a primary key. On
    /// failure the first error is returned and work already done is left in
    /// place.
    pub async fn sync(
        &self,
        parents: &mut [Instance],
        values: &Record,
        associations: &[&str],
    ) -> Result<()> {
        sync::apply(self, parents, values, associations).await
    }

    /// Execute a raw driver operation.
    pub async fn exec(&self, op: Operation) -> Result<Response> {
        tracing::debug!(%op, "exec");
        self.driver.exec(&self.schema, op).await
    }

    /// Create a record, returning it with its generated primary key.
    pub async fn create(&self, model: &str, values: Record) -> Result<Record> {
        let op = operation::Insert {
            model: model.to_string(),
            values,
        };
        self.exec(op.into()).await?.rows.into_record()
    }

    /// Assign `values` to every record of `model` matching `criteria`,
    /// returning the affected records.
    pub async fn update(&self, model: &str, criteria: Criteria, values: Record) -> Result<Vec<Record>> {
        let op = operation::Update {
            model: model.to_string(),
            criteria,
            values,
        };
        self.exec(op.into()).await?.rows.into_records()
    }

    /// Destroy every record of `model` matching `criteria`, returning how
    /// many were removed.
    pub async fn destroy(&self, model: &str, criteria: Criteria) -> Result<u64> {
        let op = operation::Delete {
            model: model.to_string(),
            criteria,
        };
        Ok(self.exec(op.into()).await?.rows.len())
    }

    /// Read every record of `model` matching `criteria`.
    pub async fn find(&self, model: &str, criteria: Criteria) -> Result<Vec<Record>> {
        let op = operation::Query {
            model: model.to_string(),
            criteria,
        };
        self.exec(op.into()).await?.rows.into_records()
    }
}
