mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, Schema};

use std::{fmt::Debug, sync::Arc};

/// The persistence layer.
///
/// A driver must tolerate concurrent `exec` calls: the sync engine issues
/// every operation of a fan-out group at once.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Register the schema with the driver.
    async fn register_schema(&mut self, schema: &Schema) -> crate::Result<()>;

    /// Execute a database operation
    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> crate::Result<Response>;
}

#[async_trait]
impl Driver for Box<dyn Driver> {
    async fn register_schema(&mut self, schema: &Schema) -> crate::Result<()> {
        (**self).register_schema(schema).await
    }

    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> crate::Result<Response> {
        (**self).exec(schema, op).await
    }
}
