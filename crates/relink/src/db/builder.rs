use super::{Config, Db};
use crate::{driver::Driver, Result};

use relink_core::schema::{self, Model};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Schema builder
    core: schema::Builder,

    config: Config,
}

impl Builder {
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.core.register(model);
        self
    }

    /// Replace the whole configuration.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Bound the number of in-flight driver operations per fan-out group.
    pub fn max_concurrency(&mut self, max: usize) -> &mut Self {
        self.config.max_concurrency = Some(max);
        self
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        use crate::driver::Connection;
        self.build(Connection::connect(url).await?).await
    }

    pub async fn build(&mut self, mut driver: impl Driver) -> Result<Db> {
        self.config.verify()?;

        let schema = self.core.build()?;
        driver.register_schema(&schema).await?;

        tracing::debug!(
            models = schema.models().count(),
            max_concurrency = ?self.config.max_concurrency,
            "database ready"
        );

        Ok(Db {
            driver: Arc::new(driver),
            schema: Arc::new(schema),
            config: Arc::new(self.config.clone()),
        })
    }
}
