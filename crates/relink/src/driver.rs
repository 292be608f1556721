use crate::{Error, Result};

pub use relink_core::driver::{
    operation::{self, Operation},
    Driver, Response, Rows,
};
use relink_core::Schema;

use std::sync::Arc;
use url::Url;

/// A driver selected from a connection URL.
#[derive(Debug)]
pub(crate) enum Connection {
    #[cfg(feature = "memory")]
    Memory(relink_driver_memory::Memory),
}

impl Connection {
    pub(crate) async fn connect(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|err| {
            Error::from(anyhow::Error::from(err)).context(format!("invalid connection URL `{url}`"))
        })?;

        match url.scheme() {
            "memory" => Self::connect_memory(&url),
            scheme => Err(anyhow::anyhow!("unsupported database; scheme={scheme}; url={url}").into()),
        }
    }

    #[cfg(feature = "memory")]
    fn connect_memory(url: &Url) -> Result<Self> {
        let driver = relink_driver_memory::Memory::connect(url.as_str())?;
        Ok(Self::Memory(driver))
    }

    #[cfg(not(feature = "memory"))]
    fn connect_memory(_url: &Url) -> Result<Self> {
        Err(anyhow::anyhow!("`memory` feature not enabled").into())
    }
}

macro_rules! match_db {
    ($self:expr, $driver:pat => $e:expr) => {
        match *$self {
            #[cfg(feature = "memory")]
            Connection::Memory($driver) => $e,
        }
    };
}

#[relink_core::async_trait]
impl Driver for Connection {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        match_db!(self, ref mut driver => driver.register_schema(schema).await)
    }

    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> Result<Response> {
        match_db!(self, ref driver => driver.exec(schema, op).await)
    }
}
