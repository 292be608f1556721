use crate::{Error, Result};

use serde::{Deserialize, Serialize};

/// Runtime settings for a [`Db`](super::Db).
///
/// `Config` deserializes from any serde format, with every field optional:
///
/// ```
/// let config = relink::Config::from_json(r#"{ "max_concurrency": 8 }"#).unwrap();
/// assert_eq!(config.max_concurrency, Some(8));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Upper bound on the number of driver operations a single fan-out group
    /// keeps in flight. `None` issues the whole group at once.
    pub max_concurrency: Option<usize>,
}

impl Config {
    pub fn from_json(src: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(src)
            .map_err(|err| Error::from(err).context("invalid relink configuration"))?;
        config.verify()?;
        Ok(config)
    }

    pub(crate) fn verify(&self) -> Result<()> {
        if self.max_concurrency == Some(0) {
            relink_core::bail!("`max_concurrency` must be at least 1");
        }
        Ok(())
    }
}
