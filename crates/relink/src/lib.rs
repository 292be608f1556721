pub mod db;
pub use db::{Config, Db};

pub mod driver;

mod instance;
pub use instance::Instance;

pub mod sync;

pub use relink_core::{
    schema::{self, Model},
    stmt::{self, Criteria, Record, Value},
    Error, Result, Schema,
};
