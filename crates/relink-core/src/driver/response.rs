use crate::{stmt::Record, Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Records returned by the operation
    Records(Vec<Record>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn records(records: Vec<Record>) -> Self {
        Self {
            rows: Rows::Records(records),
        }
    }
}

impl Rows {
    /// Number of affected or returned rows.
    pub fn len(&self) -> u64 {
        match self {
            Rows::Count(count) => *count,
            Rows::Records(records) => records.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Result<Vec<Record>> {
        match self {
            Self::Records(records) => Ok(records),
            Self::Count(count) => Err(Error::adhoc(format!(
                "expected records from the driver, got a count of {count}"
            ))),
        }
    }

    /// Exactly one record, as returned by an insert.
    pub fn into_record(self) -> Result<Record> {
        let records = self.into_records()?;
        let len = records.len();

        match <[Record; 1]>::try_from(records) {
            Ok([record]) => Ok(record),
            Err(_) if len == 0 => Err(Error::record_not_found("driver returned no record")),
            Err(_) => Err(Error::adhoc(format!(
                "expected a single record from the driver, got {len}"
            ))),
        }
    }
}
