use super::Error;

/// Error when a record that must be addressed by key has no key value.
#[derive(Debug)]
pub(super) struct MissingPrimaryKeyError {
    model: Box<str>,
    field: Box<str>,
}

impl std::error::Error for MissingPrimaryKeyError {}

impl core::fmt::Display for MissingPrimaryKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "record of model `{}` is missing its primary key `{}`",
            self.model, self.field
        )
    }
}

impl Error {
    /// Creates a missing primary key error for a record of `model`.
    pub fn missing_primary_key(model: &str, field: &str) -> Error {
        Error::from(super::ErrorKind::MissingPrimaryKey(MissingPrimaryKeyError {
            model: model.into(),
            field: field.into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a missing
    /// primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingPrimaryKey(_)))
    }
}
