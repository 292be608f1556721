use super::Error;

/// Error when the registry cannot describe something the caller relies on.
///
/// Unresolvable *associations* are not errors (they are skipped). This is
/// raised for things the sync cannot proceed without, such as the parent
/// model itself or a model registered twice.
#[derive(Debug)]
pub(super) struct InvalidSchemaError {
    message: Box<str>,
}

impl std::error::Error for InvalidSchemaError {}

impl core::fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchemaError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid
    /// schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}
