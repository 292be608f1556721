use super::Error;

/// Free-form error, also built by the `bail!` macro.
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    pub(super) fn new(message: impl Into<String>) -> Self {
        AdhocError {
            message: message.into().into(),
        }
    }
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an ad-hoc error from a message.
    pub fn adhoc(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Adhoc(AdhocError::new(message)))
    }

    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        match args.as_str() {
            Some(message) => Error::adhoc(message),
            None => Error::adhoc(args.to_string()),
        }
    }
}
