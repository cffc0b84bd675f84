//! Error type raised when an eSEL/PEL blob cannot be interpreted.
use thiserror::Error;

/// The single error kind produced by the decoding engine.
///
/// Every failure encountered while framing sections or unflattening a typed
/// payload is reported as a `FormatError` carrying a free-form message; there
/// is intentionally only one variant (mirroring the reference parser's single
/// `InvalidFormat` exception), so callers that only care "did this parse"
/// can match on the type alone and inspect `.0` when they need the detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FormatError(pub String);

impl FormatError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for FormatError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<String> for FormatError {
    fn from(message: String) -> Self {
        Self(message)
    }
}
