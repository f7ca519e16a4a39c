// SPDX-License-Identifier: MPL-2.0
use crate::toast::ToastId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied id is already used by an active toast.
    DuplicateId(ToastId),
    /// The id does not name an active toast.
    NotFound(ToastId),
    /// A lifecycle operation was attempted without a live provider.
    NoContext,
    /// The provider was already borrowed, typically from inside a dismiss
    /// callback or a render listener.
    Reentrant,
    /// Toast options were rejected before reaching the store.
    InvalidOptions(String),
    /// A dismiss callback or listener panicked.
    Callback(String),
    Io(String),
    Config(String),
}

impl Error {
    /// Returns whether the caller can recover by adjusting its request.
    ///
    /// `NoContext` is a wiring mistake in the host and is never recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::NoContext)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateId(id) => write!(f, "Duplicate toast id: {}", id),
            Error::NotFound(id) => write!(f, "Toast not found: {}", id),
            Error::NoContext => write!(f, "No active toast provider"),
            Error::Reentrant => write!(f, "Toast provider is busy"),
            Error::InvalidOptions(e) => write!(f, "Invalid toast options: {}", e),
            Error::Callback(e) => write!(f, "Callback Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
