use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use uimeta_config::ConfigError;
use uimeta_core::error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError};

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ErrorKind::Unauthorized)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Self::new(err.class.into(), err.origin.into(), err.message)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Internal, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy; the dispatch layer maps each kind to one status.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorKind {
    /// The caller cannot remediate this.
    Internal,

    /// The requested window, tab or process does not exist.
    NotFound,

    /// The role holds no grant for an existing window.
    Unauthorized,
}

impl From<ErrorClass> for ErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::NotFound => Self::NotFound,
            ErrorClass::Unauthorized => Self::Unauthorized,
            ErrorClass::Configuration | ErrorClass::Internal => Self::Internal,
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum ErrorOrigin {
    Config,
    Expression,
    Field,
    Process,
    Reference,
    Selector,
    Session,
    Store,
    Tab,
    Window,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Window => Self::Window,
            CoreErrorOrigin::Tab => Self::Tab,
            CoreErrorOrigin::Field => Self::Field,
            CoreErrorOrigin::Selector => Self::Selector,
            CoreErrorOrigin::Reference => Self::Reference,
            CoreErrorOrigin::Process => Self::Process,
            CoreErrorOrigin::Expression => Self::Expression,
            CoreErrorOrigin::Session => Self::Session,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}

///
/// TESTS
///
