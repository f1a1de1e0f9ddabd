use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured engine error with a stable classification.
/// Window-level existence and access failures travel untouched to the caller;
/// field- and tab-level failures are caught by the assemblers.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a not-found error for one entity lookup.
    pub fn not_found(origin: ErrorOrigin, entity: &str, id: impl fmt::Display) -> Self {
        Self::new(
            ErrorClass::NotFound,
            origin,
            format!("{entity} not found: {id}"),
        )
    }

    /// Construct an access error for a role without a grant.
    pub fn unauthorized(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unauthorized, origin, message)
    }

    /// Construct a metadata misconfiguration error.
    pub fn configuration(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Configuration, origin, message)
    }

    /// Construct a selector-origin misconfiguration error.
    pub(crate) fn selector_configuration(message: impl Into<String>) -> Self {
        Self::configuration(ErrorOrigin::Selector, message)
    }

    /// Construct an unexpected assembly failure.
    pub fn internal(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, origin, message)
    }

    /// Construct a store-origin internal error.
    pub(crate) fn store_internal(message: impl Into<String>) -> Self {
        Self::internal(ErrorOrigin::Store, message)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.class, ErrorClass::Unauthorized)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
/// Engine error taxonomy.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorClass {
    Configuration,
    Internal,
    NotFound,
    Unauthorized,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Internal => "internal",
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Which assembly stage raised the error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Window,
    Tab,
    Field,
    Selector,
    Reference,
    Process,
    Expression,
    Session,
    Store,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Window => "window",
            Self::Tab => "tab",
            Self::Field => "field",
            Self::Selector => "selector",
            Self::Reference => "reference",
            Self::Process => "process",
            Self::Expression => "expression",
            Self::Session => "session",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}
