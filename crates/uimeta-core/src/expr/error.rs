use crate::error::{ErrorOrigin, InternalError};
use thiserror::Error as ThisError;

///
/// ExprError
///
/// Lex, parse, binding and evaluation failures. Gating callers never surface
/// these; they fail open.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ExprError {
    #[error("unrecognized input at byte {position}")]
    Lex { position: usize },

    #[error("unexpected token '{found}' at byte {position}")]
    Parse { found: String, position: usize },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbound variable '{0}'")]
    Unbound(String),

    #[error("type mismatch: {0}")]
    Type(String),
}

impl From<ExprError> for InternalError {
    fn from(err: ExprError) -> Self {
        Self::configuration(ErrorOrigin::Expression, err.to_string())
    }
}

///
/// TESTS
///
