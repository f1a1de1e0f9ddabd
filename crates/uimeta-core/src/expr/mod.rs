//! Display-logic expression engine.
//!
//! Stored logic is lexed with `logos`, parsed by a small recursive-descent
//! parser into an [`Expr`] bound against a [`Scope`], and then either
//! rendered as a client expression or evaluated server-side.

mod ast;
mod error;
mod evaluator;
mod lexer;
mod parser;
mod render;
mod scope;
mod value;

pub use ast::{Binding, CompareOp, Expr, Literal, Operand, Var};
pub use error::ExprError;
pub use evaluator::{BuiltinEngine, ExpressionEvaluator, ScriptEngine, substitute_preferences};
pub use lexer::Token;
pub use scope::{Scope, ScopeEntry};
pub use value::{ContextVariables, Value, VariableSource};

use crate::{
    error::InternalError,
    model::{Id, is_blank},
};
use tracing::warn;

///
/// CompiledExpr
/// A parsed, scope-bound logic expression.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CompiledExpr {
    source: String,
    expr: Expr,
}

impl CompiledExpr {
    /// Lex, parse and bind `source` against `scope`.
    pub fn compile(source: &str, scope: &Scope) -> Result<Self, ExprError> {
        let tokens = lexer::tokenize(source)?;
        let expr = parser::parse(&tokens, scope)?;

        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Client-side rendering of the expression.
    #[must_use]
    pub fn to_client(&self) -> String {
        render::render(&self.expr)
    }

    /// Field properties referenced by the expression, in first-use order.
    #[must_use]
    pub fn field_properties(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.expr.collect_fields(&mut out);

        out
    }

    pub fn evaluate(&self, vars: &dyn VariableSource) -> Result<bool, ExprError> {
        value::evaluate(&self.expr, vars)
    }
}

/// Compile non-blank stored logic for the client, logging and dropping it
/// when it does not compile.
pub(crate) fn compile_logic(owner_id: &Id, logic: Option<&str>, scope: &Scope) -> Option<CompiledExpr> {
    let logic = logic.filter(|logic| !is_blank(Some(*logic)))?;

    CompiledExpr::compile(logic, scope)
        .map_err(InternalError::from)
        .inspect_err(|err| {
            warn!(owner_id = %owner_id, logic, error = %err.display_with_class(), "logic compile failed");
        })
        .ok()
}
