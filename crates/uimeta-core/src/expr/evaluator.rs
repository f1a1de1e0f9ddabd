use crate::{
    context::RequestContext,
    expr::{CompiledExpr, ContextVariables, ExprError, Scope},
    model::is_blank,
};
use tracing::debug;

///
/// ScriptEngine
/// Evaluates a compiled expression against the request context.
///

pub trait ScriptEngine {
    fn eval_bool(&self, expr: &CompiledExpr, ctx: &RequestContext) -> Result<bool, ExprError>;
}

///
/// BuiltinEngine
///

#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinEngine;

impl ScriptEngine for BuiltinEngine {
    fn eval_bool(&self, expr: &CompiledExpr, ctx: &RequestContext) -> Result<bool, ExprError> {
        expr.evaluate(&ContextVariables::new(ctx))
    }
}

///
/// ExpressionEvaluator
///
/// Server-side gate for stored logic. Blank logic is visible; any lex,
/// parse, binding or evaluation error is also visible, since the client
/// re-evaluates live.
///

#[derive(Clone, Debug, Default)]
pub struct ExpressionEvaluator<E = BuiltinEngine> {
    engine: E,
}

impl ExpressionEvaluator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            engine: BuiltinEngine,
        }
    }
}

impl<E: ScriptEngine> ExpressionEvaluator<E> {
    pub const fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn evaluate(&self, logic: Option<&str>, scope: &Scope, ctx: &RequestContext) -> bool {
        let Some(logic) = logic.filter(|logic| !is_blank(Some(*logic))) else {
            return true;
        };

        let source = substitute_preferences(logic, ctx);
        let result = CompiledExpr::compile(&source, scope)
            .and_then(|compiled| self.engine.eval_bool(&compiled, ctx));

        match result {
            Ok(visible) => visible,
            Err(err) => {
                debug!(logic, error = %err, "logic evaluation failed open");
                true
            }
        }
    }
}

/// Replace `@#Name@` / `@$Name@` placeholders with quoted session values.
///
/// Unknown names, and values that cannot be quoted, are left in place.
#[must_use]
pub fn substitute_preferences(logic: &str, ctx: &RequestContext) -> String {
    let mut out = String::with_capacity(logic.len());
    let mut rest = logic;

    while let Some(start) = rest.find('@') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('@') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        let value = name
            .strip_prefix(['#', '$'])
            .and_then(|key| ctx.preference(key))
            .filter(|value| !value.contains('\''));

        match value {
            Some(value) => {
                out.push('\'');
                out.push_str(&value);
                out.push('\'');
            }
            None => {
                out.push('@');
                out.push_str(name);
                out.push('@');
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    out
}

///
/// TESTS
///
