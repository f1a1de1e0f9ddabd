use crate::{
    context::RequestContext,
    expr::{
        ExprError,
        ast::{Binding, CompareOp, Expr, Literal, Operand, Var},
    },
};
use std::cmp::Ordering;

///
/// Value
/// Runtime value of an operand.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Coerce to a truth value; `Y` / `N` count as booleans.
    pub fn truthy(&self) -> Result<bool, ExprError> {
        match self {
            Self::Null => Ok(false),
            Self::Bool(b) => Ok(*b),
            Self::Number(n) => Ok(*n != 0.0),
            Self::Text(text) => text_to_bool(text)
                .or_else(|| text.is_empty().then_some(false))
                .ok_or_else(|| ExprError::Type(format!("'{text}' is not a boolean"))),
        }
    }
}

fn text_to_bool(text: &str) -> Option<bool> {
    match text {
        "Y" | "y" | "true" => Some(true),
        "N" | "n" | "false" => Some(false),
        _ => None,
    }
}

///
/// VariableSource
///

pub trait VariableSource {
    fn value(&self, var: &Var) -> Option<Value>;
}

///
/// ContextVariables
///
/// Server-side variable source: only free variables resolve, from the
/// request context. Field bindings stay unbound because no record exists.
///

pub struct ContextVariables<'a> {
    ctx: &'a RequestContext,
}

impl<'a> ContextVariables<'a> {
    #[must_use]
    pub const fn new(ctx: &'a RequestContext) -> Self {
        Self { ctx }
    }
}

impl VariableSource for ContextVariables<'_> {
    fn value(&self, var: &Var) -> Option<Value> {
        match var.binding {
            Binding::Field { .. } => None,
            Binding::Free => self
                .ctx
                .preference(var.name.trim_start_matches(['#', '$']))
                .map(Value::Text),
        }
    }
}

/// Evaluate an expression to a boolean.
pub(crate) fn evaluate(expr: &Expr, vars: &dyn VariableSource) -> Result<bool, ExprError> {
    match expr {
        Expr::Or(left, right) => Ok(evaluate(left, vars)? || evaluate(right, vars)?),
        Expr::And(left, right) => Ok(evaluate(left, vars)? && evaluate(right, vars)?),
        Expr::Not(inner) => Ok(!evaluate(inner, vars)?),
        Expr::Operand(operand) => resolve(operand, vars)?.truthy(),
        Expr::Compare { op, left, right } => {
            let left = resolve(left, vars)?;
            let right = resolve(right, vars)?;

            compare(*op, &left, &right)
        }
    }
}

fn resolve(operand: &Operand, vars: &dyn VariableSource) -> Result<Value, ExprError> {
    match operand {
        Operand::Lit(Literal::Null) => Ok(Value::Null),
        Operand::Lit(Literal::Number(n)) => Ok(Value::Number(*n)),
        Operand::Lit(Literal::Text(text)) => Ok(Value::Text(text.clone())),
        Operand::Var(var) => vars
            .value(var)
            .ok_or_else(|| ExprError::Unbound(var.name.clone())),
    }
}

fn compare(op: CompareOp, left: &Value, right: &Value) -> Result<bool, ExprError> {
    match op {
        CompareOp::Eq => Ok(equals(left, right)),
        CompareOp::NotEq => Ok(!equals(left, right)),
        CompareOp::Lt => Ok(order(left, right)? == Ordering::Less),
        CompareOp::LtEq => Ok(order(left, right)? != Ordering::Greater),
        CompareOp::Gt => Ok(order(left, right)? == Ordering::Greater),
        CompareOp::GtEq => Ok(order(left, right)? != Ordering::Less),
    }
}

// Loose equality: null matches the empty string, booleans match Y/N, and
// numeric text matches numbers.
fn equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, Value::Text(t)) | (Value::Text(t), Value::Null) => t.is_empty(),
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Bool(b), Value::Text(t)) | (Value::Text(t), Value::Bool(b)) => {
            text_to_bool(t) == Some(*b)
        }
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Number(n), Value::Text(t)) | (Value::Text(t), Value::Number(n)) => {
            t.trim().parse::<f64>().is_ok_and(|parsed| parsed == *n)
        }
        (Value::Text(a), Value::Text(b)) => a == b,
        _ => false,
    }
}

fn order(left: &Value, right: &Value) -> Result<Ordering, ExprError> {
    let ordering = match (as_number(left), as_number(right)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => match (left, right) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        },
    };

    ordering.ok_or_else(|| ExprError::Type(format!("cannot order {left:?} and {right:?}")))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Text(text) => text.trim().parse().ok(),
        _ => None,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{CompiledExpr, Scope};

    fn eval(source: &str, ctx: &RequestContext) -> Result<bool, ExprError> {
        let scope = Scope::new().bind("IsActive", "active", true);

        CompiledExpr::compile(source, &scope)?.evaluate(&ContextVariables::new(ctx))
    }

    #[test]
    fn context_values_drive_comparisons() {
        let ctx = RequestContext::new("R1", "U1")
            .with_preference("ShowAudit", "Y")
            .with_preference("Level", "3");

        assert_eq!(eval("@#ShowAudit@='Y'", &ctx), Ok(true));
        assert_eq!(eval("@ShowAudit@='N'", &ctx), Ok(false));
        assert_eq!(eval("@Level@>2 & @Level@<=3", &ctx), Ok(true));
        assert_eq!(eval("!(@Level@=3) | @#AD_Role_ID@='R1'", &ctx), Ok(true));
        assert_eq!(eval("@#ShowAudit@", &ctx), Ok(true));
    }

    #[test]
    fn field_bindings_are_unbound_server_side() {
        let ctx = RequestContext::new("R1", "U1");

        assert_eq!(
            eval("@IsActive@='Y'", &ctx),
            Err(ExprError::Unbound("IsActive".into()))
        );
    }

    #[test]
    fn loose_equality_rules() {
        assert!(equals(&Value::Null, &Value::Text(String::new())));
        assert!(equals(&Value::Bool(true), &Value::Text("Y".into())));
        assert!(equals(&Value::Number(10.0), &Value::Text("10".into())));
        assert!(!equals(&Value::Bool(false), &Value::Text("maybe".into())));
    }

    #[test]
    fn ordering_non_numeric_mixed_values_is_a_type_error() {
        let err = order(&Value::Bool(true), &Value::Number(1.0)).unwrap_err();

        assert!(matches!(err, ExprError::Type(_)));
        assert!(Value::Text("maybe".into()).truthy().is_err());
    }
}
