use crate::expr::ast::{Binding, Expr, Literal, Operand};

/// Render an expression for client-side evaluation.
///
/// Field variables read from `currentValues`, free variables from `context`.
/// A `'Y'` / `'N'` literal compared against a boolean field becomes
/// `true` / `false`.
pub(crate) fn render(expr: &Expr) -> String {
    match expr {
        Expr::Or(left, right) => format!("{} || {}", render(left), render(right)),
        Expr::And(left, right) => format!("{} && {}", render_and_side(left), render_and_side(right)),
        Expr::Not(inner) => match inner.as_ref() {
            Expr::Operand(_) => format!("!{}", render(inner)),
            _ => format!("!({})", render(inner)),
        },
        Expr::Compare { op, left, right } => {
            let boolean = left.is_boolean_field() || right.is_boolean_field();
            format!(
                "{} {} {}",
                render_operand(left, boolean),
                op.client_symbol(),
                render_operand(right, boolean)
            )
        }
        Expr::Operand(operand) => render_operand(operand, false),
    }
}

fn render_and_side(expr: &Expr) -> String {
    match expr {
        Expr::Or(..) => format!("({})", render(expr)),
        _ => render(expr),
    }
}

fn render_operand(operand: &Operand, boolean_context: bool) -> String {
    match operand {
        Operand::Var(var) => match &var.binding {
            Binding::Field { property, .. } => format!("currentValues['{}']", escape(property)),
            Binding::Free => format!("context['{}']", escape(&var.name)),
        },
        Operand::Lit(Literal::Null) => "null".to_string(),
        Operand::Lit(Literal::Number(n)) => n.to_string(),
        Operand::Lit(Literal::Text(text)) => match (boolean_context, text.as_str()) {
            (true, "Y") => "true".to_string(),
            (true, "N") => "false".to_string(),
            _ => format!("'{}'", escape(text)),
        },
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

///
/// TESTS
///
