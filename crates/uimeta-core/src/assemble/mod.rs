//! Document assembly.
//!
//! `WindowAssembler` resolves the role's grant and walks the readable tabs,
//! `TabAssembler` gates and keys each field, and `FieldAssembler` composes
//! one field from the resolvers. Failures below the window level are logged
//! and the failing tab or field is omitted.

mod field;
mod tab;
mod window;

pub use field::FieldAssembler;
pub use tab::TabAssembler;
pub use window::WindowAssembler;

use crate::expr::ExpressionEvaluator;

// Shared evaluator for assemblers built without an explicit engine.
static BUILTIN_EVALUATOR: ExpressionEvaluator = ExpressionEvaluator::new();

/// Lower camel case over `_` and space separated words.
///
/// The first word keeps its case after its leading character is lowered;
/// later words get an upper-case leading character.
pub(crate) fn camel_case(source: &str) -> String {
    let mut out = String::with_capacity(source.len());

    for (index, word) in source
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .enumerate()
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if index == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }

    out
}

/// Form input name of a DB column.
pub(crate) fn input_name(db_column_name: &str) -> String {
    format!("inp{}", camel_case(&db_column_name.to_lowercase()))
}

///
/// TESTS
///
