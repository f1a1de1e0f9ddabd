///
/// Expr
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Or(Box<Self>, Box<Self>),
    And(Box<Self>, Box<Self>),
    Not(Box<Self>),
    Compare {
        op: CompareOp,
        left: Operand,
        right: Operand,
    },
    /// A bare operand used as a truth value.
    Operand(Operand),
}

impl Expr {
    pub(crate) fn collect_fields(&self, out: &mut Vec<String>) {
        match self {
            Self::Or(left, right) | Self::And(left, right) => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
            Self::Not(inner) => inner.collect_fields(out),
            Self::Compare { left, right, .. } => {
                left.collect_field(out);
                right.collect_field(out);
            }
            Self::Operand(operand) => operand.collect_field(out),
        }
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    #[must_use]
    pub const fn client_symbol(self) -> &'static str {
        match self {
            Self::Eq => "===",
            Self::NotEq => "!==",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

///
/// Operand
///

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Var(Var),
    Lit(Literal),
}

impl Operand {
    fn collect_field(&self, out: &mut Vec<String>) {
        if let Self::Var(Var {
            binding: Binding::Field { property, .. },
            ..
        }) = self
            && !out.contains(property)
        {
            out.push(property.clone());
        }
    }

    /// True when the operand is a variable bound to a boolean field.
    pub(crate) const fn is_boolean_field(&self) -> bool {
        matches!(
            self,
            Self::Var(Var {
                binding: Binding::Field { boolean: true, .. },
                ..
            })
        )
    }
}

///
/// Var
/// A placeholder as written plus what it was bound to at compile time.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Var {
    pub name: String,
    pub binding: Binding,
}

///
/// Binding
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Binding {
    /// A sibling field of the compiling tab (or process parameter).
    Field { property: String, boolean: bool },
    /// Anything else; resolved from the request context at evaluation.
    Free,
}

///
/// Literal
///

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Number(f64),
    Text(String),
}
