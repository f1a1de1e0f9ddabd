use crate::expr::{
    ExprError, Scope,
    ast::{Binding, CompareOp, Expr, Literal, Operand, Var},
    lexer::Token,
};
use std::ops::Range;

/// Deepest expression tree the parser will build. Evaluation and rendering
/// walk the tree recursively, so the bound also covers them.
pub(crate) const MAX_DEPTH: usize = 128;

/// Parse a token stream into a bound expression.
///
/// ```text
/// or      := and ( '|' and )*
/// and     := unary ( '&' unary )*
/// unary   := '!' unary | compare
/// compare := primary ( op operand )?
/// primary := '(' or ')' | operand
/// ```
pub(crate) fn parse(tokens: &[(Token, Range<usize>)], scope: &Scope) -> Result<Expr, ExprError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        scope,
    };

    let expr = parser.parse_or()?;
    match parser.tokens.get(parser.pos) {
        None => Ok(expr),
        Some((token, span)) => Err(ExprError::Parse {
            found: token.to_string(),
            position: span.start,
        }),
    }
}

///
/// Parser
///

struct Parser<'a> {
    tokens: &'a [(Token, Range<usize>)],
    pos: usize,
    depth: usize,
    scope: &'a Scope,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn advance(&mut self) -> Result<&'a (Token, Range<usize>), ExprError> {
        let entry = self.tokens.get(self.pos).ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;

        Ok(entry)
    }

    // Every nested group, negation and chained operand counts one level.
    fn descend(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep { limit: MAX_DEPTH });
        }

        Ok(())
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        let base = self.depth;
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            self.descend()?;
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        self.depth = base;

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        let base = self.depth;
        let mut left = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            self.descend()?;
            let right = self.parse_unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        self.depth = base;

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if self.peek() == Some(&Token::Bang) {
            self.pos += 1;
            self.descend()?;
            let inner = self.parse_unary()?;
            self.depth -= 1;

            return Ok(Expr::Not(Box::new(inner)));
        }

        self.parse_compare()
    }

    fn parse_compare(&mut self) -> Result<Expr, ExprError> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            self.descend()?;
            let inner = self.parse_or()?;
            let (token, span) = self.advance()?;
            if *token != Token::RParen {
                return Err(ExprError::Parse {
                    found: token.to_string(),
                    position: span.start,
                });
            }
            self.depth -= 1;

            return Ok(inner);
        }

        let left = self.parse_operand()?;
        let op = match self.peek() {
            Some(Token::Eq) => CompareOp::Eq,
            // binary `!` is the legacy spelling of not-equal
            Some(Token::NotEq | Token::Bang) => CompareOp::NotEq,
            Some(Token::Lt) => CompareOp::Lt,
            Some(Token::LtEq) => CompareOp::LtEq,
            Some(Token::Gt) => CompareOp::Gt,
            Some(Token::GtEq) => CompareOp::GtEq,
            _ => return Ok(Expr::Operand(left)),
        };
        self.pos += 1;
        let right = self.parse_operand()?;

        Ok(Expr::Compare { op, left, right })
    }

    fn parse_operand(&mut self) -> Result<Operand, ExprError> {
        let (token, span) = self.advance()?;

        let operand = match token {
            Token::Placeholder(name) => Operand::Var(bind(self.scope, name)),
            Token::Str(text) => Operand::Lit(Literal::Text(text.clone())),
            Token::Number(n) => Operand::Lit(Literal::Number(*n)),
            Token::Word(word) if word.eq_ignore_ascii_case("null") => Operand::Lit(Literal::Null),
            Token::Word(word) => Operand::Lit(Literal::Text(word.clone())),
            other => {
                return Err(ExprError::Parse {
                    found: other.to_string(),
                    position: span.start,
                });
            }
        };

        Ok(operand)
    }
}

// Bind a placeholder name against the scope; session names stay free.
fn bind(scope: &Scope, name: &str) -> Var {
    let binding = if name.starts_with(['#', '$']) {
        Binding::Free
    } else {
        scope
            .lookup(name)
            .map_or(Binding::Free, |entry| Binding::Field {
                property: entry.property.clone(),
                boolean: entry.boolean,
            })
    };

    Var {
        name: name.to_string(),
        binding,
    }
}

///
/// TESTS
///
