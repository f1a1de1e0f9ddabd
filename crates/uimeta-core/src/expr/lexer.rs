use crate::expr::ExprError;
use logos::Logos;
use std::{fmt, ops::Range};

///
/// Token
///
/// Display-logic token. Placeholders carry the text between the `@` marks;
/// string literals carry their unquoted contents.
///

#[derive(Clone, Debug, Logos, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[regex(r"@[^@]*@", |lex| trim_delimiters(lex.slice()))]
    Placeholder(String),

    #[regex(r"'[^']*'", |lex| trim_delimiters(lex.slice()))]
    #[regex(r#""[^"]*""#, |lex| trim_delimiters(lex.slice()))]
    Str(String),

    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Word(String),

    #[token("!=")]
    NotEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("==")]
    #[token("=")]
    Eq,

    #[token("!")]
    Bang,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("&&")]
    #[token("&")]
    And,

    #[token("||")]
    #[token("|")]
    Or,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

fn trim_delimiters(slice: &str) -> String {
    slice[1..slice.len() - 1].to_string()
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder(name) => write!(f, "@{name}@"),
            Self::Str(text) => write!(f, "'{text}'"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Word(word) => write!(f, "{word}"),
            Self::NotEq => write!(f, "!="),
            Self::LtEq => write!(f, "<="),
            Self::GtEq => write!(f, ">="),
            Self::Eq => write!(f, "="),
            Self::Bang => write!(f, "!"),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::And => write!(f, "&"),
            Self::Or => write!(f, "|"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

/// Tokenize a logic string, pairing each token with its byte span.
pub(crate) fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, ExprError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(ExprError::Lex { position: span.start }),
        }
    }

    Ok(tokens)
}

///
/// TESTS
///
