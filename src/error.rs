use std::fmt;

use thiserror::Error;

/// Failures detected while reading text into an expression.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntaxError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected `)`")]
    UnexpectedCloseParen,
    #[error("unexpected input after expression: `{0}`")]
    TrailingInput(String),
}

/// How many arguments a procedure accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Arity::Exactly(1) => write!(f, "exactly 1 argument"),
            Arity::Exactly(n) => write!(f, "exactly {} arguments", n),
            Arity::AtLeast(1) => write!(f, "at least 1 argument"),
            Arity::AtLeast(n) => write!(f, "at least {} arguments", n),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("unbound variable: {0}")]
    UnboundVariable(String),
    #[error("not a procedure: {0}")]
    NotCallable(String),
    #[error("{procedure} expects {expected}, got {got}")]
    ArityMismatch {
        procedure: String,
        expected: Arity,
        got: usize,
    },
    #[error("{procedure} expects numbers, got {got}")]
    TypeMismatch {
        procedure: String,
        got: String,
    },
    #[error("malformed {form}: {reason}")]
    MalformedForm {
        form: &'static str,
        reason: String,
    },
}

impl Error {
    pub fn arity(procedure: &str, expected: Arity, got: usize) -> Error {
        Error::ArityMismatch {
            procedure: procedure.to_string(),
            expected,
            got,
        }
    }
}
