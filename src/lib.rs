//! A small lexically scoped Lisp.
//!
//! Text is tokenized and read into nested lists, which are evaluated
//! against a chain of scopes. The language has six special forms (`quote`,
//! `if`, `define`, `set!`, `let`, `lambda`) and nine numeric builtins
//! (`+ - * /` and `> < = <= >=`).
//!
//! ```
//! use minilisp::Interpreter;
//!
//! let session = Interpreter::new();
//! session.run("(define square (lambda (x) (* x x)))").unwrap();
//! assert_eq!(session.run("(square 5)").unwrap().to_string(), "25");
//! ```

mod builtin;
mod error;
mod read;
mod runtime;
mod syntax;
mod value;

pub use crate::builtin::initial_environment;
pub use crate::error::{Arity, Error, SyntaxError};
pub use crate::read::{coerce, read, tokenize, Reader, Token};
pub use crate::runtime::{Environment, Expression, Procedure};
pub use crate::syntax::SpecialForm;
pub use crate::value::Value;

/// Reads exactly one expression from `text`.
pub fn parse(text: &str) -> Result<Expression, SyntaxError> {
    read::parse(text)
}

/// Evaluates `expr` in `env`, which `define` and `set!` may change.
pub fn evaluate(expr: &Expression, env: &Environment) -> Result<Value, Error> {
    expr.eval(env)
}

/// Parses and evaluates `text` in a fresh root environment.
pub fn run(text: &str) -> Result<Value, Error> {
    Interpreter::new().run(text)
}

/// An evaluation session. Definitions persist from one `run` to the next.
#[derive(Debug)]
pub struct Interpreter {
    environment: Environment,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter {
            environment: initial_environment(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn run(&self, text: &str) -> Result<Value, Error> {
        log::debug!("run {:?}", text);
        let expr = parse(text)?;
        evaluate(&expr, &self.environment)
    }
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter::new()
    }
}
