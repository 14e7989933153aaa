mod lexer;

use std::iter::Peekable;

use crate::error::SyntaxError;
use crate::runtime::Expression;
use crate::value::Value;

pub use self::lexer::{tokenize, Lexer, Token};

/// Reads exactly one expression from `input`.
pub fn parse(input: &str) -> Result<Expression, SyntaxError> {
    let mut reader = Reader::new(Lexer::new(input));
    let expr = reader.read_expr()?;
    reader.finish()?;
    Ok(expr)
}

/// Reads the first expression from `tokens`, ignoring whatever follows it.
pub fn read<I: IntoIterator<Item = Token>>(tokens: I)
    -> Result<Expression, SyntaxError> {

    Reader::new(tokens).read_expr()
}

/// Turns an atom into a number when it is a decimal literal and into a
/// symbol otherwise.
pub fn coerce(atom: &str) -> Value {
    if lexer::is_number(atom) {
        if let Ok(n) = atom.parse::<f64>() {
            return Value::number(n);
        }
    }
    Value::symbol(atom)
}

pub struct Reader<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
}

impl<I: Iterator<Item = Token>> Reader<I> {
    pub fn new<T: IntoIterator<Item = Token, IntoIter = I>>(tokens: T) -> Self {
        Reader {
            tokens: tokens.into_iter().peekable(),
        }
    }

    pub fn read_expr(&mut self) -> Result<Expression, SyntaxError> {
        self.read_value().map(Expression)
    }

    fn read_value(&mut self) -> Result<Value, SyntaxError> {
        match self.tokens.next() {
            Some(Token::LeftParen) => self.read_list(),
            Some(Token::RightParen) => Err(SyntaxError::UnexpectedCloseParen),
            Some(Token::Atom(atom)) => Ok(coerce(&atom)),
            None => Err(SyntaxError::UnexpectedEof),
        }
    }

    fn read_list(&mut self) -> Result<Value, SyntaxError> {
        let mut list = Vec::new();

        loop {
            match self.tokens.peek() {
                Some(Token::RightParen) => {
                    self.tokens.next();
                    return Ok(Value::list(list));
                }
                Some(_) => list.push(self.read_value()?),
                None => return Err(SyntaxError::UnexpectedEof),
            }
        }
    }

    /// Fails if any tokens remain. A stray `)` anywhere in the rest is
    /// reported as such, since that is the imbalance.
    pub fn finish(&mut self) -> Result<(), SyntaxError> {
        let rest: Vec<Token> = self.tokens.by_ref().collect();
        if rest.contains(&Token::RightParen) {
            return Err(SyntaxError::UnexpectedCloseParen);
        }
        match rest.into_iter().next() {
            None => Ok(()),
            Some(tok) => Err(SyntaxError::TrailingInput(tok.to_string())),
        }
    }
}
