use std::fmt;

use nom::branch::alt;
use nom::bytes::complete::{take_till1, take_while};
use nom::character::complete::char;
use nom::combinator::{all_consuming, map};
use nom::number::complete::recognize_float;
use nom::sequence::preceded;
use nom::IResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    LeftParen,
    RightParen,
    Atom(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match *self {
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Atom(ref atom) => atom,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn is_delimiter(c: char) -> bool {
    c == '(' || c == ')' || c.is_whitespace()
}

fn read_token(input: &str) -> IResult<&str, Token> {
    preceded(
        take_while(|c: char| c.is_whitespace()),
        alt((
            map(char('('), |_| Token::LeftParen),
            map(char(')'), |_| Token::RightParen),
            map(take_till1(is_delimiter), |atom: &str| {
                Token::Atom(atom.to_string())
            }),
        )),
    )(input)
}

/// Whether the whole atom is a decimal literal: optional sign, digits with
/// an optional fraction (or a bare `.fraction`), optional exponent.
// Narrower than `str::parse::<f64>` on purpose: `inf`, `infinity` and `NaN`
// stay symbols so they remain usable as variable names.
pub fn is_number(atom: &str) -> bool {
    let res: IResult<&str, &str> = all_consuming(recognize_float)(atom);
    res.is_ok()
}

/// Splits text into parens and atoms. Every character is either whitespace,
/// a paren, or part of an atom, so lexing cannot fail.
#[derive(Debug)]
pub struct Lexer<'a>(&'a str);

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer(input)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match read_token(self.0) {
            Ok((rest, token)) => {
                self.0 = rest;
                Some(token)
            }
            Err(_) => None,
        }
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}
