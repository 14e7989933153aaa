use std::collections::HashMap;

use lazy_static::lazy_static;
use maplit::hashmap;

use crate::error::Error;
use crate::runtime::{Environment, Expression, Procedure};
use crate::value::Value;

/// Forms whose operands are handed over unevaluated. A list headed by one
/// of these keywords is never treated as a procedure call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialForm {
    Quote,
    If,
    Define,
    Set,
    Let,
    Lambda,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, SpecialForm> = hashmap! {
        "quote" => SpecialForm::Quote,
        "if" => SpecialForm::If,
        "define" => SpecialForm::Define,
        "set!" => SpecialForm::Set,
        "let" => SpecialForm::Let,
        "lambda" => SpecialForm::Lambda,
    };
}

impl SpecialForm {
    pub fn from_keyword(keyword: &str) -> Option<SpecialForm> {
        KEYWORDS.get(keyword).cloned()
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SpecialForm::Quote => "quote",
            SpecialForm::If => "if",
            SpecialForm::Define => "define",
            SpecialForm::Set => "set!",
            SpecialForm::Let => "let",
            SpecialForm::Lambda => "lambda",
        }
    }

    pub fn apply(self, operands: &[Expression], env: &Environment)
        -> Result<Value, Error> {

        match self {
            SpecialForm::Quote => quote(operands, env),
            SpecialForm::If => syntax_if(operands, env),
            SpecialForm::Define => define(operands, env),
            SpecialForm::Set => set(operands, env),
            SpecialForm::Let => syntax_let(operands, env),
            SpecialForm::Lambda => lambda(operands, env),
        }
    }

    fn malformed<S: Into<String>>(self, reason: S) -> Error {
        Error::MalformedForm {
            form: self.keyword(),
            reason: reason.into(),
        }
    }

    fn expect_operands(self, operands: &[Expression], n: usize)
        -> Result<(), Error> {

        if operands.len() == n {
            Ok(())
        } else {
            Err(self.malformed(format!("expected {} operand(s), got {}", n,
                operands.len())))
        }
    }

    /// A name a binding may be created under: a plain symbol that is neither
    /// a string literal nor a special-form keyword.
    fn binding_name(self, name: &Value) -> Result<String, Error> {
        match name.as_symbol() {
            Some(s) if !name.is_string_literal() && !KEYWORDS.contains_key(s)
                => Ok(s.to_string()),
            _ => Err(self.malformed(format!("cannot bind `{}`", name))),
        }
    }
}

fn quote(operands: &[Expression], _: &Environment) -> Result<Value, Error> {
    SpecialForm::Quote.expect_operands(operands, 1)?;
    Ok(operands[0].0.clone())
}

fn syntax_if(operands: &[Expression], env: &Environment)
    -> Result<Value, Error> {

    SpecialForm::If.expect_operands(operands, 3)?;
    if operands[0].eval(env)?.truthy() {
        operands[1].eval(env)
    } else {
        operands[2].eval(env)
    }
}

fn define(operands: &[Expression], env: &Environment) -> Result<Value, Error> {
    SpecialForm::Define.expect_operands(operands, 2)?;
    let name = SpecialForm::Define.binding_name(&operands[0].0)?;
    let value = operands[1].eval(env)?;
    log::debug!("define {} = {}", name, value);
    env.define(&name, value.clone());
    Ok(value)
}

fn set(operands: &[Expression], env: &Environment) -> Result<Value, Error> {
    SpecialForm::Set.expect_operands(operands, 2)?;
    let name = SpecialForm::Set.binding_name(&operands[0].0)?;
    let value = operands[1].eval(env)?;
    log::debug!("set! {} = {}", name, value);
    env.set(&name, value.clone())?;
    Ok(value)
}

// Parallel binding: every initializer sees only the outer scope.
fn syntax_let(operands: &[Expression], env: &Environment)
    -> Result<Value, Error> {

    SpecialForm::Let.expect_operands(operands, 2)?;
    let bindings = operands[0].0.as_list()
        .ok_or_else(|| SpecialForm::Let.malformed("bindings must be a list"))?;

    let mut scope = HashMap::new();
    for binding in bindings {
        let pair = match binding.as_list() {
            Some(pair) if pair.len() == 2 => pair,
            _ => return Err(SpecialForm::Let.malformed(format!(
                "binding `{}` is not a (name value) pair", binding))),
        };
        let name = SpecialForm::Let.binding_name(&pair[0])?;
        if scope.contains_key(&name) {
            return Err(SpecialForm::Let.malformed(format!(
                "`{}` is bound twice", name)));
        }
        let value = Expression(pair[1].clone()).eval(env)?;
        scope.insert(name, value);
    }

    operands[1].eval(&env.child(scope))
}

fn lambda(operands: &[Expression], env: &Environment) -> Result<Value, Error> {
    SpecialForm::Lambda.expect_operands(operands, 2)?;
    let formals = operands[0].0.as_list().ok_or_else(||
        SpecialForm::Lambda.malformed("parameters must be a list"))?;

    let mut params: Vec<String> = Vec::new();
    for formal in formals {
        let param = SpecialForm::Lambda.binding_name(formal)?;
        if params.contains(&param) {
            return Err(SpecialForm::Lambda.malformed(format!(
                "`{}` is a parameter twice", param)));
        }
        params.push(param);
    }

    log::debug!("lambda ({}) {}", params.join(" "), operands[1]);
    let procc = Procedure::closure(params, operands[1].clone(), env.clone());
    Ok(Value::procedure(procc))
}
