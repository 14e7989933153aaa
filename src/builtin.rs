use std::collections::HashMap;

use lazy_static::lazy_static;
use maplit::hashmap;

use crate::error::{Arity, Error};
use crate::runtime::{BuiltinFn, Environment, Procedure};
use crate::value::Value;

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, BuiltinFn> = hashmap! {
        "+" => sum as BuiltinFn,
        "-" => minus as BuiltinFn,
        "*" => times as BuiltinFn,
        "/" => divide as BuiltinFn,
        ">" => greater as BuiltinFn,
        "<" => less as BuiltinFn,
        "=" => num_eq as BuiltinFn,
        "<=" => less_equal as BuiltinFn,
        ">=" => greater_equal as BuiltinFn,
    };
}

fn numbers(name: &str, args: &[Value]) -> Result<Vec<f64>, Error> {
    args.iter()
        .map(|arg| arg.as_number().ok_or_else(|| Error::TypeMismatch {
            procedure: name.to_string(),
            got: arg.to_string(),
        }))
        .collect()
}

// Left fold from the first argument, so `(- 5)` is 5.
fn fold<F>(name: &str, args: &[Value], op: F) -> Result<Value, Error>
    where F: Fn(f64, f64) -> f64 {

    let total = match numbers(name, args)?.split_first() {
        Some((first, rest)) => rest.iter().fold(*first, |acc, n| op(acc, *n)),
        None => return Err(Error::arity(name, Arity::AtLeast(1), 0)),
    };
    Ok(Value::number(total))
}

fn comparison<F>(name: &str, args: &[Value], cmp: F) -> Result<Value, Error>
    where F: Fn(f64, f64) -> bool {

    if args.len() != 2 {
        return Err(Error::arity(name, Arity::Exactly(2), args.len()));
    }
    let numbers = numbers(name, args)?;
    Ok(Value::boolean(cmp(numbers[0], numbers[1])))
}

fn sum(args: &[Value]) -> Result<Value, Error> {
    fold("+", args, |n, m| n + m)
}

fn minus(args: &[Value]) -> Result<Value, Error> {
    fold("-", args, |n, m| n - m)
}

fn times(args: &[Value]) -> Result<Value, Error> {
    fold("*", args, |n, m| n * m)
}

fn divide(args: &[Value]) -> Result<Value, Error> {
    fold("/", args, |n, m| n / m)
}

fn greater(args: &[Value]) -> Result<Value, Error> {
    comparison(">", args, |n, m| n > m)
}

fn less(args: &[Value]) -> Result<Value, Error> {
    comparison("<", args, |n, m| n < m)
}

fn num_eq(args: &[Value]) -> Result<Value, Error> {
    comparison("=", args, |n, m| n == m)
}

fn less_equal(args: &[Value]) -> Result<Value, Error> {
    comparison("<=", args, |n, m| n <= m)
}

fn greater_equal(args: &[Value]) -> Result<Value, Error> {
    comparison(">=", args, |n, m| n >= m)
}

/// A fresh root scope holding every builtin. Definitions made in it never
/// reach the shared table.
pub fn initial_environment() -> Environment {
    let bindings = BUILTINS.iter()
        .map(|(&name, &func)| {
            (name.to_string(), Value::procedure(Procedure::builtin(name, func)))
        })
        .collect();
    Environment::root(bindings)
}

#[cfg(test)]
mod test {
    use super::initial_environment;
    use crate::error::{Arity, Error};
    use crate::read::parse;
    use crate::value::Value;

    fn eval(input: &str) -> Result<Value, Error> {
        parse(input).unwrap().eval(&initial_environment())
    }

    fn comparison(input: &str, output: Value) {
        assert_eq!(eval(input), Ok(output));
    }

    fn num(n: f64) -> Value {
        Value::number(n)
    }

    #[test]
    fn test_sums() {
        comparison("(+ 1 5 (+ 20) 1)", num(27.0));
    }

    #[test]
    fn test_product() {
        comparison("(* 2 2)", num(4.0));
        comparison("(* 3.5 2 2)", num(14.0));
    }

    #[test]
    fn test_minus_folds_left() {
        comparison("(- 10 3 2)", num(5.0));
        comparison("(- 5)", num(5.0));
    }

    #[test]
    fn test_divide() {
        comparison("(/ 12 3 2)", num(2.0));
        comparison("(/ 1 4)", num(0.25));
        comparison("(/ 1 0)", num(std::f64::INFINITY));
    }

    #[test]
    fn test_arithmetic_needs_an_argument() {
        assert_eq!(eval("(+)"), Err(Error::ArityMismatch {
            procedure: "+".to_string(),
            expected: Arity::AtLeast(1),
            got: 0,
        }));
    }

    #[test]
    fn test_comparisons() {
        comparison("(> 3 2)", Value::boolean(true));
        comparison("(< 3 2)", Value::boolean(false));
        comparison("(= 2 2.0)", Value::boolean(true));
        comparison("(<= 2 2)", Value::boolean(true));
        comparison("(>= 1 2)", Value::boolean(false));
    }

    #[test]
    fn test_comparison_is_binary() {
        assert_eq!(eval("(< 1 2 3)"), Err(Error::ArityMismatch {
            procedure: "<".to_string(),
            expected: Arity::Exactly(2),
            got: 3,
        }));
        assert_eq!(eval("(= 1)"), Err(Error::ArityMismatch {
            procedure: "=".to_string(),
            expected: Arity::Exactly(2),
            got: 1,
        }));
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(eval("(+ 1 \"two\")"), Err(Error::TypeMismatch {
            procedure: "+".to_string(),
            got: "\"two\"".to_string(),
        }));
        assert_eq!(eval("(> (quote a) 1)"), Err(Error::TypeMismatch {
            procedure: ">".to_string(),
            got: "a".to_string(),
        }));
    }

    #[test]
    fn test_root_environments_are_independent() {
        let env = initial_environment();
        parse("(define + 1)").unwrap().eval(&env).unwrap();
        assert_eq!(env.get("+"), Ok(num(1.0)));
        comparison("(+ 1 1)", num(2.0));
    }
}
