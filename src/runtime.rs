use std::collections::HashMap;
use std::fmt;

use gc::{Finalize, Gc, GcCell, Trace};

use crate::error::{Arity, Error};
use crate::syntax::SpecialForm;
use crate::value::Value;

/// Wrapper type for unevaluated expressions.
#[derive(Clone, Debug, Finalize, PartialEq, Trace)]
pub struct Expression(pub Value);

// Clone-by-reference environment
#[derive(Clone, Finalize, Trace)]
pub struct Environment(Gc<GcCell<EnvironmentData>>);

#[derive(Finalize, Trace)]
struct EnvironmentData {
    parent: Option<Environment>,
    local: HashMap<String, Value>,
}

#[derive(Clone, Finalize, Trace)]
pub struct Procedure(ProcEnum);

#[derive(Clone, Finalize, Trace)]
enum ProcEnum {
    Builtin(Builtin),
    Closure(Gc<Closure>),
}

pub type BuiltinFn = fn(&[Value]) -> Result<Value, Error>;

/// A native procedure over already-evaluated arguments.
#[derive(Clone, Copy, Finalize)]
pub struct Builtin {
    name: &'static str,
    func: BuiltinFn,
}

unsafe impl Trace for Builtin {
    gc::unsafe_empty_trace!();
}

#[derive(Finalize, Trace)]
pub struct Closure {
    params: Vec<String>,
    body: Expression,
    environment: Environment,
}

impl Expression {
    pub fn eval(&self, env: &Environment) -> Result<Value, Error> {
        log::trace!("eval {}", self);

        if let Some(s) = self.0.as_symbol() {
            if self.0.is_string_literal() {
                return Ok(self.0.clone());
            }
            return env.get(s);
        }

        let items = match self.0.as_list() {
            Some(items) => items,
            // Numbers, and booleans or procedures built at runtime
            None => return Ok(self.0.clone()),
        };
        let (operator, operands) = match items.split_first() {
            Some(split) => split,
            None => return Ok(self.0.clone()),
        };

        if let Some(form) = operator.as_symbol().and_then(SpecialForm::from_keyword) {
            let operands: Vec<Expression> = operands.iter()
                .cloned()
                .map(Expression)
                .collect();
            return form.apply(&operands, env);
        }

        // Procedure call, evaluated left to right with the operator first
        let procedure = Expression(operator.clone()).eval(env)?;
        let args = operands.iter()
            .map(|operand| Expression(operand.clone()).eval(env))
            .collect::<Result<Vec<_>, _>>()?;
        match procedure.as_procedure() {
            Some(procc) => procc.apply(args),
            None => Err(Error::NotCallable(procedure.to_string())),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Procedure {
    pub fn builtin(name: &'static str, func: BuiltinFn) -> Procedure {
        Procedure(ProcEnum::Builtin(Builtin { name, func }))
    }

    pub(crate) fn closure(params: Vec<String>, body: Expression,
        environment: Environment) -> Procedure {

        Procedure(ProcEnum::Closure(Gc::new(Closure {
            params,
            body,
            environment,
        })))
    }

    pub fn apply(&self, args: Vec<Value>) -> Result<Value, Error> {
        log::trace!("apply {} to {} argument(s)", self, args.len());

        match self.0 {
            ProcEnum::Builtin(ref builtin) => (builtin.func)(&args),
            ProcEnum::Closure(ref lamb) => {
                if args.len() != lamb.params.len() {
                    return Err(Error::arity(&self.to_string(),
                        Arity::Exactly(lamb.params.len()), args.len()));
                }
                let bindings = lamb.params.iter()
                    .cloned()
                    .zip(args)
                    .collect();
                lamb.body.eval(&lamb.environment.child(bindings))
            }
        }
    }
}

impl PartialEq for Procedure {
    fn eq(&self, other: &Procedure) -> bool {
        match (&self.0, &other.0) {
            (ProcEnum::Builtin(a), ProcEnum::Builtin(b)) => a.name == b.name,
            (ProcEnum::Closure(a), ProcEnum::Closure(b)) => {
                std::ptr::eq::<Closure>(&**a, &**b)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            ProcEnum::Builtin(ref builtin) => {
                write!(f, "<builtin {}>", builtin.name)
            }
            ProcEnum::Closure(ref lamb) => {
                write!(f, "<lambda ({})>", lamb.params.join(" "))
            }
        }
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Environment {
    fn from_data(data: EnvironmentData) -> Environment {
        Environment(Gc::new(GcCell::new(data)))
    }

    /// A scope with no parent.
    pub fn root(bindings: HashMap<String, Value>) -> Environment {
        Environment::from_data(EnvironmentData {
            parent: None,
            local: bindings,
        })
    }

    /// A new scope over `bindings` whose parent is `self`.
    pub fn child(&self, bindings: HashMap<String, Value>) -> Environment {
        Environment::from_data(EnvironmentData {
            parent: Some(self.clone()),
            local: bindings,
        })
    }

    pub fn get(&self, name: &str) -> Result<Value, Error> {
        self.lookup(name)
            .ok_or_else(|| Error::UnboundVariable(name.to_string()))
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        let data = self.0.borrow();
        data.local.get(name).cloned()
            .or_else(|| data.parent.as_ref().and_then(|env| env.lookup(name)))
    }

    /// Binds `name` in this scope only, shadowing any outer binding.
    pub fn define(&self, name: &str, value: Value) {
        self.0.borrow_mut().local.insert(name.to_string(), value);
    }

    /// Overwrites the nearest existing binding of `name`.
    pub fn set(&self, name: &str, value: Value) -> Result<(), Error> {
        let parent = {
            let mut data = self.0.borrow_mut();
            if let Some(slot) = data.local.get_mut(name) {
                *slot = value;
                return Ok(());
            }
            data.parent.clone()
        };

        match parent {
            Some(env) => env.set(name, value),
            None => Err(Error::UnboundVariable(name.to_string())),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.0.borrow();
        let mut names: Vec<&String> = data.local.keys().collect();
        names.sort();
        write!(f, "<environment {:?}{}>", names,
            if data.parent.is_some() { " ..." } else { "" })
    }
}
