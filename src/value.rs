use std::fmt;

use gc::{Finalize, Gc, Trace};

use crate::runtime::Procedure;

#[derive(Debug, Finalize, PartialEq, Trace)]
enum ValueData {
    Number(f64),
    Boolean(bool),
    Symbol(String),
    List(Vec<Value>),
    Procedure(Procedure),
}

/// A runtime value. Parsed code is made of the same values (numbers, symbols
/// and lists), so quoting an expression needs no conversion.
#[derive(Clone, Finalize, Trace)]
pub struct Value(Gc<ValueData>);

impl Value {
    fn from_data(data: ValueData) -> Value {
        Value(Gc::new(data))
    }

    pub fn number(n: f64) -> Value {
        Value::from_data(ValueData::Number(n))
    }

    pub fn as_number(&self) -> Option<f64> {
        if let ValueData::Number(n) = *self.0 {
            Some(n)
        } else {
            None
        }
    }

    pub fn boolean(b: bool) -> Value {
        Value::from_data(ValueData::Boolean(b))
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let ValueData::Boolean(b) = *self.0 {
            Some(b)
        } else {
            None
        }
    }

    pub fn symbol<S: ToString>(s: S) -> Value {
        Value::from_data(ValueData::Symbol(s.to_string()))
    }

    /// Symbol text, string literals included (quotes and all).
    pub fn as_symbol(&self) -> Option<&str> {
        if let ValueData::Symbol(ref s) = *self.0 {
            Some(s.as_str())
        } else {
            None
        }
    }

    /// A symbol spelled `"..."` evaluates to itself.
    pub fn is_string_literal(&self) -> bool {
        self.as_symbol().map_or(false, |s| {
            s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
        })
    }

    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::from_data(ValueData::List(items.into_iter().collect()))
    }

    pub fn empty_list() -> Value {
        Value::list(Vec::new())
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        if let ValueData::List(ref items) = *self.0 {
            Some(items.as_slice())
        } else {
            None
        }
    }

    pub(crate) fn procedure(procc: Procedure) -> Value {
        Value::from_data(ValueData::Procedure(procc))
    }

    pub fn as_procedure(&self) -> Option<Procedure> {
        if let ValueData::Procedure(ref procc) = *self.0 {
            Some(procc.clone())
        } else {
            None
        }
    }

    /// Only `false`, zero and NaN are false.
    pub fn truthy(&self) -> bool {
        match *self.0 {
            ValueData::Boolean(b) => b,
            ValueData::Number(n) => n != 0.0 && !n.is_nan(),
            _ => true,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        *self.0 == *other.0
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ValueData::Number(n) => write!(f, "{}", n),
            ValueData::Boolean(b) => write!(f, "{}", b),
            ValueData::Symbol(ref s) => write!(f, "{}", s),
            ValueData::List(ref items) => {
                write!(f, "(")?;
                for (n, x) in items.iter().enumerate() {
                    if n > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", x)?;
                }
                write!(f, ")")
            }
            ValueData::Procedure(ref procc) => write!(f, "{}", procc),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Value;

    #[test]
    fn test_display_list() {
        let value = Value::list(vec![
            Value::symbol("*"),
            Value::number(3.14),
            Value::list(vec![Value::symbol("r"), Value::boolean(true)]),
            Value::empty_list(),
        ]);
        assert_eq!(value.to_string(), "(* 3.14 (r true) ())");
    }

    #[test]
    fn test_display_integral_number() {
        assert_eq!(Value::number(25.0).to_string(), "25");
    }

    #[test]
    fn test_string_literal() {
        assert!(Value::symbol("\"hi there\"").is_string_literal());
        assert!(Value::symbol("\"\"").is_string_literal());
        assert!(!Value::symbol("\"").is_string_literal());
        assert!(!Value::symbol("hi").is_string_literal());
        assert!(!Value::number(1.0).is_string_literal());
    }

    #[test]
    fn test_truthy() {
        assert!(!Value::boolean(false).truthy());
        assert!(!Value::number(0.0).truthy());
        assert!(!Value::number(std::f64::NAN).truthy());
        assert!(Value::number(-1.0).truthy());
        assert!(Value::empty_list().truthy());
        assert!(Value::symbol("x").truthy());
    }
}
