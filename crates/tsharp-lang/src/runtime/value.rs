use std::fmt;
use std::rc::Rc;

use crate::runtime::environment::ScopeId;
use crate::syntax::ast::FnDecl;

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    /// Handle into the run's object table.
    Object(u64),
    /// A library function referenced by name.
    Builtin(String),
    Closure(Rc<Closure>),
}

/// A user function paired with the scope it was declared in.
#[derive(Debug)]
pub struct Closure {
    pub decl: Rc<FnDecl>,
    pub env: ScopeId,
}

impl Value {
    /// Name reported by `typeof` and in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_)  => "number",
            Value::Str(_)     => "string",
            Value::Bool(_)    => "boolean",
            Value::Null       => "null",
            Value::Object(_)  => "object",
            Value::Builtin(_) | Value::Closure(_) => "function",
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Str(s)    => !s.is_empty(),
            Value::Bool(b)   => *b,
            Value::Null      => false,
            Value::Object(_) | Value::Builtin(_) | Value::Closure(_) => true,
        }
    }
}

/// Values of different kinds are never equal; functions compare by identity.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x),  Value::Number(y))  => x == y,
        (Value::Str(x),     Value::Str(y))     => x == y,
        (Value::Bool(x),    Value::Bool(y))    => x == y,
        (Value::Null,       Value::Null)       => true,
        (Value::Object(x),  Value::Object(y))  => x == y,
        (Value::Builtin(x), Value::Builtin(y)) => x == y,
        (Value::Closure(x), Value::Closure(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// Renders a number the way `print` shows it: no trailing zeros, `-0` as `0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 { "0".to_string() } else { format!("{n}") }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n)  => f.write_str(&format_number(*n)),
            Value::Str(s)     => f.write_str(s),
            Value::Bool(b)    => write!(f, "{b}"),
            Value::Null       => f.write_str("null"),
            Value::Object(id) => write!(f, "{id}"),
            Value::Builtin(name) => write!(f, "<builtin {name}>"),
            Value::Closure(c) => write!(f, "<func {}>", c.decl.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Number(-4.0).to_string(), "-4");
        assert_eq!(Value::Number(1e21).to_string(), "1000000000000000000000");
    }

    #[test]
    fn other_formatting() {
        assert_eq!(Value::Str("hi".into()).to_string(), "hi");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Object(7).to_string(), "7");
        assert_eq!(Value::Builtin("sin".into()).to_string(), "<builtin sin>");
    }

    #[test]
    fn truthiness() {
        assert!(Value::Number(-1.0).truthy());
        assert!(!Value::Number(0.0).truthy());
        assert!(!Value::Str(String::new()).truthy());
        assert!(Value::Str("0".into()).truthy());
        assert!(!Value::Null.truthy());
        assert!(Value::Object(1).truthy());
    }

    #[test]
    fn equality_across_kinds() {
        assert!(values_equal(&Value::Number(1.0), &Value::Number(1.0)));
        assert!(!values_equal(&Value::Number(1.0), &Value::Str("1".into())));
        assert!(!values_equal(&Value::Number(0.0), &Value::Bool(false)));
        assert!(values_equal(&Value::Null, &Value::Null));
        assert!(!values_equal(&Value::Object(1), &Value::Number(1.0)));
    }
}
