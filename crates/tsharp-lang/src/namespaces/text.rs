//! String helpers and value introspection.

use crate::error::{Arity, ErrorKind, RunError};
use crate::Value;
use super::{Export, NamespaceInfo, NamespaceProvider, RuntimeState, as_str, f};

pub struct TextNamespace;

impl NamespaceInfo for TextNamespace {
    fn name(&self) -> &'static str { "text" }

    fn exports(&self) -> Vec<Export> {
        vec![
            f("length",    Arity::Exact(1)),
            f("uppercase", Arity::Exact(1)),
            f("lowercase", Arity::Exact(1)),
            f("str",       Arity::Exact(1)),
            f("num",       Arity::Exact(1)),
            f("typeof",    Arity::Exact(1)),
        ]
    }
}

impl NamespaceProvider for TextNamespace {
    fn call(
        &self,
        name: &str,
        args: &[Value],
        _state: &mut RuntimeState,
        line: usize,
    ) -> Result<Option<Value>, RunError> {
        let v = match name {
            "length"    => Value::Number(as_str(&args[0], name, line)?.chars().count() as f64),
            "uppercase" => Value::Str(as_str(&args[0], name, line)?.to_uppercase()),
            "lowercase" => Value::Str(as_str(&args[0], name, line)?.to_lowercase()),
            "str"       => Value::Str(args[0].to_string()),
            "typeof"    => Value::Str(args[0].type_name().to_string()),
            "num" => match &args[0] {
                Value::Number(x) => Value::Number(*x),
                Value::Str(s) => match s.trim().parse::<f64>() {
                    Ok(x) if x.is_finite() => Value::Number(x),
                    _ => return Err(RunError::new(line, ErrorKind::type_mismatch(format!(
                        "cannot convert \"{s}\" to a number"
                    )))),
                },
                other => return Err(RunError::new(line, ErrorKind::type_mismatch(format!(
                    "cannot convert {} to a number", other.type_name()
                )))),
            },
            _ => return Ok(None),
        };
        Ok(Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::call;
    use super::*;

    fn s(x: &str) -> Value { Value::Str(x.into()) }

    fn text(name: &str, arg: Value) -> String {
        match call(name, &[arg]) {
            Ok(Value::Str(s)) => s,
            other => panic!("`{name}` returned {other:?}"),
        }
    }

    #[test]
    fn length_counts_characters() {
        assert!(matches!(call("length", &[s("héllo")]), Ok(Value::Number(n)) if n == 5.0));
        assert_eq!(call("length", &[Value::Number(3.0)]).unwrap_err().name(), "TypeMismatch");
    }

    #[test]
    fn case_conversion() {
        assert_eq!(text("uppercase", s("abc")), "ABC");
        assert_eq!(text("lowercase", s("AbC")), "abc");
    }

    #[test]
    fn str_uses_print_format() {
        assert_eq!(text("str", Value::Number(4.0)), "4");
        assert_eq!(text("str", Value::Null), "null");
        assert_eq!(text("str", Value::Object(3)), "3");
    }

    #[test]
    fn num_parses_strings() {
        assert!(matches!(call("num", &[s(" 2.5 ")]), Ok(Value::Number(n)) if n == 2.5));
        assert_eq!(call("num", &[s("abc")]).unwrap_err().name(), "TypeMismatch");
        assert_eq!(call("num", &[s("inf")]).unwrap_err().name(), "TypeMismatch");
        assert_eq!(call("num", &[Value::Bool(true)]).unwrap_err().name(), "TypeMismatch");
    }

    #[test]
    fn typeof_names() {
        assert_eq!(text("typeof", Value::Number(1.0)), "number");
        assert_eq!(text("typeof", s("")), "string");
        assert_eq!(text("typeof", Value::Bool(true)), "boolean");
        assert_eq!(text("typeof", Value::Null), "null");
        assert_eq!(text("typeof", Value::Object(1)), "object");
        assert_eq!(text("typeof", Value::Builtin("sin".into())), "function");
    }
}
