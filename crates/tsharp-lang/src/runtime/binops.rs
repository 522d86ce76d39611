//! Operator table — maps (BinOp, lhs kind, rhs kind) → implementation.
//!
//! `==` and `!=` are defined for every pair of kinds and never reach the
//! table. Any other pair with no entry is a type mismatch.

use std::collections::HashMap;

use crate::error::ErrorKind;
use crate::runtime::value::{Value, values_equal};
use crate::syntax::ast::BinOp;

pub type BinopFn = fn(Value, Value) -> Result<Value, ErrorKind>;

const KINDS: [&str; 6] = ["number", "string", "boolean", "null", "object", "function"];

pub struct BinopRegistry {
    ops: HashMap<(BinOp, &'static str, &'static str), BinopFn>,
}

impl BinopRegistry {
    pub fn new() -> Self {
        Self { ops: HashMap::new() }
    }

    pub fn register(&mut self, op: BinOp, lhs: &'static str, rhs: &'static str, f: BinopFn) {
        self.ops.insert((op, lhs, rhs), f);
    }

    pub fn eval(&self, op: BinOp, l: Value, r: Value) -> Result<Value, ErrorKind> {
        match op {
            BinOp::Eq    => return Ok(Value::Bool(values_equal(&l, &r))),
            BinOp::NotEq => return Ok(Value::Bool(!values_equal(&l, &r))),
            _ => {}
        }
        let (lkey, rkey) = (l.type_name(), r.type_name());
        match self.ops.get(&(op, lkey, rkey)) {
            Some(f) => f(l, r),
            None => Err(ErrorKind::type_mismatch(format!(
                "operator `{}` cannot be applied to {lkey} and {rkey}", op.symbol()
            ))),
        }
    }
}

impl Default for BinopRegistry {
    fn default() -> Self {
        let mut r = Self::new();
        register_number(&mut r);
        register_string(&mut r);
        r
    }
}

// ─── number ───────────────────────────────────────────────────────────────────

fn register_number(r: &mut BinopRegistry) {
    use BinOp::*;
    r.register(Add, "number", "number", |l, r| { let (Value::Number(a), Value::Number(b)) = (l, r) else { unreachable!() }; Ok(Value::Number(a + b)) });
    r.register(Sub, "number", "number", |l, r| { let (Value::Number(a), Value::Number(b)) = (l, r) else { unreachable!() }; Ok(Value::Number(a - b)) });
    r.register(Mul, "number", "number", |l, r| { let (Value::Number(a), Value::Number(b)) = (l, r) else { unreachable!() }; Ok(Value::Number(a * b)) });
    r.register(Div, "number", "number", |l, r| {
        let (Value::Number(a), Value::Number(b)) = (l, r) else { unreachable!() };
        if b == 0.0 { return Err(ErrorKind::DivisionByZero); }
        let q = a / b;
        if q.is_finite() { Ok(Value::Number(q)) }
        else { Err(ErrorKind::domain(format!("{a} / {b} is not a finite number"))) }
    });
    r.register(Mod, "number", "number", |l, r| {
        let (Value::Number(a), Value::Number(b)) = (l, r) else { unreachable!() };
        if b == 0.0 { Err(ErrorKind::DivisionByZero) }
        else { Ok(Value::Number(a % b)) }
    });
    r.register(Lt,   "number", "number", |l, r| { let (Value::Number(a), Value::Number(b)) = (l, r) else { unreachable!() }; Ok(Value::Bool(a <  b)) });
    r.register(LtEq, "number", "number", |l, r| { let (Value::Number(a), Value::Number(b)) = (l, r) else { unreachable!() }; Ok(Value::Bool(a <= b)) });
    r.register(Gt,   "number", "number", |l, r| { let (Value::Number(a), Value::Number(b)) = (l, r) else { unreachable!() }; Ok(Value::Bool(a >  b)) });
    r.register(GtEq, "number", "number", |l, r| { let (Value::Number(a), Value::Number(b)) = (l, r) else { unreachable!() }; Ok(Value::Bool(a >= b)) });
}

// ─── string ───────────────────────────────────────────────────────────────────

fn register_string(r: &mut BinopRegistry) {
    use BinOp::*;
    // `+` with a string on either side concatenates the printed forms
    for other in KINDS {
        r.register(Add, "string", other, |l, r| Ok(Value::Str(format!("{l}{r}"))));
        r.register(Add, other, "string", |l, r| Ok(Value::Str(format!("{l}{r}"))));
    }
    r.register(Lt,   "string", "string", |l, r| { let (Value::Str(a), Value::Str(b)) = (l, r) else { unreachable!() }; Ok(Value::Bool(a <  b)) });
    r.register(LtEq, "string", "string", |l, r| { let (Value::Str(a), Value::Str(b)) = (l, r) else { unreachable!() }; Ok(Value::Bool(a <= b)) });
    r.register(Gt,   "string", "string", |l, r| { let (Value::Str(a), Value::Str(b)) = (l, r) else { unreachable!() }; Ok(Value::Bool(a >  b)) });
    r.register(GtEq, "string", "string", |l, r| { let (Value::Str(a), Value::Str(b)) = (l, r) else { unreachable!() }; Ok(Value::Bool(a >= b)) });
}
