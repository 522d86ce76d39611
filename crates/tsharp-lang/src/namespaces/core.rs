//! Always-available built-ins: `print`, the math functions, and the
//! pre-bound constants.

use std::f64::consts;

use crate::error::{Arity, RunError};
use crate::Value;
use super::{Export, NamespaceInfo, NamespaceProvider, RuntimeState, as_numbers, domain_err, f, finite};

use Arity::{AtLeast, Exact, Range};

pub fn core_exports() -> Vec<Export> {
    vec![
        f("print", AtLeast(0)),

        // Trig
        f("sin",   Exact(1)),
        f("cos",   Exact(1)),
        f("tan",   Exact(1)),
        f("asin",  Exact(1)),
        f("acos",  Exact(1)),
        f("atan",  Exact(1)),
        f("atan2", Exact(2)),

        // Powers and logarithms
        f("sqrt",  Exact(1)),
        f("pow",   Exact(2)),
        f("exp",   Exact(1)),
        f("log",   Range(1, 2)),
        f("ln",    Exact(1)),

        // Rounding and comparison
        f("abs",   Exact(1)),
        f("floor", Exact(1)),
        f("ceil",  Exact(1)),
        f("round", Range(1, 2)),
        f("sign",  Exact(1)),
        f("min",   AtLeast(1)),
        f("max",   AtLeast(1)),
        f("clamp", Exact(3)),
    ]
}

// ─── CoreNamespace — runtime provider ────────────────────────────────────────

pub struct CoreNamespace;

impl NamespaceInfo for CoreNamespace {
    fn name(&self) -> &'static str { "core" }
    fn exports(&self) -> Vec<Export> { core_exports() }
}

impl NamespaceProvider for CoreNamespace {
    fn call(
        &self,
        name: &str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<Option<Value>, RunError> {
        if name == "print" {
            let text = args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(" ");
            state.info(text);
            return Ok(Some(Value::Null));
        }

        let x = as_numbers(args, name, line)?;
        let v = match name {
            // ── 1-arg math ────────────────────────────────────────────────
            "sin"   => finite(x[0].sin(), name, line)?,
            "cos"   => finite(x[0].cos(), name, line)?,
            "tan"   => finite(x[0].tan(), name, line)?,
            "atan"  => finite(x[0].atan(), name, line)?,
            "exp"   => finite(x[0].exp(), name, line)?,
            "abs"   => Value::Number(x[0].abs()),
            "floor" => Value::Number(x[0].floor()),
            "ceil"  => Value::Number(x[0].ceil()),
            "sign"  => Value::Number(if x[0] > 0.0 { 1.0 } else if x[0] < 0.0 { -1.0 } else { 0.0 }),
            "asin" | "acos" => {
                if !(-1.0..=1.0).contains(&x[0]) {
                    return Err(domain_err(line, format!("`{name}` is only defined on [-1, 1]")));
                }
                Value::Number(if name == "asin" { x[0].asin() } else { x[0].acos() })
            }
            "sqrt" => {
                if x[0] < 0.0 {
                    return Err(domain_err(line, "square root of a negative number"));
                }
                Value::Number(x[0].sqrt())
            }
            "ln" => {
                if x[0] <= 0.0 {
                    return Err(domain_err(line, "logarithm of a non-positive number"));
                }
                Value::Number(x[0].ln())
            }
            "log" => {
                if x[0] <= 0.0 {
                    return Err(domain_err(line, "logarithm of a non-positive number"));
                }
                match x.get(1) {
                    None => Value::Number(x[0].log10()),
                    Some(&base) if base > 0.0 && base != 1.0 => finite(x[0].log(base), name, line)?,
                    Some(_) => return Err(domain_err(line, "logarithm base must be positive and not 1")),
                }
            }

            // ── 2-arg math ────────────────────────────────────────────────
            "pow"   => finite(x[0].powf(x[1]), name, line)?,
            "atan2" => Value::Number(x[0].atan2(x[1])),
            "round" => match x.get(1) {
                None => Value::Number(x[0].round()),
                Some(&places) => {
                    let scale = 10f64.powi(places.round() as i32);
                    finite((x[0] * scale).round() / scale, name, line)?
                }
            },

            // ── n-arg ─────────────────────────────────────────────────────
            "min" => Value::Number(x.iter().copied().fold(f64::INFINITY, f64::min)),
            "max" => Value::Number(x.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            "clamp" => {
                let (v, lo, hi) = (x[0], x[1], x[2]);
                if !(lo <= hi) {
                    return Err(domain_err(line, "`clamp` needs lo <= hi"));
                }
                Value::Number(v.clamp(lo, hi))
            }

            _ => return Ok(None),
        };
        Ok(Some(v))
    }

    fn constants(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("PI",  Value::Number(consts::PI)),
            ("E",   Value::Number(consts::E)),
            ("TAU", Value::Number(consts::TAU)),
        ]
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
