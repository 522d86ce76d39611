//! Integer-flavoured helpers and the quadratic solver.

use crate::error::{Arity, ErrorKind, RunError};
use crate::Value;
use super::{Export, NamespaceInfo, NamespaceProvider, RuntimeState, as_count, as_number, as_numbers, domain_err, f, fmt2};

/// Largest `n` whose factorial is finite in an f64.
const MAX_FACTORIAL: u64 = 170;
/// Largest `n` whose Fibonacci term is finite in an f64.
const MAX_FIBONACCI: u64 = 1476;

pub struct NumbersNamespace;

impl NamespaceInfo for NumbersNamespace {
    fn name(&self) -> &'static str { "numbers" }

    fn exports(&self) -> Vec<Export> {
        vec![
            f("factorial",   Arity::Exact(1)),
            f("fibonacci",   Arity::Exact(1)),
            f("isPrime",     Arity::Exact(1)),
            f("gcd",         Arity::Exact(2)),
            f("lcm",         Arity::Exact(2)),
            f("permutation", Arity::Exact(2)),
            f("combination", Arity::Exact(2)),
            f("quadratic",   Arity::Exact(3)),
        ]
    }
}

impl NamespaceProvider for NumbersNamespace {
    fn call(
        &self,
        name: &str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<Option<Value>, RunError> {
        let v = match name {
            "factorial" => {
                let n = as_count(&args[0], name, line)?;
                if n > MAX_FACTORIAL {
                    return Err(domain_err(line, format!("factorial({n}) overflows")));
                }
                Value::Number((2..=n).fold(1.0, |acc, k| acc * k as f64))
            }
            "fibonacci" => {
                let n = as_count(&args[0], name, line)?;
                if n > MAX_FIBONACCI {
                    return Err(domain_err(line, format!("fibonacci({n}) overflows")));
                }
                Value::Number(fibonacci(n))
            }
            "isPrime" => Value::Bool(is_prime(as_number(&args[0], name, line)?)),
            "gcd" => {
                let (a, b) = (as_integer(&args[0], name, line)?, as_integer(&args[1], name, line)?);
                Value::Number(gcd(a, b) as f64)
            }
            "lcm" => {
                let (a, b) = (as_integer(&args[0], name, line)?, as_integer(&args[1], name, line)?);
                if a == 0 && b == 0 {
                    return Err(domain_err(line, "lcm(0, 0) is undefined"));
                }
                if a == 0 || b == 0 {
                    Value::Number(0.0)
                } else {
                    Value::Number((a / gcd(a, b)) as f64 * b as f64)
                }
            }
            "permutation" | "combination" => {
                let n = as_count(&args[0], name, line)?;
                let r = as_count(&args[1], name, line)?;
                let result = if r > n {
                    Some(0.0)
                } else if name == "permutation" {
                    permutation(n, r)
                } else {
                    combination(n, r)
                };
                match result {
                    Some(x) => Value::Number(x),
                    None => return Err(domain_err(line, format!("{name}({n}, {r}) overflows"))),
                }
            }
            "quadratic" => {
                let c = as_numbers(args, name, line)?;
                quadratic(c[0], c[1], c[2], state, line)?
            }
            _ => return Ok(None),
        };
        Ok(Some(v))
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Any integer-valued number; the sign is dropped.
fn as_integer(v: &Value, callee: &str, line: usize) -> Result<u64, RunError> {
    let x = as_number(v, callee, line)?;
    if x.fract() != 0.0 || !x.is_finite() {
        return Err(RunError::new(line, ErrorKind::domain(format!("`{callee}` expects integers"))));
    }
    Ok(x.abs() as u64)
}

fn fibonacci(n: u64) -> f64 {
    let (mut a, mut b) = (0.0, 1.0);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

fn is_prime(n: f64) -> bool {
    if n < 2.0 || n.fract() != 0.0 || !n.is_finite() {
        return false;
    }
    let n = n as u64;
    if n < 4 { return true; }
    if n % 2 == 0 { return false; }
    let mut d = 3;
    while d <= n / d {
        if n % d == 0 { return false; }
        d += 2;
    }
    true
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `n! / (n - r)!`, or `None` once the product leaves the f64 range.
/// Every factor is at least 1 and they are distinct, so that happens within
/// `MAX_FACTORIAL + 1` steps whatever `n` is.
fn permutation(n: u64, r: u64) -> Option<f64> {
    let mut acc = 1.0;
    for k in (n - r + 1)..=n {
        acc *= k as f64;
        if !acc.is_finite() { return None; }
    }
    Some(acc)
}

/// `n choose r`. The running value at step `i` is at least `2^i`, so an
/// overflowing result is detected after roughly a thousand steps.
fn combination(n: u64, r: u64) -> Option<f64> {
    let r = r.min(n - r);
    let mut acc = 1.0;
    for i in 1..=r {
        acc = acc * (n - r + i) as f64 / i as f64;
        if !acc.is_finite() { return None; }
    }
    Some(acc.round())
}

/// Prints the real roots and returns the larger one, or `Null` without any.
fn quadratic(a: f64, b: f64, c: f64, state: &mut RuntimeState, line: usize) -> Result<Value, RunError> {
    if a == 0.0 {
        return Err(domain_err(line, "quadratic requires a non-zero leading coefficient"));
    }
    let d = b * b - 4.0 * a * c;
    if d < 0.0 {
        state.success(format!("Quadratic: no real solutions (discriminant {})", fmt2(d)));
        return Ok(Value::Null);
    }
    if d == 0.0 {
        let x = -b / (2.0 * a) + 0.0;
        state.success(format!("Quadratic: one repeated root x = {}", fmt2(x)));
        return Ok(Value::Number(x));
    }
    let sq = d.sqrt();
    let x1 = (-b + sq) / (2.0 * a);
    let x2 = (-b - sq) / (2.0 * a);
    state.success(format!("Quadratic: x1 = {}, x2 = {}", fmt2(x1), fmt2(x2)));
    Ok(Value::Number(x1.max(x2)))
}
