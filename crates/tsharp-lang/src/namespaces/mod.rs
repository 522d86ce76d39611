use crate::error::{Arity, ErrorKind, RunError};
use crate::runtime::objects::ObjectTable;
use crate::runtime::output::{OutputLine, PointSeries, Severity};
use crate::Value;

// ─── Runtime state ────────────────────────────────────────────────────────────

/// Everything a built-in may touch during one run: the object table and the
/// two output sinks. Owned by the interpreter, lent to every call.
#[derive(Debug, Default)]
pub struct RuntimeState {
    pub objects: ObjectTable,
    pub output: Vec<OutputLine>,
    pub series: Vec<PointSeries>,
}

impl RuntimeState {
    pub fn emit(&mut self, severity: Severity, text: impl Into<String>) {
        self.output.push(OutputLine::new(severity, text));
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.emit(Severity::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.emit(Severity::Success, text);
    }

    pub fn push_series(&mut self, series: PointSeries) {
        log::debug!("series `{}` with {} points", series.label, series.points.len());
        self.series.push(series);
    }
}

pub mod core;
pub mod numbers;
pub mod objects;
pub mod physics;
pub mod stats;
pub mod text;

// ─── Export ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Export {
    pub name: &'static str,
    pub arity: Arity,
}

pub(crate) const fn f(name: &'static str, arity: Arity) -> Export {
    Export { name, arity }
}

// ─── Provider interface ───────────────────────────────────────────────────────

pub trait NamespaceInfo {
    fn name(&self) -> &'static str;
    fn exports(&self) -> Vec<Export>;

    fn get_export(&self, name: &str) -> Option<Export> {
        self.exports().into_iter().find(|e| e.name == name)
    }
}

/// Runtime side of a namespace: call dispatch and constants. Arity is checked
/// by the registry before `call` runs, so `args.len()` always satisfies the
/// export's `Arity`.
pub trait NamespaceProvider: NamespaceInfo {
    fn call(
        &self,
        name: &str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<Option<Value>, RunError>;

    fn constants(&self) -> Vec<(&'static str, Value)> { Vec::new() }
}

// ─── Registry ─────────────────────────────────────────────────────────────────

pub struct NamespaceRegistry {
    providers: Vec<Box<dyn NamespaceProvider>>,
}

impl NamespaceRegistry {
    pub fn new() -> Self { Self { providers: Vec::new() } }

    pub fn register(&mut self, p: Box<dyn NamespaceProvider>) {
        log::trace!("namespace `{}` registered with {} exports", p.name(), p.exports().len());
        self.providers.push(p);
    }

    pub fn get_export(&self, name: &str) -> Option<Export> {
        self.providers.iter().find_map(|p| p.get_export(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_export(name).is_some()
    }

    pub fn call(
        &self,
        name: &str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<Value, RunError> {
        for p in &self.providers {
            let Some(export) = p.get_export(name) else { continue };
            if !export.arity.accepts(args.len()) {
                return Err(RunError::new(line, ErrorKind::ArityMismatch {
                    callee: name.to_string(),
                    expected: export.arity,
                    got: args.len(),
                }));
            }
            if let Some(v) = p.call(name, args, state, line)? {
                return Ok(v);
            }
        }
        Err(RunError::new(line, ErrorKind::UndefinedFunction { name: name.to_string() }))
    }

    pub fn constants(&self) -> Vec<(&'static str, Value)> {
        self.providers.iter().flat_map(|p| p.constants()).collect()
    }

    pub fn standard() -> Self {
        let mut r = Self::new();
        r.register(Box::new(core::CoreNamespace));
        r.register(Box::new(numbers::NumbersNamespace));
        r.register(Box::new(objects::ObjectsNamespace));
        r.register(Box::new(physics::PhysicsNamespace));
        r.register(Box::new(stats::StatsNamespace));
        r.register(Box::new(text::TextNamespace));
        r
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self { Self::standard() }
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

pub(crate) fn as_number(v: &Value, callee: &str, line: usize) -> Result<f64, RunError> {
    match v {
        Value::Number(x) => Ok(*x),
        _ => Err(RunError::new(line, ErrorKind::type_mismatch(format!(
            "`{callee}` expects a number, got {}", v.type_name()
        )))),
    }
}

pub(crate) fn as_numbers(args: &[Value], callee: &str, line: usize) -> Result<Vec<f64>, RunError> {
    args.iter().map(|a| as_number(a, callee, line)).collect()
}

pub(crate) fn as_str<'v>(v: &'v Value, callee: &str, line: usize) -> Result<&'v str, RunError> {
    match v {
        Value::Str(s) => Ok(s),
        _ => Err(RunError::new(line, ErrorKind::type_mismatch(format!(
            "`{callee}` expects a string, got {}", v.type_name()
        )))),
    }
}

pub(crate) fn as_handle(v: &Value, callee: &str, line: usize) -> Result<u64, RunError> {
    match v {
        Value::Object(id) => Ok(*id),
        _ => Err(RunError::new(line, ErrorKind::type_mismatch(format!(
            "`{callee}` expects an object handle, got {}", v.type_name()
        )))),
    }
}

/// A non-negative integer-valued number, as taken by the counting functions.
pub(crate) fn as_count(v: &Value, callee: &str, line: usize) -> Result<u64, RunError> {
    let x = as_number(v, callee, line)?;
    if x < 0.0 || x.fract() != 0.0 || !x.is_finite() {
        return Err(RunError::new(line, ErrorKind::domain(format!(
            "`{callee}` expects a non-negative integer, got {}", crate::runtime::value::format_number(x)
        ))));
    }
    Ok(x as u64)
}

/// Fails with `MathDomainError` unless `x` is finite.
pub(crate) fn finite(x: f64, callee: &str, line: usize) -> Result<Value, RunError> {
    if x.is_finite() {
        Ok(Value::Number(x))
    } else {
        Err(RunError::new(line, ErrorKind::domain(format!("`{callee}` result is not a finite number"))))
    }
}

/// Two-decimal rendering used by summary lines.
pub(crate) fn fmt2(x: f64) -> String {
    format!("{:.2}", x + 0.0)
}

pub(crate) fn domain_err(line: usize, msg: impl Into<String>) -> RunError {
    RunError::new(line, ErrorKind::domain(msg))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn call(name: &str, args: &[Value]) -> Result<Value, RunError> {
        let mut state = RuntimeState::default();
        NamespaceRegistry::standard().call(name, args, &mut state, 1)
    }

    pub fn call_with(state: &mut RuntimeState, name: &str, args: &[Value]) -> Result<Value, RunError> {
        NamespaceRegistry::standard().call(name, args, state, 1)
    }

    pub fn num(name: &str, args: &[f64]) -> f64 {
        let args: Vec<Value> = args.iter().map(|x| Value::Number(*x)).collect();
        match call(name, &args) {
            Ok(Value::Number(x)) => x,
            other => panic!("`{name}` returned {other:?}"),
        }
    }

    pub fn err_name(name: &str, args: &[f64]) -> &'static str {
        let args: Vec<Value> = args.iter().map(|x| Value::Number(*x)).collect();
        match call(name, &args) {
            Err(e) => e.name(),
            Ok(v) => panic!("`{name}` should have failed, returned {v:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::test_support::call;

    #[test]
    fn export_names_are_unique() {
        let registry = NamespaceRegistry::standard();
        let mut names: Vec<&str> = registry.providers.iter()
            .flat_map(|p| p.exports().into_iter().map(|e| e.name))
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn standard_namespaces_in_dispatch_order() {
        let registry = NamespaceRegistry::standard();
        let names: Vec<&str> = registry.providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["core", "numbers", "objects", "physics", "stats", "text"]);
    }

    #[test]
    fn arity_checked_before_dispatch() {
        let err = call("sqrt", &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArityMismatch {
            callee: "sqrt".into(),
            expected: Arity::Exact(1),
            got: 0,
        });
    }

    #[test]
    fn unknown_name() {
        let err = call("teleport", &[]).unwrap_err();
        assert_eq!(err.name(), "UndefinedFunction");
    }

    #[test]
    fn constants_exposed() {
        let names: Vec<&str> = NamespaceRegistry::standard().constants().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["PI", "E", "TAU"]);
    }

    #[test]
    fn count_rejects_fractions_and_negatives() {
        assert!(as_count(&Value::Number(3.0), "f", 1).is_ok());
        assert_eq!(as_count(&Value::Number(2.5), "f", 1).unwrap_err().name(), "MathDomainError");
        assert_eq!(as_count(&Value::Number(-1.0), "f", 1).unwrap_err().name(), "MathDomainError");
        assert_eq!(as_count(&Value::Str("3".into()), "f", 1).unwrap_err().name(), "TypeMismatch");
    }
}
