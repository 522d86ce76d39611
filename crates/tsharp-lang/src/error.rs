use std::fmt;

use serde::Serialize;

// ─── Arity ────────────────────────────────────────────────────────────────────

/// Accepted argument count of a callable, used in `ArityMismatch` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, n: usize) -> bool {
        match *self {
            Arity::Exact(k)       => n == k,
            Arity::Range(lo, hi)  => (lo..=hi).contains(&n),
            Arity::AtLeast(k)     => n >= k,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n)       => write!(f, "{n}"),
            Arity::Range(lo, hi)  => write!(f, "{lo} to {hi}"),
            Arity::AtLeast(n)     => write!(f, "at least {n}"),
        }
    }
}

// ─── Error kinds ──────────────────────────────────────────────────────────────

/// Every way a run can fail. Lexer/parser faults surface as `Syntax`;
/// everything else is raised by the evaluator or a built-in.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("expected {expected}, found {found}")]
    Syntax { expected: String, found: String },

    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },

    #[error("undefined function `{name}`")]
    UndefinedFunction { name: String },

    #[error("`{callee}` expects {expected} argument(s), got {got}")]
    ArityMismatch { callee: String, expected: Arity, got: usize },

    #[error("{0}")]
    TypeMismatch(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("{0}")]
    MathDomain(String),

    #[error("object {id} is unknown or destroyed")]
    UnknownOrDeadObject { id: u64 },

    #[error("execution limit of {limit} steps exceeded")]
    ExecutionLimitExceeded { limit: u64 },

    #[error("call depth limit of {limit} exceeded")]
    StackDepthExceeded { limit: usize },

    #[error("`{name}` is a read-only constant")]
    ReadOnlyVariable { name: String },
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Syntax { .. }                 => "SyntaxError",
            Self::UndefinedVariable { .. }      => "UndefinedVariable",
            Self::UndefinedFunction { .. }      => "UndefinedFunction",
            Self::ArityMismatch { .. }          => "ArityMismatch",
            Self::TypeMismatch(_)               => "TypeMismatch",
            Self::DivisionByZero                => "DivisionByZero",
            Self::MathDomain(_)                 => "MathDomainError",
            Self::UnknownOrDeadObject { .. }    => "UnknownOrDeadObject",
            Self::ExecutionLimitExceeded { .. } => "ExecutionLimitExceeded",
            Self::StackDepthExceeded { .. }     => "StackDepthExceeded",
            Self::ReadOnlyVariable { .. }       => "ReadOnlyVariable",
        }
    }

    pub fn syntax(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Syntax { expected: expected.into(), found: found.into() }
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Self::MathDomain(msg.into())
    }
}

// ─────────────────────────────────────────────────────────────────────────────

/// A fault tied to the 1-based source line that triggered it.
#[derive(Debug, Clone, PartialEq)]
pub struct RunError {
    pub kind: ErrorKind,
    pub line: usize,
}

impl RunError {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        Self { kind, line }
    }

    pub fn name(&self) -> &'static str { self.kind.name() }

    pub fn message(&self) -> String { self.kind.to_string() }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] line {}: {}", self.kind.name(), self.line, self.kind)
    }
}

impl std::error::Error for RunError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_accepts() {
        assert!(Arity::Exact(2).accepts(2));
        assert!(!Arity::Exact(2).accepts(3));
        assert!(Arity::Range(1, 2).accepts(1));
        assert!(Arity::Range(1, 2).accepts(2));
        assert!(!Arity::Range(1, 2).accepts(0));
        assert!(Arity::AtLeast(1).accepts(40));
        assert!(!Arity::AtLeast(1).accepts(0));
    }

    #[test]
    fn display_carries_kind_line_and_context() {
        let e = RunError::new(4, ErrorKind::ArityMismatch {
            callee: "add".into(),
            expected: Arity::Exact(2),
            got: 3,
        });
        assert_eq!(e.to_string(), "[ArityMismatch] line 4: `add` expects 2 argument(s), got 3");
        assert_eq!(e.name(), "ArityMismatch");
    }

    #[test]
    fn syntax_message() {
        let e = RunError::new(1, ErrorKind::syntax("`;`", "`}`"));
        assert_eq!(e.message(), "expected `;`, found `}`");
        assert_eq!(e.name(), "SyntaxError");
    }
}
