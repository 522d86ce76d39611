pub mod syntax;
pub mod runtime;
pub mod error;
pub mod namespaces;

pub use error::{Arity, ErrorKind, RunError};
pub use syntax::ast::Program;
pub use syntax::token::{Token, TokenKind};
pub use runtime::objects::{GameObject, ObjectTable};
pub use runtime::output::{OutputLine, PointSeries, Severity};
pub use runtime::value::Value;
pub use namespaces::RuntimeState;

use std::fmt;

use serde::Serialize;

use namespaces::NamespaceRegistry;
use runtime::interpreter::Interpreter;

/// Room left on the stack below which recursion moves to a new segment.
const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_SEGMENT: usize = 4 * 1024 * 1024;

/// Runs `f` on a freshly allocated stack segment when the current one is
/// nearly exhausted. Wraps every recursive step of the parser and evaluator,
/// so nesting is bounded by the configured limits rather than the host thread.
pub(crate) fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, f)
}

// ─── Public API types ─────────────────────────────────────────────────────────

/// Ceilings that keep a runaway script from hanging or exhausting the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Executed statements plus loop-condition checks.
    pub max_steps: u64,
    /// Nested user-function calls.
    pub max_call_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_steps: 1_000_000, max_call_depth: 1000 }
    }
}

/// Everything a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub output: Vec<OutputLine>,
    pub series: Vec<PointSeries>,
    pub objects: Vec<GameObject>,
}

/// A failed run: the fault plus all output produced before it. `output`
/// ends with one `Error` line describing the fault. The object table is
/// not exposed.
#[derive(Debug, Clone)]
pub struct RunFailure {
    pub error: RunError,
    pub output: Vec<OutputLine>,
    pub series: Vec<PointSeries>,
}

impl RunFailure {
    fn new(error: RunError, mut output: Vec<OutputLine>, series: Vec<PointSeries>) -> Self {
        output.push(OutputLine::new(Severity::Error, error.to_string()));
        Self { error, output, series }
    }
}

/// A fault raised before anything ran, e.g. a syntax error.
impl From<RunError> for RunFailure {
    fn from(error: RunError) -> Self {
        Self::new(error, Vec::new(), Vec::new())
    }
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

// ─── Public API ───────────────────────────────────────────────────────────────

pub fn tokenize(source: &str) -> Vec<Token> {
    syntax::lexer::Lexer::new(source).tokenize()
}

/// Lex and parse source text. Fails on the first syntax error.
pub fn compile(source: &str) -> Result<Program, RunError> {
    let tokens = tokenize(source);
    log::trace!("tokens: {:?}", tokens.iter().map(|t| &t.kind).collect::<Vec<_>>());
    let program = syntax::parser::Parser::new(tokens).parse()?;
    log::trace!("ast: {program:#?}");
    Ok(program)
}

/// Runs programs against a fresh environment and object table each time.
pub struct Evaluator {
    registry: NamespaceRegistry,
    limits: Limits,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { registry: NamespaceRegistry::standard(), limits }
    }

    pub fn limits(&self) -> Limits { self.limits }

    pub fn run(&self, program: &Program) -> Result<RunResult, RunFailure> {
        log::debug!("run started ({} top-level statements)", program.statements.len());
        let mut interp = Interpreter::new(&self.registry, self.limits);
        let outcome = interp.run(program);
        let steps = interp.steps();
        let state = interp.into_state();

        match outcome {
            Ok(()) => {
                log::debug!(
                    "run finished after {steps} steps: {} lines, {} series, {} objects",
                    state.output.len(), state.series.len(), state.objects.len()
                );
                Ok(RunResult {
                    output: state.output,
                    series: state.series,
                    objects: state.objects.snapshot(),
                })
            }
            Err(error) => {
                log::debug!("run failed after {steps} steps: {error}");
                Err(RunFailure::new(error, state.output, state.series))
            }
        }
    }

    pub fn run_source(&self, source: &str) -> Result<RunResult, RunFailure> {
        let program = compile(source)?;
        self.run(&program)
    }
}

impl Default for Evaluator {
    fn default() -> Self { Self::new() }
}

/// Compile and run `source` with default limits.
pub fn run(source: &str) -> Result<RunResult, RunFailure> {
    Evaluator::new().run_source(source)
}
