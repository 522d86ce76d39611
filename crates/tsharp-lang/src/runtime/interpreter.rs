//! Tree-walking interpreter. Executes a `Program` against one environment,
//! one object table and the two output sinks. Library calls are dispatched
//! through the NamespaceRegistry; the interpreter holds no built-in logic.

use std::rc::Rc;

use crate::error::{Arity, ErrorKind, RunError};
use crate::namespaces::{NamespaceRegistry, RuntimeState};
use crate::runtime::binops::BinopRegistry;
use crate::runtime::environment::Environment;
use crate::runtime::value::{Closure, Value};
use crate::syntax::ast::{Block, Expr, ForStmt, LogicalOp, Program, Stmt, UnOp};
use crate::Limits;

// ─── Control signal ──────────────────────────────────────────────────────────

/// How a statement finished. Non-`Normal` signals unwind enclosing blocks
/// until a loop (`Break`/`Continue`) or a call boundary (`Return`) takes them.
#[derive(Debug)]
enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

enum Callee {
    Builtin(String),
    Closure(Rc<Closure>),
}

// ─── Interpreter ──────────────────────────────────────────────────────────────

pub struct Interpreter<'a> {
    registry: &'a NamespaceRegistry,
    binops: BinopRegistry,
    env: Environment,
    state: RuntimeState,
    limits: Limits,
    steps: u64,
    depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(registry: &'a NamespaceRegistry, limits: Limits) -> Self {
        let mut env = Environment::new();
        for (name, value) in registry.constants() {
            env.define_constant(name, value);
        }
        Self {
            registry,
            binops: BinopRegistry::default(),
            env,
            state: RuntimeState::default(),
            limits,
            steps: 0,
            depth: 0,
        }
    }

    pub fn steps(&self) -> u64 { self.steps }

    /// Consume the interpreter, handing back the object table and sinks.
    pub fn into_state(self) -> RuntimeState { self.state }

    // ─── Entry point ──────────────────────────────────────────────────────────

    pub fn run(&mut self, program: &Program) -> Result<(), RunError> {
        for stmt in &program.statements {
            // the parser rejects top-level `return`/`break`/`continue`
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn tick(&mut self, line: usize) -> Result<(), RunError> {
        self.steps += 1;
        if self.steps > self.limits.max_steps {
            return Err(RunError::new(line, ErrorKind::ExecutionLimitExceeded { limit: self.limits.max_steps }));
        }
        Ok(())
    }

    // ─── Statement executor ───────────────────────────────────────────────────

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RunError> {
        crate::with_stack(|| self.exec_stmt_inner(stmt))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> Result<Flow, RunError> {
        let line = stmt.line();
        self.tick(line)?;
        // statement boundaries are the only points where no closure is in flight
        self.env.maybe_collect();

        match stmt {
            Stmt::VarDecl(v) => {
                let val = match &v.initializer {
                    Some(e) => self.eval_expr(e)?,
                    None    => Value::Null,
                };
                self.env.declare(&v.name, val).map_err(|k| RunError::new(line, k))?;
            }

            Stmt::Expr(e) => { self.eval_expr(e)?; }

            Stmt::Block(b) => return self.exec_block(b),

            Stmt::If(i) => {
                if self.eval_expr(&i.condition)?.truthy() {
                    return self.exec_block(&i.then_block);
                }
                if let Some(else_block) = &i.else_block {
                    return self.exec_block(else_block);
                }
            }

            Stmt::While(w) => {
                loop {
                    self.tick(line)?;
                    if !self.eval_expr(&w.condition)?.truthy() { break; }
                    match self.exec_block(&w.body)? {
                        Flow::Break => break,
                        Flow::Return(v) => return Ok(Flow::Return(v)),
                        Flow::Normal | Flow::Continue => {}
                    }
                }
            }

            Stmt::For(f) => {
                // `init` lives in its own scope around the whole loop
                let saved = self.env.push_scope(self.env.current());
                let result = self.exec_for(f, line);
                self.env.pop_scope(saved);
                return result;
            }

            Stmt::FnDecl(decl) => {
                let closure = Closure { decl: Rc::clone(decl), env: self.env.capture() };
                self.env.declare(&decl.name, Value::Closure(Rc::new(closure)))
                    .map_err(|k| RunError::new(line, k))?;
            }

            Stmt::Return(expr, _) => {
                let val = match expr {
                    Some(e) => self.eval_expr(e)?,
                    None    => Value::Null,
                };
                return Ok(Flow::Return(val));
            }

            Stmt::Break(_)    => return Ok(Flow::Break),
            Stmt::Continue(_) => return Ok(Flow::Continue),
        }
        Ok(Flow::Normal)
    }

    fn exec_for(&mut self, f: &ForStmt, line: usize) -> Result<Flow, RunError> {
        if let Some(init) = &f.init {
            self.exec_stmt(init)?;
        }
        loop {
            self.tick(line)?;
            if let Some(cond) = &f.condition {
                if !self.eval_expr(cond)?.truthy() { break; }
            }
            match self.exec_block(&f.body)? {
                Flow::Break => break,
                Flow::Return(v) => return Ok(Flow::Return(v)),
                Flow::Normal | Flow::Continue => {}
            }
            if let Some(update) = &f.update {
                self.eval_expr(update)?;
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs `block` in a fresh child scope of the current one.
    fn exec_block(&mut self, block: &Block) -> Result<Flow, RunError> {
        let saved = self.env.push_scope(self.env.current());
        let result = self.exec_stmts(&block.stmts);
        self.env.pop_scope(saved);
        result
    }

    fn exec_stmts(&mut self, stmts: &[Stmt]) -> Result<Flow, RunError> {
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Normal => {}
                signal => return Ok(signal),
            }
        }
        Ok(Flow::Normal)
    }

    // ─── Expression evaluator ─────────────────────────────────────────────────

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RunError> {
        crate::with_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> Result<Value, RunError> {
        match expr {
            Expr::Number(v, _)    => Ok(Value::Number(*v)),
            Expr::Bool(v, _)      => Ok(Value::Bool(*v)),
            Expr::StringLit(s, _) => Ok(Value::Str(s.clone())),

            Expr::Ident(name, span) => {
                if let Some(v) = self.env.get(name) {
                    return Ok(v.clone());
                }
                if self.registry.contains(name) {
                    return Ok(Value::Builtin(name.clone()));
                }
                Err(RunError::new(span.line, ErrorKind::UndefinedVariable { name: name.clone() }))
            }

            Expr::BinOp { left, op, right, span } => {
                let l = self.eval_expr(left)?;
                let mark = self.env.hold(&l);
                let r = self.eval_expr(right);
                self.env.release_held(mark);
                self.binops.eval(*op, l, r?).map_err(|k| RunError::new(span.line, k))
            }

            Expr::Logical { left, op, right, .. } => {
                let l = self.eval_expr(left)?.truthy();
                let result = match op {
                    LogicalOp::And => l && self.eval_expr(right)?.truthy(),
                    LogicalOp::Or  => l || self.eval_expr(right)?.truthy(),
                };
                Ok(Value::Bool(result))
            }

            Expr::UnOp { op, operand, span } => {
                let v = self.eval_expr(operand)?;
                match op {
                    UnOp::Not => Ok(Value::Bool(!v.truthy())),
                    UnOp::Neg => match v {
                        Value::Number(x) => Ok(Value::Number(-x)),
                        other => Err(RunError::new(span.line, ErrorKind::type_mismatch(format!(
                            "unary `-` cannot be applied to {}", other.type_name()
                        )))),
                    },
                }
            }

            Expr::Call { callee, args, span } => self.eval_call(callee, args, span.line),

            Expr::Assign { target, value, span } => {
                let val = self.eval_expr(value)?;
                self.env.assign(target, val.clone()).map_err(|k| RunError::new(span.line, k))?;
                Ok(val)
            }
        }
    }

    // ─── Call dispatch ────────────────────────────────────────────────────────

    /// Library names win over script bindings; a binding holding a builtin
    /// dispatches to that builtin.
    fn resolve_callee(&self, name: &str, line: usize) -> Result<Callee, RunError> {
        if self.registry.contains(name) {
            return Ok(Callee::Builtin(name.to_string()));
        }
        match self.env.get(name) {
            Some(Value::Closure(c))    => Ok(Callee::Closure(Rc::clone(c))),
            Some(Value::Builtin(b))    => Ok(Callee::Builtin(b.clone())),
            Some(other) => Err(RunError::new(line, ErrorKind::type_mismatch(format!(
                "`{name}` is a {}, not a function", other.type_name()
            )))),
            None => Err(RunError::new(line, ErrorKind::UndefinedFunction { name: name.to_string() })),
        }
    }

    fn eval_call(&mut self, name: &str, args: &[Expr], line: usize) -> Result<Value, RunError> {
        let callee = self.resolve_callee(name, line)?;

        // the callee and earlier arguments must survive calls made by later ones
        let mark = self.env.held_mark();
        if let Callee::Closure(c) = &callee {
            self.env.hold(&Value::Closure(Rc::clone(c)));
        }
        let arg_vals = self.eval_args(args);
        self.env.release_held(mark);
        let arg_vals = arg_vals?;

        match callee {
            Callee::Builtin(b) => self.registry.call(&b, &arg_vals, &mut self.state, line),
            Callee::Closure(c) => self.call_closure(&c, arg_vals, line),
        }
    }

    fn eval_args(&mut self, args: &[Expr]) -> Result<Vec<Value>, RunError> {
        let mut vals = Vec::with_capacity(args.len());
        for arg in args {
            let v = self.eval_expr(arg)?;
            self.env.hold(&v);
            vals.push(v);
        }
        Ok(vals)
    }

    fn call_closure(&mut self, closure: &Closure, args: Vec<Value>, line: usize) -> Result<Value, RunError> {
        let decl = &closure.decl;
        if decl.params.len() != args.len() {
            return Err(RunError::new(line, ErrorKind::ArityMismatch {
                callee: decl.name.clone(),
                expected: Arity::Exact(decl.params.len()),
                got: args.len(),
            }));
        }
        if self.depth >= self.limits.max_call_depth {
            return Err(RunError::new(line, ErrorKind::StackDepthExceeded { limit: self.limits.max_call_depth }));
        }

        self.depth += 1;
        let saved = self.env.push_scope(closure.env);
        let result = self.call_body(closure, args, line);
        self.env.pop_scope(saved);
        self.depth -= 1;
        result
    }

    fn call_body(&mut self, closure: &Closure, args: Vec<Value>, line: usize) -> Result<Value, RunError> {
        for (param, arg) in closure.decl.params.iter().zip(args) {
            self.env.declare(param, arg).map_err(|k| RunError::new(line, k))?;
        }
        match self.exec_stmts(&closure.decl.body.stmts)? {
            Flow::Return(v) => Ok(v),
            _ => Ok(Value::Null),
        }
    }
}
