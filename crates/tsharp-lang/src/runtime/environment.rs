//! Lexical scope chain stored as an arena of scopes linked by parent index.
//!
//! Scopes are pushed and popped in stack order. A popped scope goes straight
//! back to the free list unless a closure was created in it or in one of its
//! descendants. Those captured scopes stay until `collect` finds that no
//! live scope, suspended frame or held value can reach them any more.

use std::collections::HashMap;

use crate::error::ErrorKind;
use crate::runtime::value::Value;

/// Live scope count below which `maybe_collect` never runs.
const MIN_COLLECTION: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);
}

#[derive(Debug)]
struct Binding {
    value: Value,
    read_only: bool,
}

#[derive(Debug, Default)]
struct Scope {
    bindings: HashMap<String, Binding>,
    parent: Option<ScopeId>,
    /// A closure's chain runs through this scope.
    captured: bool,
}

#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    free: Vec<usize>,
    current: ScopeId,
    /// Scopes suspended by `push_scope`, innermost last.
    frames: Vec<ScopeId>,
    /// Scopes of closures the interpreter holds outside any binding.
    held: Vec<ScopeId>,
    next_collection: usize,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            free: Vec::new(),
            current: ScopeId::ROOT,
            frames: Vec::new(),
            held: Vec::new(),
            next_collection: MIN_COLLECTION,
        }
    }

    pub fn current(&self) -> ScopeId { self.current }

    pub fn live_scopes(&self) -> usize { self.scopes.len() - self.free.len() }

    /// Bind a read-only name in the root scope.
    pub fn define_constant(&mut self, name: &str, value: Value) {
        self.scopes[0].bindings.insert(name.to_string(), Binding { value, read_only: true });
    }

    /// Enter a fresh scope whose parent is `parent`. Returns the scope that
    /// was current, to be handed back to `pop_scope`.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        let scope = Scope { parent: Some(parent), ..Scope::default() };
        let id = match self.free.pop() {
            Some(i) => { self.scopes[i] = scope; i }
            None => { self.scopes.push(scope); self.scopes.len() - 1 }
        };
        let prev = self.current;
        self.frames.push(prev);
        self.current = ScopeId(id);
        prev
    }

    pub fn pop_scope(&mut self, restore: ScopeId) {
        let leaving = self.current;
        self.frames.pop();
        self.current = restore;
        if !self.scopes[leaving.0].captured {
            self.release(leaving.0);
        }
    }

    /// The current scope, marked so that it and its ancestors outlive their frames.
    pub fn capture(&mut self) -> ScopeId {
        let mut id = Some(self.current);
        while let Some(ScopeId(i)) = id {
            let scope = &mut self.scopes[i];
            if scope.captured { break; }
            scope.captured = true;
            id = scope.parent;
        }
        self.current
    }

    // ─── Reclamation ──────────────────────────────────────────────────────────

    /// Keep `value`'s captured scope alive until `release_held(mark)`.
    /// Returns the mark to release back to.
    pub fn hold(&mut self, value: &Value) -> usize {
        let mark = self.held.len();
        if let Value::Closure(c) = value {
            self.held.push(c.env);
        }
        mark
    }

    pub fn held_mark(&self) -> usize { self.held.len() }

    pub fn release_held(&mut self, mark: usize) {
        self.held.truncate(mark);
    }

    /// Run `collect` once enough scopes have piled up since the last one.
    /// Only call this where every closure the caller holds is either bound
    /// or held.
    pub fn maybe_collect(&mut self) {
        if self.live_scopes() >= self.next_collection {
            self.collect();
        }
    }

    /// Free every scope no root can reach. Roots are the root scope, the
    /// current and suspended scopes, and held closures; a reachable scope
    /// keeps its parent and the scopes of closures bound in it.
    pub fn collect(&mut self) {
        let mut marked = vec![false; self.scopes.len()];
        let mut pending: Vec<ScopeId> = Vec::with_capacity(self.frames.len() + self.held.len() + 2);
        pending.push(ScopeId::ROOT);
        pending.push(self.current);
        pending.extend(&self.frames);
        pending.extend(&self.held);

        while let Some(ScopeId(i)) = pending.pop() {
            if marked[i] { continue; }
            marked[i] = true;
            let scope = &self.scopes[i];
            pending.extend(scope.parent);
            pending.extend(scope.bindings.values().filter_map(|b| match &b.value {
                Value::Closure(c) => Some(c.env),
                _ => None,
            }));
        }

        let before = self.live_scopes();
        let is_free: Vec<bool> = {
            let mut v = vec![false; self.scopes.len()];
            for &i in &self.free { v[i] = true; }
            v
        };
        for (i, &reachable) in marked.iter().enumerate() {
            if !reachable && !is_free[i] {
                self.release(i);
            }
        }
        let live = self.live_scopes();
        self.next_collection = (live * 2).max(MIN_COLLECTION);
        log::debug!("scope collection: {before} -> {live} live scopes");
    }

    fn release(&mut self, i: usize) {
        self.scopes[i] = Scope::default();
        self.free.push(i);
    }

    // ─── Bindings ─────────────────────────────────────────────────────────────

    /// Bind in the current scope, overwriting a same-scope binding.
    pub fn declare(&mut self, name: &str, value: Value) -> Result<(), ErrorKind> {
        let scope = &mut self.scopes[self.current.0];
        if scope.bindings.get(name).is_some_and(|b| b.read_only) {
            return Err(ErrorKind::ReadOnlyVariable { name: name.to_string() });
        }
        scope.bindings.insert(name.to_string(), Binding { value, read_only: false });
        Ok(())
    }

    /// Mutate the nearest binding of `name`. Never creates one.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), ErrorKind> {
        let mut id = Some(self.current);
        while let Some(ScopeId(i)) = id {
            let scope = &mut self.scopes[i];
            if let Some(binding) = scope.bindings.get_mut(name) {
                if binding.read_only {
                    return Err(ErrorKind::ReadOnlyVariable { name: name.to_string() });
                }
                binding.value = value;
                return Ok(());
            }
            id = scope.parent;
        }
        Err(ErrorKind::UndefinedVariable { name: name.to_string() })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let mut id = Some(self.current);
        while let Some(ScopeId(i)) = id {
            let scope = &self.scopes[i];
            if let Some(binding) = scope.bindings.get(name) {
                return Some(&binding.value);
            }
            id = scope.parent;
        }
        None
    }

    pub fn lookup(&self, name: &str) -> Result<Value, ErrorKind> {
        self.get(name)
            .cloned()
            .ok_or_else(|| ErrorKind::UndefinedVariable { name: name.to_string() })
    }
}

impl Default for Environment {
    fn default() -> Self { Self::new() }
}
