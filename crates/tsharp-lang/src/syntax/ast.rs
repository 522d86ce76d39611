use std::rc::Rc;

/// Source location attached to every node for error reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

// ─── Top level ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

// ─── Functions ───────────────────────────────────────────────────────────────

/// `func name(a, b) { ... }`. Shared behind an `Rc` so closures created at
/// runtime can point at the declaration without copying its body.
#[derive(Debug)]
pub struct FnDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub span: Span,
}

// ─── Statements ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// `var x = 3;` or `var x;`
    VarDecl(VarDecl),
    /// A standalone expression used as a statement (e.g. a call or assignment).
    Expr(Expr),
    /// `{ ... }`
    Block(Block),
    /// `if (c) { } else { }`
    If(IfStmt),
    /// `while (c) { }`
    While(WhileStmt),
    /// `for (var i = 0; i < 10; i = i + 1) { }`
    For(ForStmt),
    /// `func f(a) { }`
    FnDecl(Rc<FnDecl>),
    /// `return expr;` or bare `return;`
    Return(Option<Expr>, Span),
    Break(Span),
    Continue(Span),
}

impl Stmt {
    pub fn line(&self) -> usize {
        match self {
            Stmt::VarDecl(v)   => v.span.line,
            Stmt::Expr(e)      => e.span().line,
            Stmt::Block(b)     => b.span.line,
            Stmt::If(i)        => i.span.line,
            Stmt::While(w)     => w.span.line,
            Stmt::For(f)       => f.span.line,
            Stmt::FnDecl(f)    => f.span.line,
            Stmt::Return(_, s) => s.line,
            Stmt::Break(s)     => s.line,
            Stmt::Continue(s)  => s.line,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Block,
    pub else_block: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
    pub span: Span,
}

/// Kept as its own node rather than lowered to `While` so `init` stays
/// scoped to the loop.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Block,
    pub span: Span,
}

// ─── Expressions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Expr {
    Number(f64, Span),
    Bool(bool, Span),
    StringLit(String, Span),
    Ident(String, Span),

    /// `a + b`, `a == b`, etc.
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
        span: Span,
    },

    /// `a && b`, `a || b` — evaluated lazily.
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
        span: Span,
    },

    /// `!x`, `-x`
    UnOp {
        op: UnOp,
        operand: Box<Expr>,
        span: Span,
    },

    /// `name(args)`
    Call {
        callee: String,
        args: Vec<Expr>,
        span: Span,
    },

    /// `name = value`
    Assign {
        target: String,
        value: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Number(_, s)       => s,
            Expr::Bool(_, s)         => s,
            Expr::StringLit(_, s)    => s,
            Expr::Ident(_, s)        => s,
            Expr::BinOp { span, .. }   => span,
            Expr::Logical { span, .. } => span,
            Expr::UnOp { span, .. }    => span,
            Expr::Call { span, .. }    => span,
            Expr::Assign { span, .. }  => span,
        }
    }
}

// ─── Operators ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add, Sub, Mul, Div, Mod,
    Eq, NotEq,
    Lt, LtEq, Gt, GtEq,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add   => "+",  BinOp::Sub   => "-",
            BinOp::Mul   => "*",  BinOp::Div   => "/",  BinOp::Mod => "%",
            BinOp::Eq    => "==", BinOp::NotEq => "!=",
            BinOp::Lt    => "<",  BinOp::LtEq  => "<=",
            BinOp::Gt    => ">",  BinOp::GtEq  => ">=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}
