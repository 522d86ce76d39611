//! Recursive-descent parser with precedence climbing. Stops at the first
//! structural mismatch and reports it as a `SyntaxError`.

use std::rc::Rc;

use crate::error::{ErrorKind, RunError};
use crate::syntax::ast::*;
use crate::syntax::token::{Token, TokenKind};

/// Deepest allowed nesting of statements and sub-expressions.
pub const MAX_NESTING: usize = 256;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Nesting of function bodies around the current position.
    fn_depth: usize,
    /// Nesting of loops inside the innermost function body.
    loop_depth: usize,
    /// Statements and expressions currently open around the position.
    nesting: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0, fn_depth: 0, loop_depth: 0, nesting: 0 }
    }

    pub fn parse(mut self) -> Result<Program, RunError> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_stmt()?);
        }
        Ok(Program { statements })
    }

    // ─── Statements ──────────────────────────────────────────────────────────

    fn parse_stmt(&mut self) -> Result<Stmt, RunError> {
        self.nested(Self::parse_stmt_kind)
    }

    fn parse_stmt_kind(&mut self) -> Result<Stmt, RunError> {
        match self.peek_kind() {
            TokenKind::Var      => self.parse_var_decl(),
            TokenKind::Func     => self.parse_fn_decl(),
            TokenKind::If       => self.parse_if(),
            TokenKind::While    => self.parse_while(),
            TokenKind::For      => self.parse_for(),
            TokenKind::Return   => self.parse_return(),
            TokenKind::Break    => self.parse_loop_jump(true),
            TokenKind::Continue => self.parse_loop_jump(false),
            TokenKind::LBrace   => Ok(Stmt::Block(self.parse_block()?)),
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_block(&mut self) -> Result<Block, RunError> {
        let span = self.span();
        self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Block { stmts, span })
    }

    fn parse_var_decl(&mut self) -> Result<Stmt, RunError> {
        let span = self.span();
        self.expect(TokenKind::Var)?;
        let name = self.expect_ident()?;
        let initializer = if self.matches(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::VarDecl(VarDecl { name, initializer, span }))
    }

    fn parse_fn_decl(&mut self) -> Result<Stmt, RunError> {
        let span = self.span();
        self.expect(TokenKind::Func)?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.expect_ident()?);
                if !self.matches(&TokenKind::Comma) { break; }
            }
        }
        self.expect(TokenKind::RParen)?;

        // loops outside the function do not make `break` legal inside it
        let saved_loops = std::mem::take(&mut self.loop_depth);
        self.fn_depth += 1;
        let body = self.parse_block();
        self.fn_depth -= 1;
        self.loop_depth = saved_loops;

        Ok(Stmt::FnDecl(Rc::new(FnDecl { name, params, body: body?, span })))
    }

    fn parse_if(&mut self) -> Result<Stmt, RunError> {
        let span = self.span();
        self.expect(TokenKind::If)?;
        let condition = self.parse_paren_condition()?;
        let then_block = self.parse_block()?;
        let else_block = if self.matches(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                // `else if` — the nested if becomes the whole else-block
                let inner_span = self.span();
                let nested = self.nested(Self::parse_if)?;
                Some(Block { stmts: vec![nested], span: inner_span })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };
        Ok(Stmt::If(IfStmt { condition, then_block, else_block, span }))
    }

    fn parse_while(&mut self) -> Result<Stmt, RunError> {
        let span = self.span();
        self.expect(TokenKind::While)?;
        let condition = self.parse_paren_condition()?;
        let body = self.parse_loop_body()?;
        Ok(Stmt::While(WhileStmt { condition, body, span }))
    }

    fn parse_for(&mut self) -> Result<Stmt, RunError> {
        let span = self.span();
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        let init = match self.peek_kind() {
            TokenKind::Semicolon => { self.advance(); None }
            TokenKind::Var => Some(Box::new(self.parse_var_decl()?)),
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                Some(Box::new(Stmt::Expr(expr)))
            }
        };

        let condition = if self.check(&TokenKind::Semicolon) { None } else { Some(self.parse_expr()?) };
        self.expect(TokenKind::Semicolon)?;

        let update = if self.check(&TokenKind::RParen) { None } else { Some(self.parse_expr()?) };
        self.expect(TokenKind::RParen)?;

        let body = self.parse_loop_body()?;
        Ok(Stmt::For(ForStmt { init, condition, update, body, span }))
    }

    fn parse_loop_body(&mut self) -> Result<Block, RunError> {
        self.loop_depth += 1;
        let body = self.parse_block();
        self.loop_depth -= 1;
        body
    }

    fn parse_return(&mut self) -> Result<Stmt, RunError> {
        let span = self.span();
        if self.fn_depth == 0 {
            return Err(self.error_here("statement (`return` is only valid inside a function)"));
        }
        self.expect(TokenKind::Return)?;
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Return(value, span))
    }

    fn parse_loop_jump(&mut self, is_break: bool) -> Result<Stmt, RunError> {
        let span = self.span();
        if self.loop_depth == 0 {
            let word = if is_break { "break" } else { "continue" };
            return Err(self.error_here(&format!("statement (`{word}` is only valid inside a loop)")));
        }
        self.advance();
        self.expect(TokenKind::Semicolon)?;
        Ok(if is_break { Stmt::Break(span) } else { Stmt::Continue(span) })
    }

    fn parse_paren_condition(&mut self) -> Result<Expr, RunError> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }

    // ─── Expressions (precedence climbing) ───────────────────────────────────

    fn parse_expr(&mut self) -> Result<Expr, RunError> {
        self.nested(Self::parse_assignment)
    }

    /// Right-associative; only a bare identifier may stand on the left.
    fn parse_assignment(&mut self) -> Result<Expr, RunError> {
        let target_tok = self.peek().clone();
        let left = self.parse_or()?;
        if self.check(&TokenKind::Eq) {
            return match left {
                Expr::Ident(target, span) => {
                    self.advance();
                    let value = self.parse_expr()?;
                    Ok(Expr::Assign { target, value: Box::new(value), span })
                }
                _ => Err(RunError::new(
                    target_tok.line,
                    ErrorKind::syntax("identifier on the left of `=`", "an expression"),
                )),
            };
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, RunError> {
        let mut left = self.parse_and()?;
        while self.check(&TokenKind::OrOr) {
            let span = *left.span();
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Logical { left: Box::new(left), op: LogicalOp::Or, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, RunError> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::AndAnd) {
            let span = *left.span();
            self.advance();
            let right = self.parse_equality()?;
            left = Expr::Logical { left: Box::new(left), op: LogicalOp::And, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, RunError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq   => BinOp::Eq,
                TokenKind::BangEq => BinOp::NotEq,
                _ => break,
            };
            let span = *left.span();
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::BinOp { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, RunError> {
        let mut left = self.parse_addition()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt   => BinOp::Lt,
                TokenKind::LtEq => BinOp::LtEq,
                TokenKind::Gt   => BinOp::Gt,
                TokenKind::GtEq => BinOp::GtEq,
                _ => break,
            };
            let span = *left.span();
            self.advance();
            let right = self.parse_addition()?;
            left = Expr::BinOp { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_addition(&mut self) -> Result<Expr, RunError> {
        let mut left = self.parse_multiplication()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus  => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let span = *left.span();
            self.advance();
            let right = self.parse_multiplication()?;
            left = Expr::BinOp { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_multiplication(&mut self) -> Result<Expr, RunError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star    => BinOp::Mul,
                TokenKind::Slash   => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            let span = *left.span();
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::BinOp { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, RunError> {
        let span = self.span();
        if self.matches(&TokenKind::Minus) {
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::UnOp { op: UnOp::Neg, operand: Box::new(operand), span });
        }
        if self.matches(&TokenKind::Bang) {
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::UnOp { op: UnOp::Not, operand: Box::new(operand), span });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, RunError> {
        let tok = self.peek().clone();
        let span = Span::new(tok.line, tok.column);

        match tok.kind {
            TokenKind::Number(v)    => { self.advance(); Ok(Expr::Number(v, span)) }
            TokenKind::Bool(v)      => { self.advance(); Ok(Expr::Bool(v, span)) }
            TokenKind::StringLit(s) => { self.advance(); Ok(Expr::StringLit(s, span)) }

            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }

            TokenKind::Ident(name) => {
                self.advance();
                if self.matches(&TokenKind::LParen) {
                    let args = self.parse_arg_list()?;
                    self.expect(TokenKind::RParen)?;
                    Ok(Expr::Call { callee: name, args, span })
                } else {
                    Ok(Expr::Ident(name, span))
                }
            }

            _ => Err(self.error_here("expression")),
        }
    }

    fn parse_arg_list(&mut self) -> Result<Vec<Expr>, RunError> {
        let mut args = Vec::new();
        if self.check(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if !self.matches(&TokenKind::Comma) { break; }
        }
        Ok(args)
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: fn(&mut Self) -> Result<T, RunError>) -> Result<T, RunError> {
        if self.nesting >= MAX_NESTING {
            return Err(self.error_here(&format!("at most {MAX_NESTING} levels of nesting")));
        }
        self.nesting += 1;
        let result = crate::with_stack(|| parse(self));
        self.nesting -= 1;
        result
    }

    // ─── Token primitives ────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind.clone()
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() { self.pos += 1; }
        tok
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) { self.advance(); true } else { false }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, RunError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(&kind.describe()))
        }
    }

    fn expect_ident(&mut self) -> Result<String, RunError> {
        match self.peek_kind() {
            TokenKind::Ident(s) => { self.advance(); Ok(s) }
            _ => Err(self.error_here("identifier")),
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn span(&self) -> Span {
        let tok = self.peek();
        Span::new(tok.line, tok.column)
    }

    fn error_here(&self, expected: &str) -> RunError {
        let tok = self.peek();
        RunError::new(tok.line, ErrorKind::syntax(expected, tok.kind.describe()))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::lexer::Lexer;

    fn parse(src: &str) -> Program {
        Parser::new(Lexer::new(src).tokenize()).parse().expect("parse failed")
    }

    fn parse_expr_src(src: &str) -> Expr {
        let mut p = Parser::new(Lexer::new(src).tokenize());
        p.parse_expr().expect("parse_expr failed")
    }

    fn parse_err(src: &str) -> RunError {
        Parser::new(Lexer::new(src).tokenize()).parse().expect_err("expected parse error")
    }

    fn syntax_parts(e: &RunError) -> (&str, &str) {
        match &e.kind {
            ErrorKind::Syntax { expected, found } => (expected.as_str(), found.as_str()),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    // ── declarations ─────────────────────────────────────────────────────────

    #[test]
    fn var_decl_with_init() {
        let p = parse("var x = 3.14;");
        match &p.statements[0] {
            Stmt::VarDecl(v) => {
                assert_eq!(v.name, "x");
                assert!(matches!(v.initializer, Some(Expr::Number(f, _)) if f == 3.14));
            }
            _ => panic!("expected VarDecl"),
        }
    }

    #[test]
    fn var_decl_without_init() {
        let p = parse("var x;");
        assert!(matches!(&p.statements[0], Stmt::VarDecl(v) if v.initializer.is_none()));
    }

    #[test]
    fn fn_decl() {
        let p = parse("func add(a, b) { return a + b; }");
        match &p.statements[0] {
            Stmt::FnDecl(f) => {
                assert_eq!(f.name, "add");
                assert_eq!(f.params, vec!["a", "b"]);
                assert!(matches!(f.body.stmts[0], Stmt::Return(Some(_), _)));
            }
            _ => panic!("expected FnDecl"),
        }
    }

    #[test]
    fn fn_decl_no_params_bare_return() {
        let p = parse("func f() { return; }");
        match &p.statements[0] {
            Stmt::FnDecl(f) => {
                assert!(f.params.is_empty());
                assert!(matches!(f.body.stmts[0], Stmt::Return(None, _)));
            }
            _ => panic!("expected FnDecl"),
        }
    }

    #[test]
    fn nested_fn_decl() {
        let p = parse("func outer() { func inner() { return 1; } return inner; }");
        match &p.statements[0] {
            Stmt::FnDecl(f) => assert!(matches!(f.body.stmts[0], Stmt::FnDecl(_))),
            _ => panic!("expected FnDecl"),
        }
    }

    // ── assignment ────────────────────────────────────────────────────────────

    #[test]
    fn assignment_is_right_associative() {
        let expr = parse_expr_src("a = b = 1");
        match expr {
            Expr::Assign { target, value, .. } => {
                assert_eq!(target, "a");
                assert!(matches!(*value, Expr::Assign { ref target, .. } if target == "b"));
            }
            _ => panic!("expected Assign"),
        }
    }

    #[test]
    fn assignment_to_non_identifier_is_error() {
        let e = parse_err("a + 1 = 2;");
        assert_eq!(syntax_parts(&e).0, "identifier on the left of `=`");
        let e = parse_err("f() = 2;");
        assert_eq!(e.name(), "SyntaxError");
    }

    // ── control flow ──────────────────────────────────────────────────────────

    #[test]
    fn if_else() {
        let p = parse("if (x > 0) { print(1); } else { print(2); }");
        match &p.statements[0] {
            Stmt::If(i) => assert!(i.else_block.is_some()),
            _ => panic!("expected If"),
        }
    }

    #[test]
    fn else_if_chain_nests() {
        let p = parse("if (a) { } else if (b) { } else { }");
        match &p.statements[0] {
            Stmt::If(i) => {
                let else_block = i.else_block.as_ref().unwrap();
                match &else_block.stmts[0] {
                    Stmt::If(inner) => assert!(inner.else_block.is_some()),
                    _ => panic!("expected nested If"),
                }
            }
            _ => panic!("expected If"),
        }
    }

    #[test]
    fn while_loop() {
        let p = parse("while (i < 10) { i = i + 1; }");
        assert!(matches!(&p.statements[0], Stmt::While(_)));
    }

    #[test]
    fn for_loop_full() {
        let p = parse("for (var i = 0; i < 10; i = i + 1) { }");
        match &p.statements[0] {
            Stmt::For(f) => {
                assert!(matches!(f.init.as_deref(), Some(Stmt::VarDecl(_))));
                assert!(f.condition.is_some());
                assert!(matches!(f.update, Some(Expr::Assign { .. })));
            }
            _ => panic!("expected For"),
        }
    }

    #[test]
    fn for_loop_empty_clauses() {
        let p = parse("for (;;) { break; }");
        match &p.statements[0] {
            Stmt::For(f) => {
                assert!(f.init.is_none());
                assert!(f.condition.is_none());
                assert!(f.update.is_none());
            }
            _ => panic!("expected For"),
        }
    }

    #[test]
    fn bare_block_statement() {
        let p = parse("{ var x = 1; }");
        assert!(matches!(&p.statements[0], Stmt::Block(b) if b.stmts.len() == 1));
    }

    #[test]
    fn return_outside_function_is_error() {
        let e = parse_err("return 1;");
        assert!(syntax_parts(&e).0.contains("inside a function"));
    }

    #[test]
    fn break_outside_loop_is_error() {
        parse_err("break;");
        // a loop around the declaration does not cover the function body
        parse_err("while (true) { func f() { break; } }");
    }

    #[test]
    fn continue_inside_loop_in_function() {
        parse("func f() { while (true) { continue; } }");
    }

    // ── expressions ───────────────────────────────────────────────────────────

    #[test]
    fn binary_precedence() {
        let expr = parse_expr_src("2 + 3 * 4");
        match expr {
            Expr::BinOp { op: BinOp::Add, right, .. } => {
                assert!(matches!(*right, Expr::BinOp { op: BinOp::Mul, .. }));
            }
            _ => panic!("expected Add at top level"),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        // 10 - 4 - 3 → (10 - 4) - 3
        let expr = parse_expr_src("10 - 4 - 3");
        match expr {
            Expr::BinOp { op: BinOp::Sub, left, right, .. } => {
                assert!(matches!(*left, Expr::BinOp { op: BinOp::Sub, .. }));
                assert!(matches!(*right, Expr::Number(n, _) if n == 3.0));
            }
            _ => panic!("expected Sub at top level"),
        }
    }

    #[test]
    fn comparison_binds_tighter_than_equality() {
        let expr = parse_expr_src("a < b == c > d");
        match expr {
            Expr::BinOp { op: BinOp::Eq, left, right, .. } => {
                assert!(matches!(*left, Expr::BinOp { op: BinOp::Lt, .. }));
                assert!(matches!(*right, Expr::BinOp { op: BinOp::Gt, .. }));
            }
            _ => panic!("expected Eq at top level"),
        }
    }

    #[test]
    fn logical_ops_below_equality() {
        let expr = parse_expr_src("a == 1 || b == 2 && c");
        match expr {
            Expr::Logical { op: LogicalOp::Or, right, .. } => {
                assert!(matches!(*right, Expr::Logical { op: LogicalOp::And, .. }));
            }
            _ => panic!("expected Or at top level"),
        }
    }

    #[test]
    fn unary_ops() {
        assert!(matches!(parse_expr_src("-x"), Expr::UnOp { op: UnOp::Neg, .. }));
        assert!(matches!(parse_expr_src("!x"), Expr::UnOp { op: UnOp::Not, .. }));
        match parse_expr_src("--x") {
            Expr::UnOp { op: UnOp::Neg, operand, .. } => {
                assert!(matches!(*operand, Expr::UnOp { op: UnOp::Neg, .. }));
            }
            _ => panic!("expected nested Neg"),
        }
    }

    #[test]
    fn grouping_overrides_precedence() {
        let expr = parse_expr_src("(a + b) * c");
        assert!(matches!(expr, Expr::BinOp { op: BinOp::Mul, .. }));
    }

    #[test]
    fn call_with_args() {
        match parse_expr_src("move(h, 1, 2 + 3, z)") {
            Expr::Call { callee, args, .. } => {
                assert_eq!(callee, "move");
                assert_eq!(args.len(), 4);
            }
            _ => panic!("expected Call"),
        }
    }

    #[test]
    fn call_without_args() {
        assert!(matches!(parse_expr_src("f()"), Expr::Call { ref args, .. } if args.is_empty()));
    }

    // ── errors ────────────────────────────────────────────────────────────────

    #[test]
    fn missing_semicolon() {
        let e = parse_err("var x = 1\nvar y = 2;");
        assert_eq!(e.line, 2);
        assert_eq!(syntax_parts(&e), ("`;`", "`var`"));
    }

    #[test]
    fn missing_closing_brace() {
        let e = parse_err("func f() { ");
        assert_eq!(syntax_parts(&e), ("`}`", "end of input"));
    }

    #[test]
    fn unbalanced_paren() {
        let e = parse_err("print((1 + 2);");
        assert_eq!(syntax_parts(&e).0, "`)`");
    }

    #[test]
    fn invalid_token_is_reported_with_line() {
        let e = parse_err("var a = 1;\nvar b = 1e5;");
        assert_eq!(e.line, 2);
        assert!(syntax_parts(&e).1.contains("scientific notation"));
    }

    #[test]
    fn dot_is_rejected() {
        let e = parse_err("a.b;");
        assert_eq!(syntax_parts(&e), ("`;`", "`.`"));
    }

    #[test]
    fn stray_closing_brace() {
        let e = parse_err("}");
        assert_eq!(syntax_parts(&e).0, "expression");
    }

    // ── nesting ──────────────────────────────────────────────────────────────

    #[test]
    fn moderate_nesting_parses() {
        let src = format!("print({}1{});", "(".repeat(200), ")".repeat(200));
        parse(&src);
        let src = format!("var x = {}1;", "-".repeat(200));
        parse(&src);
    }

    #[test]
    fn deep_parentheses_are_rejected() {
        let src = format!("print({}1{});", "(".repeat(20_000), ")".repeat(20_000));
        let e = parse_err(&src);
        assert_eq!(syntax_parts(&e), ("at most 256 levels of nesting", "`(`"));
    }

    #[test]
    fn deep_blocks_are_rejected() {
        let src = format!("{}{}", "{".repeat(5_000), "}".repeat(5_000));
        let e = parse_err(&src);
        assert_eq!(syntax_parts(&e).0, "at most 256 levels of nesting");
    }

    #[test]
    fn long_assignment_chain_is_rejected() {
        let src = format!("var a;{}1;", "a = ".repeat(10_000));
        let e = parse_err(&src);
        assert_eq!(syntax_parts(&e).0, "at most 256 levels of nesting");
    }
}
