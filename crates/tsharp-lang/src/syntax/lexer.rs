//! Source text → flat token stream. Never fails: anything it cannot read
//! becomes a `TokenKind::Invalid` token for the parser to reject.

use crate::syntax::token::{Token, TokenKind, keyword_or_ident};

pub struct Lexer<'a> {
    text: &'a str,
    source: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { text: source, source: source.as_bytes(), pos: 0, line: 1, column: 1 }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.line, self.column));
                break;
            }

            tokens.push(self.next_token());
        }

        tokens
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let line = self.line;
        let col = self.column;
        let ch = self.advance();

        let kind = match ch {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'.' => TokenKind::Dot,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,

            b'=' => {
                if self.peek() == b'=' { self.advance(); TokenKind::EqEq }
                else { TokenKind::Eq }
            }
            b'!' => {
                if self.peek() == b'=' { self.advance(); TokenKind::BangEq }
                else { TokenKind::Bang }
            }
            b'<' => {
                if self.peek() == b'=' { self.advance(); TokenKind::LtEq }
                else { TokenKind::Lt }
            }
            b'>' => {
                if self.peek() == b'=' { self.advance(); TokenKind::GtEq }
                else { TokenKind::Gt }
            }
            b'&' => {
                if self.peek() == b'&' { self.advance(); TokenKind::AndAnd }
                else { TokenKind::Invalid("unexpected character `&`".into()) }
            }
            b'|' => {
                if self.peek() == b'|' { self.advance(); TokenKind::OrOr }
                else { TokenKind::Invalid("unexpected character `|`".into()) }
            }

            b'"' | b'\'' => self.read_string(ch),
            b'0'..=b'9' => self.read_number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.read_ident_tail();
                keyword_or_ident(self.text[start..self.pos].to_string())
            }

            _ => {
                // Consume the whole UTF-8 sequence so the lexeme stays a valid &str.
                while !self.is_at_end() && (self.peek() & 0xC0) == 0x80 {
                    self.advance();
                }
                TokenKind::Invalid(format!("unexpected character `{}`", &self.text[start..self.pos]))
            }
        };

        Token::new(kind, &self.text[start..self.pos], line, col)
    }

    // ─── Primitives ──────────────────────────────────────────────────────────

    fn advance(&mut self) -> u8 {
        let ch = self.source[self.pos];
        self.pos += 1;
        if ch == b'\n' { self.line += 1; self.column = 1; }
        else { self.column += 1; }
        ch
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() { 0 } else { self.source[self.pos] }
    }

    fn peek_next(&self) -> u8 {
        if self.pos + 1 >= self.source.len() { 0 } else { self.source[self.pos + 1] }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Whitespace, `// line` and `/* block */` comments.
    fn skip_trivia(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => { self.advance(); }
                b'/' if self.peek_next() == b'/' => self.skip_line(),
                b'/' if self.peek_next() == b'*' => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    fn skip_line(&mut self) {
        while !self.is_at_end() && self.peek() != b'\n' { self.advance(); }
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // /
        self.advance(); // *
        while !self.is_at_end() {
            if self.peek() == b'*' && self.peek_next() == b'/' {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
    }

    // ─── Readers ─────────────────────────────────────────────────────────────

    /// Reads up to the matching quote. No escape processing: a backslash is
    /// an ordinary character. Strings may not span lines.
    fn read_string(&mut self, quote: u8) -> TokenKind {
        let body_start = self.pos;
        loop {
            if self.is_at_end() || self.peek() == b'\n' {
                return TokenKind::Invalid("unterminated string literal".into());
            }
            if self.advance() == quote { break; }
        }
        TokenKind::StringLit(self.text[body_start..self.pos - 1].to_string())
    }

    fn read_number(&mut self, start: usize) -> TokenKind {
        while self.peek().is_ascii_digit() { self.advance(); }

        // consume a fractional part only if a digit follows the dot
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() { self.advance(); }
        }

        if matches!(self.peek(), b'e' | b'E') && self.exponent_follows() {
            self.advance();
            if matches!(self.peek(), b'+' | b'-') { self.advance(); }
            while self.peek().is_ascii_digit() { self.advance(); }
            return TokenKind::Invalid(format!(
                "scientific notation `{}` is not supported", &self.text[start..self.pos]
            ));
        }

        match self.text[start..self.pos].parse() {
            Ok(n) => TokenKind::Number(n),
            Err(_) => TokenKind::Invalid(format!("malformed number `{}`", &self.text[start..self.pos])),
        }
    }

    /// True when the `e`/`E` at `pos` starts an exponent (`e5`, `e-3`, `E+2`).
    fn exponent_follows(&self) -> bool {
        let next = self.peek_next();
        if next.is_ascii_digit() { return true; }
        matches!(next, b'+' | b'-')
            && self.source.get(self.pos + 2).is_some_and(|b| b.is_ascii_digit())
    }

    fn read_ident_tail(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
