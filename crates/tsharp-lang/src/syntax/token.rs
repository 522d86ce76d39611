#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    Bool(bool),
    Ident(String),
    StringLit(String),

    // Keywords
    Var,
    Func,
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,

    // Operators
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    Eq,         // =
    EqEq,       // ==
    BangEq,     // !=
    Bang,       // !
    Lt,         // <
    LtEq,       // <=
    Gt,         // >
    GtEq,       // >=
    AndAnd,     // &&
    OrOr,       // ||

    // Punctuation
    Comma,      // ,
    Semicolon,  // ;
    Dot,        // .
    LParen,     // (
    RParen,     // )
    LBrace,     // {
    RBrace,     // }

    /// Anything the lexer could not turn into a real token. The payload
    /// describes it; the parser reports it as a syntax error.
    Invalid(String),

    Eof,
}

impl TokenKind {
    /// Short human-readable form used in syntax error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n)    => format!("number `{n}`"),
            Self::Bool(b)      => format!("`{b}`"),
            Self::Ident(s)     => format!("identifier `{s}`"),
            Self::StringLit(s) => format!("string \"{s}\""),
            Self::Invalid(d)   => d.clone(),
            Self::Eof          => "end of input".to_string(),
            other              => format!("`{}`", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Var       => "var",
            Self::Func      => "func",
            Self::If        => "if",
            Self::Else      => "else",
            Self::While     => "while",
            Self::For       => "for",
            Self::Return    => "return",
            Self::Break     => "break",
            Self::Continue  => "continue",
            Self::Plus      => "+",
            Self::Minus     => "-",
            Self::Star      => "*",
            Self::Slash     => "/",
            Self::Percent   => "%",
            Self::Eq        => "=",
            Self::EqEq      => "==",
            Self::BangEq    => "!=",
            Self::Bang      => "!",
            Self::Lt        => "<",
            Self::LtEq      => "<=",
            Self::Gt        => ">",
            Self::GtEq      => ">=",
            Self::AndAnd    => "&&",
            Self::OrOr      => "||",
            Self::Comma     => ",",
            Self::Semicolon => ";",
            Self::Dot       => ".",
            Self::LParen    => "(",
            Self::RParen    => ")",
            Self::LBrace    => "{",
            Self::RBrace    => "}",
            Self::Number(_) | Self::Bool(_) | Self::Ident(_) | Self::StringLit(_)
            | Self::Invalid(_) | Self::Eof => "",
        }
    }
}

/// Maps an identifier string to its keyword token, or returns `Ident`.
pub fn keyword_or_ident(s: String) -> TokenKind {
    match s.as_str() {
        "var"      => TokenKind::Var,
        "func"     => TokenKind::Func,
        "if"       => TokenKind::If,
        "else"     => TokenKind::Else,
        "while"    => TokenKind::While,
        "for"      => TokenKind::For,
        "return"   => TokenKind::Return,
        "break"    => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "true"     => TokenKind::Bool(true),
        "false"    => TokenKind::Bool(false),
        _          => TokenKind::Ident(s),
    }
}

// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text the token was read from.
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self { kind, lexeme: lexeme.into(), line, column }
    }
}
