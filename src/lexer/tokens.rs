use lazy_static::lazy_static;
use std::{
    collections::{HashMap, TryReserveError},
    fmt::Display,
    ops::Index,
    slice::Iter,
};

use crate::{
    util::bytes::{escape, lossy, FixedBuf},
    Span,
};

lazy_static! {
    /// Keywords bucketed by spelling length, each bucket scanned linearly.
    pub static ref RESERVED_LOOKUP: HashMap<usize, Vec<(&'static [u8], TokenKind)>> = {
        let keywords: [(&'static [u8], TokenKind); 14] = [
            (b"let", TokenKind::Let),
            (b"if", TokenKind::If),
            (b"else", TokenKind::Else),
            (b"true", TokenKind::True),
            (b"false", TokenKind::False),
            (b"not", TokenKind::Not),
            (b"or", TokenKind::Or),
            (b"and", TokenKind::And),
            (b"match", TokenKind::Match),
            (b"while", TokenKind::While),
            (b"for", TokenKind::For),
            (b"break", TokenKind::Break),
            (b"continue", TokenKind::Continue),
            (b"return", TokenKind::Return),
        ];

        let mut map: HashMap<usize, Vec<(&'static [u8], TokenKind)>> = HashMap::new();
        for (spelling, kind) in keywords {
            map.entry(spelling.len()).or_default().push((spelling, kind));
        }
        map
    };
}

/// Looks `name` up in the keyword table.
pub fn lookup_keyword(name: &[u8]) -> Option<TokenKind> {
    RESERVED_LOOKUP.get(&name.len()).and_then(|bucket| {
        bucket
            .iter()
            .find(|(spelling, _)| *spelling == name)
            .map(|(_, kind)| kind.clone())
    })
}

/// Payload-free token kind, used for lookahead.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenTag {
    // Reserved
    Let,
    If,
    Else,
    True,
    False,
    Not,
    Or,
    And,
    Match,
    While,
    For,
    Break,
    Continue,
    Return,

    Assign,   // =
    Plus,     // +
    Minus,    // -
    Asterisk, // *
    Slash,    // /
    Percent,  // %
    Exponent, // ^

    Equ, // ==
    Neq, // !=
    GreaterThan,
    Gte,
    LessThan,
    Lte,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Semicolon,

    Name,
    NumericLiteral,
    StringLiteral,
    EOF,
}

impl TokenTag {
    /// Stable spelling used in diagnostics and debug dumps.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenTag::Let => "let",
            TokenTag::If => "if",
            TokenTag::Else => "else",
            TokenTag::True => "true",
            TokenTag::False => "false",
            TokenTag::Not => "not",
            TokenTag::Or => "or",
            TokenTag::And => "and",
            TokenTag::Match => "match",
            TokenTag::While => "while",
            TokenTag::For => "for",
            TokenTag::Break => "break",
            TokenTag::Continue => "continue",
            TokenTag::Return => "return",
            TokenTag::Assign => "=",
            TokenTag::Plus => "+",
            TokenTag::Minus => "-",
            TokenTag::Asterisk => "*",
            TokenTag::Slash => "/",
            TokenTag::Percent => "%",
            TokenTag::Exponent => "^",
            TokenTag::Equ => "==",
            TokenTag::Neq => "!=",
            TokenTag::GreaterThan => ">",
            TokenTag::Gte => ">=",
            TokenTag::LessThan => "<",
            TokenTag::Lte => "<=",
            TokenTag::LeftParen => "(",
            TokenTag::RightParen => ")",
            TokenTag::LeftBracket => "[",
            TokenTag::RightBracket => "]",
            TokenTag::LeftBrace => "{",
            TokenTag::RightBrace => "}",
            TokenTag::Semicolon => ";",
            TokenTag::Name => "Name",
            TokenTag::NumericLiteral => "NumericLiteral",
            TokenTag::StringLiteral => "StringLiteral",
            TokenTag::EOF => "EOF",
        }
    }
}

impl Display for TokenTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Token kind together with its payload.
///
/// Only `Name`, `NumericLiteral` and `StringLiteral` carry data.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum TokenKind {
    Let,
    If,
    Else,
    True,
    False,
    Not,
    Or,
    And,
    Match,
    While,
    For,
    Break,
    Continue,
    Return,

    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Exponent,

    Equ,
    Neq,
    GreaterThan,
    Gte,
    LessThan,
    Lte,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Semicolon,

    Name(FixedBuf),
    NumericLiteral(u64),
    StringLiteral(FixedBuf),
    EOF,
}

impl TokenKind {
    pub fn tag(&self) -> TokenTag {
        match self {
            TokenKind::Let => TokenTag::Let,
            TokenKind::If => TokenTag::If,
            TokenKind::Else => TokenTag::Else,
            TokenKind::True => TokenTag::True,
            TokenKind::False => TokenTag::False,
            TokenKind::Not => TokenTag::Not,
            TokenKind::Or => TokenTag::Or,
            TokenKind::And => TokenTag::And,
            TokenKind::Match => TokenTag::Match,
            TokenKind::While => TokenTag::While,
            TokenKind::For => TokenTag::For,
            TokenKind::Break => TokenTag::Break,
            TokenKind::Continue => TokenTag::Continue,
            TokenKind::Return => TokenTag::Return,
            TokenKind::Assign => TokenTag::Assign,
            TokenKind::Plus => TokenTag::Plus,
            TokenKind::Minus => TokenTag::Minus,
            TokenKind::Asterisk => TokenTag::Asterisk,
            TokenKind::Slash => TokenTag::Slash,
            TokenKind::Percent => TokenTag::Percent,
            TokenKind::Exponent => TokenTag::Exponent,
            TokenKind::Equ => TokenTag::Equ,
            TokenKind::Neq => TokenTag::Neq,
            TokenKind::GreaterThan => TokenTag::GreaterThan,
            TokenKind::Gte => TokenTag::Gte,
            TokenKind::LessThan => TokenTag::LessThan,
            TokenKind::Lte => TokenTag::Lte,
            TokenKind::LeftParen => TokenTag::LeftParen,
            TokenKind::RightParen => TokenTag::RightParen,
            TokenKind::LeftBracket => TokenTag::LeftBracket,
            TokenKind::RightBracket => TokenTag::RightBracket,
            TokenKind::LeftBrace => TokenTag::LeftBrace,
            TokenKind::RightBrace => TokenTag::RightBrace,
            TokenKind::Semicolon => TokenTag::Semicolon,
            TokenKind::Name(_) => TokenTag::Name,
            TokenKind::NumericLiteral(_) => TokenTag::NumericLiteral,
            TokenKind::StringLiteral(_) => TokenTag::StringLiteral,
            TokenKind::EOF => TokenTag::EOF,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn tag(&self) -> TokenTag {
        self.kind.tag()
    }

    pub fn row(&self) -> usize {
        self.span.row
    }

    pub fn column(&self) -> usize {
        self.span.col
    }

    pub fn length(&self) -> usize {
        self.span.len
    }

    /// Name bytes, if this is a `Name` token.
    pub fn name(&self) -> Option<&[u8]> {
        match &self.kind {
            TokenKind::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Literal bytes, if this is a `StringLiteral` token.
    pub fn string(&self) -> Option<&[u8]> {
        match &self.kind {
            TokenKind::StringLiteral(string) => Some(string),
            _ => None,
        }
    }

    /// Literal value, if this is a `NumericLiteral` token.
    pub fn number(&self) -> Option<u64> {
        match self.kind {
            TokenKind::NumericLiteral(value) => Some(value),
            _ => None,
        }
    }

    fn is_one_of_many(&self, tags: &[TokenTag]) -> bool {
        tags.contains(&self.tag())
    }

    /// Logs the token at trace level.
    pub fn debug(&self) {
        if self.is_one_of_many(&[TokenTag::Name, TokenTag::NumericLiteral, TokenTag::StringLiteral]) {
            tracing::trace!(row = self.span.row, col = self.span.col, len = self.span.len, "{}", self);
        } else {
            tracing::trace!(row = self.span.row, col = self.span.col, len = self.span.len, tag = %self.tag());
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::Name(name) => write!(f, "<{} \"{}\">", self.tag(), lossy(name)),
            TokenKind::NumericLiteral(value) => write!(f, "<{} {}>", self.tag(), value),
            TokenKind::StringLiteral(string) => write!(f, "<{} \"{}\">", self.tag(), escape(string)),
            TokenKind::EOF => write!(f, "<Keyword {}>", self.tag()),
            _ => write!(f, "<Keyword '{}'>", self.tag()),
        }
    }
}

/// Ordered, append-only token list. Insertion order is source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenSeq {
    tokens: Vec<Token>,
}

impl TokenSeq {
    pub fn new() -> Self {
        TokenSeq { tokens: vec![] }
    }

    /// Appends a token, reporting allocation failure instead of aborting.
    pub fn push(&mut self, token: Token) -> Result<(), TryReserveError> {
        self.tokens.try_reserve(1)?;
        self.tokens.push(token);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Releases spare capacity once scanning is done.
    pub fn compact(&mut self) {
        self.tokens.shrink_to_fit();
    }

    /// Bracketed debug form: `<TokSeq(N): [<...>, <...>]>`.
    ///
    /// `None` keeps everything on one line; `Some(n)` puts every token on its
    /// own line, indented by `n` spaces.
    pub fn dump(&self, indent: Option<usize>) -> String {
        let mut out = format!("<TokSeq({}): [", self.tokens.len());

        if !self.tokens.is_empty() {
            let separator = match indent {
                Some(width) => format!(",\n{}", " ".repeat(width)),
                None => String::from(", "),
            };

            if let Some(width) = indent {
                out.push('\n');
                out.push_str(&" ".repeat(width));
            }

            let rendered = self.tokens.iter().map(|token| token.to_string()).collect::<Vec<_>>();
            out.push_str(&rendered.join(&separator));

            if indent.is_some() {
                out.push('\n');
            }
        }

        out.push_str("]>");
        out
    }
}

impl Index<usize> for TokenSeq {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenSeq {
    type Item = &'a Token;
    type IntoIter = Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
