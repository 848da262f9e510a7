//! Parser state and cursor primitives.
//!
//! The [`Parser`] borrows the token sequence of the [`LexOut`] it is linked
//! to and keeps a cursor into it. Grammar rules in [`super::expr`] and
//! [`super::stmt`] drive the cursor through `peek`, `check`, `expect`,
//! `expect_any` and `consume`.

use tracing::{debug, warn};

use crate::{
    ast::ast::AstNode,
    errors::errors::{Error, ErrorImpl, Stage},
    lexer::{
        lexer::{LexOut, DEFAULT_SOURCE_NAME},
        tokens::{Token, TokenKind, TokenTag},
    },
    Position, Span, MK_TOKEN,
};

use super::stmt::parse_program;

/// Deepest accepted nesting of groups, unary operands, `^` operands and blocks.
pub const MAX_NESTING_DEPTH: usize = 64;

pub struct Parser<'a> {
    /// The tokens being parsed, always terminated by `EOF` once linked
    tokens: &'a [Token],
    /// Index of the current token
    pos: usize,
    /// Current nesting level
    depth: usize,
    /// Source name quoted in diagnostics
    name: String,
    /// Returned by `peek` past the end of the sequence
    eof: Token,
    /// Error recorded by the last failed `parse`
    error: Option<Error>,
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Parser::new()
    }
}

impl<'a> Parser<'a> {
    /// Creates an unlinked parser. Parsing before [`Parser::link`] sees only `EOF`.
    pub fn new() -> Self {
        Parser {
            tokens: &[],
            pos: 0,
            depth: 0,
            name: String::from(DEFAULT_SOURCE_NAME),
            eof: MK_TOKEN!(TokenKind::EOF, Span::default()),
            error: None,
        }
    }

    /// Binds the parser to a scan result, resetting the cursor and the error state.
    pub fn link(&mut self, lex_out: &'a LexOut) {
        self.tokens = lex_out.tokens().as_slice();
        self.name = lex_out.name().to_string();
        self.eof = match self.tokens.last() {
            Some(last) => MK_TOKEN!(TokenKind::EOF, last.span),
            None => MK_TOKEN!(TokenKind::EOF, Span::default()),
        };
        self.pos = 0;
        self.depth = 0;
        self.error = None;
    }

    /// Unlinks the parser and clears the error.
    pub fn reset(&mut self) {
        *self = Parser::new();
    }

    pub fn source_name(&self) -> &str {
        &self.name
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Returns the current token without advancing.
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Returns true if the current token has the given tag.
    pub fn check(&self, tag: TokenTag) -> bool {
        self.peek().tag() == tag
    }

    /// Advances to the next token and returns the previous one.
    ///
    /// The cursor never moves past the final `EOF`.
    pub fn consume(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() && token.tag() != TokenTag::EOF {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it has the given tag, fails otherwise.
    pub fn expect(&mut self, tag: TokenTag) -> Result<Token, Error> {
        if self.check(tag) {
            Ok(self.consume())
        } else {
            Err(self.unexpected_token())
        }
    }

    /// Consumes the current token if its tag is one of `tags`, fails otherwise.
    pub fn expect_any(&mut self, tags: &[TokenTag]) -> Result<Token, Error> {
        if tags.contains(&self.peek().tag()) {
            Ok(self.consume())
        } else {
            Err(self.unexpected_token())
        }
    }

    /// Runs `rule` one nesting level deeper, failing with `NestingTooDeep`
    /// at the current token once [`MAX_NESTING_DEPTH`] is reached.
    pub fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Parser<'a>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_here(ErrorImpl::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            }));
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;

        result
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Error pointing at the current token.
    pub fn unexpected_token(&self) -> Error {
        self.error_here(ErrorImpl::UnexpectedToken {
            tag: self.peek().tag().to_string(),
        })
    }

    /// Allocation failure while building the tree, reported at the current token.
    pub fn out_of_memory(&self) -> Error {
        self.error_here(ErrorImpl::NoEnoughMemory {
            stage: Stage::Parser,
        })
    }

    fn error_here(&self, error_impl: ErrorImpl) -> Error {
        Error::new(error_impl, self.get_position(self.peek()))
    }

    /// Returns the 1-based position of `token` in the linked source.
    pub fn get_position(&self, token: &Token) -> Position {
        Position::from_zero_based(&self.name, token.row(), token.column())
    }

    /// Parses the linked tokens as a whole program.
    pub fn parse(&mut self) -> Result<AstNode, Error> {
        self.pos = 0;
        self.depth = 0;
        self.error = None;

        debug!(source = %self.name, tokens = self.tokens.len(), "parsing");

        match parse_program(self) {
            Ok(program) => {
                debug!(source = %self.name, nodes = program.count(), "parse finished");
                Ok(program)
            }
            Err(error) => {
                warn!(error = %error, "parser failed");
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }
}

/// Parses a scan result into a `Program` node.
///
/// This is the main entry point for parsing.
pub fn parse(lex_out: &LexOut) -> Result<AstNode, Error> {
    let mut parser = Parser::new();
    parser.link(lex_out);
    parser.parse()
}
