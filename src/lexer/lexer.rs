use std::{fs, mem, path::Path};

use tracing::{debug, warn};

use crate::{
    errors::errors::{Error, ErrorImpl, Stage},
    util::bytes::FixedBuf,
    Position, Span, MK_TOKEN,
};

use super::tokens::{lookup_keyword, TokenKind, TokenSeq};

/// Source name used when none is configured.
pub const DEFAULT_SOURCE_NAME: &str = "shell";

#[derive(Debug, Clone, Default)]
pub struct LexerConfig {
    /// Name quoted in diagnostics. Defaults to [`DEFAULT_SOURCE_NAME`].
    pub source_name: Option<String>,
    /// Fail with `UnterminatedString` when the input ends inside a string
    /// literal. By default such a literal is closed silently.
    pub strict_strings: bool,
}

/// Result of a completed scan: the source name, an owned copy of the scanned
/// bytes and the produced tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexOut {
    name: String,
    source: FixedBuf,
    tokens: TokenSeq,
}

impl LexOut {
    pub fn new(name: String, source: FixedBuf, tokens: TokenSeq) -> Self {
        LexOut {
            name,
            source,
            tokens,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn tokens(&self) -> &TokenSeq {
        &self.tokens
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CrLfPending,
    Name,
    Number,
    StringLiteral,
    AssignOrEqual,
    NotEqualPending,
    GreaterOrGte,
    LessOrLte,
}

/// Outcome of feeding one byte to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Consumed,
    /// The byte closed the current lexeme and must be fed again in the new state.
    Again,
}

/// Byte-driven scanner.
///
/// Input can be fed in arbitrary chunks; the FSM state survives between
/// [`Lexer::feed`] calls. [`Lexer::finalize`] closes the last lexeme, appends
/// `EOF` and hands the tokens over, leaving the lexer ready for the next input.
#[derive(Debug, Clone)]
pub struct Lexer {
    config: LexerConfig,
    name: String,
    state: State,
    /// Bytes of the name or string literal being scanned.
    scratch: Vec<u8>,
    /// Value of the numeric literal being scanned.
    number: u64,
    tokens: TokenSeq,
    source: Vec<u8>,
    row: usize,
    col: usize,
    /// Row and column of the first byte of the current lexeme.
    start: (usize, usize),
    error: Option<Error>,
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

impl Lexer {
    pub fn new() -> Lexer {
        Lexer::with_config(LexerConfig::default())
    }

    pub fn with_config(config: LexerConfig) -> Lexer {
        let name = config
            .source_name
            .clone()
            .unwrap_or_else(|| String::from(DEFAULT_SOURCE_NAME));

        Lexer {
            config,
            name,
            state: State::Idle,
            scratch: vec![],
            number: 0,
            tokens: TokenSeq::new(),
            source: vec![],
            row: 0,
            col: 0,
            start: (0, 0),
            error: None,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.name
    }

    pub fn set_source_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Error recorded by the last failed `feed`/`finalize`, kept until [`Lexer::reset`].
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Drops any partial scan and the recorded error.
    pub fn reset(&mut self) {
        self.error = None;
        self.tokens = TokenSeq::new();
        self.source.clear();
        self.restart();
    }

    fn restart(&mut self) {
        self.state = State::Idle;
        self.scratch.clear();
        self.number = 0;
        self.row = 0;
        self.col = 0;
        self.start = (0, 0);
    }

    /// Feeds the next chunk of input.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        if self.source.try_reserve(bytes.len()).is_err() {
            let error = self.out_of_memory();
            return Err(self.record(error));
        }
        self.source.extend_from_slice(bytes);

        for &byte in bytes {
            loop {
                match self.step(byte) {
                    Ok(Step::Consumed) => break,
                    Ok(Step::Again) => continue,
                    Err(error) => return Err(self.record(error)),
                }
            }
        }

        Ok(())
    }

    /// Closes the pending lexeme, appends `EOF` and returns the scan result.
    pub fn finalize(&mut self) -> Result<LexOut, Error> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        if let Err(error) = self.step_end() {
            return Err(self.record(error));
        }

        let eof = MK_TOKEN!(TokenKind::EOF, Span::new(self.row, self.col, 0));
        if self.tokens.push(eof).is_err() {
            let error = self.out_of_memory();
            return Err(self.record(error));
        }

        let mut tokens = mem::take(&mut self.tokens);
        tokens.compact();
        let source = mem::take(&mut self.source).into_boxed_slice();
        self.restart();

        debug!(source = %self.name, tokens = tokens.len(), "scan finished");

        Ok(LexOut::new(self.name.clone(), source, tokens))
    }

    /// Feeds a complete input and finalizes it.
    pub fn scan_buffer(&mut self, bytes: &[u8]) -> Result<LexOut, Error> {
        self.feed(bytes)?;
        self.finalize()
    }

    /// Reads `path` and scans it, using the path as source name.
    pub fn scan_file(&mut self, path: impl AsRef<Path>) -> Result<LexOut, Error> {
        let path = path.as_ref();
        self.set_source_name(path.display().to_string());

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                let error = Error::new(
                    ErrorImpl::Io {
                        message: format!("{}: {}", path.display(), err),
                    },
                    Position::from_zero_based(&self.name, 0, 0),
                );
                return Err(self.record(error));
            }
        };

        debug!(source = %self.name, bytes = bytes.len(), "scanning file");
        self.scan_buffer(&bytes)
    }

    fn record(&mut self, error: Error) -> Error {
        warn!(error = %error, "lexer failed");
        self.error = Some(error.clone());
        error
    }

    fn error_at(&self, error_impl: ErrorImpl, row: usize, col: usize) -> Error {
        Error::new(error_impl, Position::from_zero_based(&self.name, row, col))
    }

    /// Allocation failure, reported at the current row and column.
    pub fn out_of_memory(&self) -> Error {
        self.error_at(
            ErrorImpl::NoEnoughMemory {
                stage: Stage::Lexer,
            },
            self.row,
            self.col,
        )
    }

    fn unexpected_byte(&self, byte: u8) -> Error {
        self.error_at(ErrorImpl::UnexpectedByte { byte }, self.row, self.col)
    }

    fn begin(&mut self, state: State) {
        self.start = (self.row, self.col);
        self.state = state;
    }

    fn advance(&mut self) {
        self.col += 1;
    }

    fn new_line(&mut self) {
        self.row += 1;
        self.col = 0;
    }

    fn push_scratch(&mut self, byte: u8) -> Result<(), Error> {
        if self.scratch.try_reserve(1).is_err() {
            return Err(self.out_of_memory());
        }
        self.scratch.push(byte);
        Ok(())
    }

    fn scratch_copy(&self) -> Result<FixedBuf, Error> {
        let mut copy = Vec::new();
        if copy.try_reserve_exact(self.scratch.len()).is_err() {
            return Err(self.out_of_memory());
        }
        copy.extend_from_slice(&self.scratch);
        Ok(copy.into_boxed_slice())
    }

    /// Emits a token starting at the current lexeme start and ending at the
    /// current column.
    fn emit(&mut self, kind: TokenKind) -> Result<(), Error> {
        let (row, col) = self.start;
        let token = MK_TOKEN!(kind, Span::new(row, col, self.col - col));
        token.debug();
        self.tokens.push(token).map_err(|_| self.out_of_memory())
    }

    fn emit_single(&mut self, kind: TokenKind) -> Result<Step, Error> {
        self.start = (self.row, self.col);
        self.advance();
        self.emit(kind)?;
        Ok(Step::Consumed)
    }

    fn close_name(&mut self) -> Result<(), Error> {
        let kind = match lookup_keyword(&self.scratch) {
            Some(keyword) => keyword,
            None => TokenKind::Name(self.scratch_copy()?),
        };
        self.state = State::Idle;
        self.emit(kind)
    }

    fn close_number(&mut self) -> Result<(), Error> {
        self.state = State::Idle;
        self.emit(TokenKind::NumericLiteral(self.number))
    }

    fn close_string(&mut self) -> Result<(), Error> {
        let string = self.scratch_copy()?;
        self.state = State::Idle;
        self.emit(TokenKind::StringLiteral(string))
    }

    fn step(&mut self, byte: u8) -> Result<Step, Error> {
        match self.state {
            State::Idle => self.step_idle(byte),
            State::CrLfPending => self.step_cr_lf(byte),
            State::Name => self.step_name(byte),
            State::Number => self.step_number(byte),
            State::StringLiteral => self.step_string(byte),
            State::AssignOrEqual => self.step_pair(byte, TokenKind::Equ, TokenKind::Assign),
            State::NotEqualPending => self.step_not_equal(byte),
            State::GreaterOrGte => self.step_pair(byte, TokenKind::Gte, TokenKind::GreaterThan),
            State::LessOrLte => self.step_pair(byte, TokenKind::Lte, TokenKind::LessThan),
        }
    }

    fn step_idle(&mut self, byte: u8) -> Result<Step, Error> {
        match byte {
            b' ' | b'\t' => {
                self.advance();
                Ok(Step::Consumed)
            }
            b'\n' => {
                self.new_line();
                Ok(Step::Consumed)
            }
            b'\r' => {
                self.state = State::CrLfPending;
                Ok(Step::Consumed)
            }
            b'0'..=b'9' => {
                self.begin(State::Number);
                self.number = u64::from(byte - b'0');
                self.advance();
                Ok(Step::Consumed)
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.begin(State::Name);
                self.scratch.clear();
                self.push_scratch(byte)?;
                self.advance();
                Ok(Step::Consumed)
            }
            b'"' => {
                self.begin(State::StringLiteral);
                self.scratch.clear();
                self.advance();
                Ok(Step::Consumed)
            }
            b'=' | b'!' | b'>' | b'<' => {
                let state = match byte {
                    b'=' => State::AssignOrEqual,
                    b'!' => State::NotEqualPending,
                    b'>' => State::GreaterOrGte,
                    _ => State::LessOrLte,
                };
                self.begin(state);
                self.advance();
                Ok(Step::Consumed)
            }
            b'(' => self.emit_single(TokenKind::LeftParen),
            b')' => self.emit_single(TokenKind::RightParen),
            b'[' => self.emit_single(TokenKind::LeftBracket),
            b']' => self.emit_single(TokenKind::RightBracket),
            b'{' => self.emit_single(TokenKind::LeftBrace),
            b'}' => self.emit_single(TokenKind::RightBrace),
            b'+' => self.emit_single(TokenKind::Plus),
            b'-' => self.emit_single(TokenKind::Minus),
            b'*' => self.emit_single(TokenKind::Asterisk),
            b'/' => self.emit_single(TokenKind::Slash),
            b'%' => self.emit_single(TokenKind::Percent),
            b'^' => self.emit_single(TokenKind::Exponent),
            b';' => self.emit_single(TokenKind::Semicolon),
            _ => Err(self.unexpected_byte(byte)),
        }
    }

    fn step_cr_lf(&mut self, byte: u8) -> Result<Step, Error> {
        // A bare `\r` is a line break on its own.
        self.new_line();
        self.state = State::Idle;

        if byte == b'\n' {
            Ok(Step::Consumed)
        } else {
            Ok(Step::Again)
        }
    }

    fn step_name(&mut self, byte: u8) -> Result<Step, Error> {
        if byte.is_ascii_alphanumeric() || byte == b'_' {
            self.push_scratch(byte)?;
            self.advance();
            return Ok(Step::Consumed);
        }

        self.close_name()?;
        Ok(Step::Again)
    }

    fn step_number(&mut self, byte: u8) -> Result<Step, Error> {
        if !byte.is_ascii_digit() {
            self.close_number()?;
            return Ok(Step::Again);
        }

        match self
            .number
            .checked_mul(10)
            .and_then(|value| value.checked_add(u64::from(byte - b'0')))
        {
            Some(value) => {
                self.number = value;
                self.advance();
                Ok(Step::Consumed)
            }
            None => {
                let (row, col) = self.start;
                Err(self.error_at(ErrorImpl::NumberOverflow, row, col))
            }
        }
    }

    fn step_string(&mut self, byte: u8) -> Result<Step, Error> {
        match byte {
            b'\r' | b'\n' => Err(self.unexpected_byte(byte)),
            b'"' => {
                self.advance();
                self.close_string()?;
                Ok(Step::Consumed)
            }
            _ => {
                self.push_scratch(byte)?;
                self.advance();
                Ok(Step::Consumed)
            }
        }
    }

    /// Shared by `=`/`==`, `>`/`>=` and `<`/`<=`.
    fn step_pair(&mut self, byte: u8, long: TokenKind, short: TokenKind) -> Result<Step, Error> {
        self.state = State::Idle;

        if byte == b'=' {
            self.advance();
            self.emit(long)?;
            Ok(Step::Consumed)
        } else {
            self.emit(short)?;
            Ok(Step::Again)
        }
    }

    fn step_not_equal(&mut self, byte: u8) -> Result<Step, Error> {
        if byte != b'=' {
            return Err(self.unexpected_byte(byte));
        }

        self.state = State::Idle;
        self.advance();
        self.emit(TokenKind::Neq)?;
        Ok(Step::Consumed)
    }

    /// End-of-input transition for the current state.
    fn step_end(&mut self) -> Result<(), Error> {
        match self.state {
            State::Idle => Ok(()),
            State::CrLfPending => {
                self.new_line();
                self.state = State::Idle;
                Ok(())
            }
            State::Name => self.close_name(),
            State::Number => self.close_number(),
            State::StringLiteral => {
                if self.config.strict_strings {
                    let (row, col) = self.start;
                    Err(self.error_at(ErrorImpl::UnterminatedString, row, col))
                } else {
                    self.close_string()
                }
            }
            State::AssignOrEqual => {
                self.state = State::Idle;
                self.emit(TokenKind::Assign)
            }
            State::GreaterOrGte => {
                self.state = State::Idle;
                self.emit(TokenKind::GreaterThan)
            }
            State::LessOrLte => {
                self.state = State::Idle;
                self.emit(TokenKind::LessThan)
            }
            State::NotEqualPending => {
                Err(self.error_at(ErrorImpl::UnexpectedEndOfInput, self.row, self.col))
            }
        }
    }
}

/// Scans a complete input in one go.
///
/// `file` is the source name quoted in diagnostics; `None` means
/// [`DEFAULT_SOURCE_NAME`].
pub fn tokenize(source: impl AsRef<[u8]>, file: Option<String>) -> Result<LexOut, Error> {
    let mut lexer = Lexer::with_config(LexerConfig {
        source_name: file,
        ..LexerConfig::default()
    });

    lexer.scan_buffer(source.as_ref())
}
