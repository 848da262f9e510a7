use std::fmt::Display;

use thiserror::Error;

use crate::{util::bytes::render_byte, Position};

/// Which half of the front-end raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexer,
    Parser,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexer => write!(f, "Lexer error"),
            Stage::Parser => write!(f, "Parser error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::NoEnoughMemory { .. } => "NoEnoughMemory",
            ErrorImpl::UnexpectedByte { .. } => "UnexpectedByte",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::NumberOverflow => "NumberOverflow",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::NoEnoughMemory { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedByte { byte } => match *byte {
                b'\r' | b'\n' => ErrorTip::Suggestion(String::from(
                    "String literals cannot span multiple lines",
                )),
                _ => ErrorTip::Suggestion(format!("Unexpected byte {}", render_byte(*byte))),
            },
            ErrorImpl::UnexpectedEndOfInput => ErrorTip::Suggestion(String::from(
                "Input ended in the middle of a token",
            )),
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "String literal is missing its closing `\"`",
            )),
            ErrorImpl::NumberOverflow => ErrorTip::Suggestion(String::from(
                "Numeric literal does not fit in 64 bits",
            )),
            ErrorImpl::UnexpectedToken { tag } => {
                ErrorTip::Suggestion(format!("Unexpected token `{}`", tag))
            }
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Split the expression into smaller assignments",
            )),
            ErrorImpl::Io { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.internal_error {
            ErrorImpl::NoEnoughMemory {
                stage: Stage::Parser,
            } => write!(f, "{}: {}: No enough memory", self.position, Stage::Parser),
            ErrorImpl::NoEnoughMemory { stage } => {
                write!(f, "{}: No enough memory at {}", stage, self.position)
            }
            ErrorImpl::UnexpectedToken { tag } => write!(
                f,
                "{}: {}: Unexpected token {}",
                self.position,
                Stage::Parser,
                tag
            ),
            ErrorImpl::NestingTooDeep { .. } => write!(
                f,
                "{}: {}: {}",
                self.position,
                Stage::Parser,
                self.internal_error
            ),
            ErrorImpl::Io { message } => write!(f, "I/O error: {}", message),
            lex_error => write!(f, "{}: {} at {}", Stage::Lexer, lex_error, self.position),
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

fn rendered(byte: &u8) -> String {
    render_byte(*byte)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("No enough memory")]
    NoEnoughMemory { stage: Stage },
    #[error("Unexpected byte {}", rendered(.byte))]
    UnexpectedByte { byte: u8 },
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Numeric literal overflow")]
    NumberOverflow,
    #[error("Unexpected token {tag}")]
    UnexpectedToken { tag: String },
    #[error("Nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("{message}")]
    Io { message: String },
}
