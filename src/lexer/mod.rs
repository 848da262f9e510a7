//! Lexical analysis module.
//!
//! This module contains the byte-driven scanner that converts source bytes
//! into a stream of tokens for parsing. It handles:
//!
//! - Incremental input (`feed` may be called with arbitrary chunks)
//! - Recognition of keywords, names, numeric and string literals
//! - One- and two-byte operators and punctuation
//! - Row/column tracking for every lexeme, with `\r\n` collapsed to one line break

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
