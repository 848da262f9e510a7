//! Byte helpers shared by the lexer, the token model and the AST.
//!
//! Lexemes are stored as raw bytes (`Box<[u8]>`), so everything that prints
//! them goes through the presentation helpers in [`bytes`].

pub mod bytes;
