//! Error types for the front-end.
//!
//! Both the lexer and the parser report failures through the same
//! [`errors::Error`] type:
//!
//! - the failure kind ([`errors::ErrorImpl`])
//! - the 1-based source position it was detected at
//! - a display form matching the diagnostics contract
//!   (`Lexer error: Unexpected byte '@' at main.me:1:5`,
//!   `main.me:2:7: Parser error: Unexpected token ;`)

pub mod errors;
