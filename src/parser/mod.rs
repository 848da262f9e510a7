//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! token sequence into a `Program` node. It handles:
//!
//! - Statements (assignment, `if`/`else`, blocks)
//! - Expressions through a precedence ladder, one function per level
//! - Error reporting at the first unexpected token
//!
//! Operator and statement dispatch tables live in [`lookups`].

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
