//! Utility macros for the front-end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_BOX_NODE!` - Creates a boxed AST node
//!
//! These macros reduce boilerplate in the lexer and the grammar rules.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$span` - The lexeme span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::NumericLiteral(42), Span::new(0, 4, 2));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            span: $span,
        }
    };
}

/// Creates a boxed AST node.
///
/// # Example
///
/// ```ignore
/// let node = MK_BOX_NODE!(AstNode::Binary { op: BinaryOp::Add, lhs, rhs });
/// ```
#[macro_export]
macro_rules! MK_BOX_NODE {
    ($node:expr) => {
        ::std::boxed::Box::new($node)
    };
}
