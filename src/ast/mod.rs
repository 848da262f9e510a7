/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node type and its debug dump
/// - expressions: Operators and expression constructors
/// - statements: Statement sequences and statement constructors
pub mod ast;
pub mod expressions;
pub mod statements;

#[cfg(test)]
mod tests;
