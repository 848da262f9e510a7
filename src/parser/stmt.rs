use tracing::trace;

use crate::{
    ast::{ast::AstNode, statements::AstSeq},
    errors::errors::Error,
    lexer::tokens::{TokenKind, TokenTag},
};

use super::{expr::parse_expr, lookups::stmt_handler, parser::Parser};

/// `Program := Stmt* EOF`
pub fn parse_program(parser: &mut Parser) -> Result<AstNode, Error> {
    let mut body = AstSeq::new();

    while !parser.check(TokenTag::EOF) {
        let stmt = parse_stmt(parser)?;
        body.push(stmt).map_err(|_| parser.out_of_memory())?;
    }
    parser.expect(TokenTag::EOF)?;

    Ok(AstNode::program(body))
}

/// Dispatches on the leading token.
pub fn parse_stmt(parser: &mut Parser) -> Result<AstNode, Error> {
    let token = parser.peek();
    let (row, col) = (token.row(), token.column());

    let handler = match stmt_handler(token.tag()) {
        Some(handler) => handler,
        None => return Err(parser.unexpected_token()),
    };

    let stmt = handler(parser)?;
    trace!(row, col, "parsed {}", stmt.label());

    Ok(stmt)
}

/// `Name = Expr ;`
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<AstNode, Error> {
    let name = match parser.expect(TokenTag::Name)?.kind {
        TokenKind::Name(name) => name,
        _ => return Err(parser.unexpected_token()),
    };

    parser.expect(TokenTag::Assign)?;
    let value = parse_expr(parser)?;
    parser.expect(TokenTag::Semicolon)?;

    Ok(AstNode::assign(AstNode::variable(name), value))
}

/// `if Expr Block (else Block)?`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<AstNode, Error> {
    parser.expect(TokenTag::If)?;

    let cond = parse_expr(parser)?;
    let then_br = parse_block_stmt(parser)?;

    if !parser.check(TokenTag::Else) {
        return Ok(AstNode::if_stmt(cond, then_br));
    }

    parser.consume();
    let else_br = parse_block_stmt(parser)?;

    Ok(AstNode::if_else_stmt(cond, then_br, else_br))
}

/// `{ Stmt* }`
pub fn parse_block_stmt(parser: &mut Parser) -> Result<AstNode, Error> {
    parser.nested(|parser| {
        parser.expect(TokenTag::LeftBrace)?;

        let mut body = AstSeq::new();
        while !parser.check(TokenTag::RightBrace) {
            let stmt = parse_stmt(parser)?;
            body.push(stmt).map_err(|_| parser.out_of_memory())?;
        }

        parser.expect(TokenTag::RightBrace)?;

        Ok(AstNode::block(body))
    })
}
