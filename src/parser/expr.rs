use crate::{
    ast::{ast::AstNode, expressions::BinaryOp},
    errors::errors::Error,
    lexer::tokens::{TokenKind, TokenTag},
};

use super::{
    lookups::{binary_op_at, unary_op, BindingPower},
    parser::Parser,
};

pub fn parse_expr(parser: &mut Parser) -> Result<AstNode, Error> {
    parse_binary_expr(parser, BindingPower::LogicalOr)
}

/// Parses one left-associative level of the ladder, with operands taken from
/// the next tighter level.
pub fn parse_binary_expr(parser: &mut Parser, bp: BindingPower) -> Result<AstNode, Error> {
    match bp {
        BindingPower::Exponent => return parse_exponent_expr(parser),
        BindingPower::Unary => return parse_unary_expr(parser),
        BindingPower::Primary => return parse_primary_expr(parser),
        _ => {}
    }

    let mut lhs = parse_binary_expr(parser, bp.next())?;

    while let Some(op) = binary_op_at(parser.peek().tag(), bp) {
        parser.consume();
        let rhs = parse_binary_expr(parser, bp.next())?;
        lhs = AstNode::binary(op, lhs, rhs);
    }

    Ok(lhs)
}

/// `^` is right-associative: the right operand recurses into this level.
pub fn parse_exponent_expr(parser: &mut Parser) -> Result<AstNode, Error> {
    let lhs = parse_unary_expr(parser)?;

    if !parser.check(TokenTag::Exponent) {
        return Ok(lhs);
    }

    parser.consume();
    let rhs = parser.nested(parse_exponent_expr)?;

    Ok(AstNode::binary(BinaryOp::Exp, lhs, rhs))
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<AstNode, Error> {
    let op = match unary_op(parser.peek().tag()) {
        Some(op) => op,
        None => return parse_primary_expr(parser),
    };

    parser.nested(|parser| {
        parser.consume();
        let operand = parse_unary_expr(parser)?;
        Ok(AstNode::unary(op, operand))
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<AstNode, Error> {
    match parser.peek().tag() {
        TokenTag::LeftParen => return parse_grouping_expr(parser),
        TokenTag::NumericLiteral
        | TokenTag::StringLiteral
        | TokenTag::Name
        | TokenTag::True
        | TokenTag::False => {}
        _ => return Err(parser.unexpected_token()),
    }

    match parser.consume().kind {
        TokenKind::NumericLiteral(value) => Ok(AstNode::number(value)),
        TokenKind::StringLiteral(value) => Ok(AstNode::string(value)),
        TokenKind::Name(name) => Ok(AstNode::variable(name)),
        TokenKind::True => Ok(AstNode::boolean(true)),
        TokenKind::False => Ok(AstNode::boolean(false)),
        _ => Err(parser.unexpected_token()),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<AstNode, Error> {
    parser.nested(|parser| {
        parser.expect(TokenTag::LeftParen)?;
        let expr = parse_expr(parser)?;
        parser.expect(TokenTag::RightParen)?;

        Ok(expr)
    })
}
