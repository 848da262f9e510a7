use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{
        ast::AstNode,
        expressions::{BinaryOp, UnaryOp},
    },
    errors::errors::Error,
    lexer::tokens::TokenTag,
};

use super::{parser::Parser, stmt::*};

/// Precedence levels, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Exponent,
    Unary,
    Primary,
}

impl BindingPower {
    /// The next tighter level.
    pub fn next(&self) -> BindingPower {
        match self {
            BindingPower::LogicalOr => BindingPower::LogicalAnd,
            BindingPower::LogicalAnd => BindingPower::Equality,
            BindingPower::Equality => BindingPower::Relational,
            BindingPower::Relational => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Multiplicative,
            BindingPower::Multiplicative => BindingPower::Exponent,
            BindingPower::Exponent => BindingPower::Unary,
            BindingPower::Unary | BindingPower::Primary => BindingPower::Primary,
        }
    }
}

pub type StmtHandler = fn(&mut Parser) -> Result<AstNode, Error>;

pub type StmtLookup = HashMap<TokenTag, StmtHandler>;
pub type BinaryLookup = HashMap<TokenTag, (BindingPower, BinaryOp)>;
pub type UnaryLookup = HashMap<TokenTag, UnaryOp>;

lazy_static! {
    pub static ref STMT_LOOKUP: StmtLookup = {
        let mut map: StmtLookup = HashMap::new();
        map.insert(TokenTag::Name, parse_assignment_stmt as StmtHandler);
        map.insert(TokenTag::If, parse_if_stmt as StmtHandler);
        map.insert(TokenTag::LeftBrace, parse_block_stmt as StmtHandler);
        map
    };

    pub static ref BINARY_LOOKUP: BinaryLookup = {
        let mut map: BinaryLookup = HashMap::new();

        // Logical
        map.insert(TokenTag::Or, (BindingPower::LogicalOr, BinaryOp::LogicalOr));
        map.insert(TokenTag::And, (BindingPower::LogicalAnd, BinaryOp::LogicalAnd));

        // Equality and relational
        map.insert(TokenTag::Equ, (BindingPower::Equality, BinaryOp::Equ));
        map.insert(TokenTag::Neq, (BindingPower::Equality, BinaryOp::Neq));
        map.insert(TokenTag::LessThan, (BindingPower::Relational, BinaryOp::Lt));
        map.insert(TokenTag::Lte, (BindingPower::Relational, BinaryOp::Lte));
        map.insert(TokenTag::GreaterThan, (BindingPower::Relational, BinaryOp::Gt));
        map.insert(TokenTag::Gte, (BindingPower::Relational, BinaryOp::Gte));

        // Additive and multiplicative
        map.insert(TokenTag::Plus, (BindingPower::Additive, BinaryOp::Add));
        map.insert(TokenTag::Minus, (BindingPower::Additive, BinaryOp::Sub));
        map.insert(TokenTag::Asterisk, (BindingPower::Multiplicative, BinaryOp::Mul));
        map.insert(TokenTag::Slash, (BindingPower::Multiplicative, BinaryOp::Div));
        map.insert(TokenTag::Percent, (BindingPower::Multiplicative, BinaryOp::Mod));

        map.insert(TokenTag::Exponent, (BindingPower::Exponent, BinaryOp::Exp));
        map
    };

    pub static ref UNARY_LOOKUP: UnaryLookup = {
        let mut map: UnaryLookup = HashMap::new();
        map.insert(TokenTag::Not, UnaryOp::LogicalNot);
        map.insert(TokenTag::Plus, UnaryOp::Plus);
        map.insert(TokenTag::Minus, UnaryOp::Minus);
        map
    };
}

/// Binary operator spelled by `tag` at precedence level `bp`, if any.
pub fn binary_op_at(tag: TokenTag, bp: BindingPower) -> Option<BinaryOp> {
    match BINARY_LOOKUP.get(&tag) {
        Some((level, op)) if *level == bp => Some(*op),
        _ => None,
    }
}

pub fn unary_op(tag: TokenTag) -> Option<UnaryOp> {
    UNARY_LOOKUP.get(&tag).copied()
}

pub fn stmt_handler(tag: TokenTag) -> Option<StmtHandler> {
    STMT_LOOKUP.get(&tag).copied()
}
